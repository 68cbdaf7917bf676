//! Utility modules shared across the crate.

pub mod date;
pub mod hash;
pub mod html;
pub mod path;
