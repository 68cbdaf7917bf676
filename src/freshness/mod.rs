//! Freshness detection: mtime comparison for bundles, imprints for URLs.

mod imprint;
mod mtime;

pub use imprint::{FileCheck, ImprintCache, imprint};
pub use mtime::{any_newer_than, get_mtime, is_newer_than};
