//! Asset model: declared items, kinds and minification.

mod item;
mod kind;
pub mod minify;

pub use item::{AssetError, AssetItem, AttrMap, AttrValue};
pub use kind::AssetKind;
