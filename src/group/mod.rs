//! Partitioning: group declared asset items by attribute signature.
//!
//! Items that share a signature are compatible for joint rendering: they
//! carry the same custom attributes, so one joined tag can serve all of
//! them. The `no_minify` flag routes an item into the render-separately
//! side while still grouping it with like-attributed neighbors.

mod bucket;
mod signature;

pub use bucket::{Bucket, BucketSet};
pub use signature::Signature;

use crate::asset::AssetItem;

/// The two sides of one render pass.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Buckets whose items may be joined and minified together.
    pub minified: BucketSet,
    /// Buckets whose items are rendered without minification.
    pub separate: BucketSet,
}

/// Split items into minify-together and render-separately buckets.
///
/// Purely a function of each item's attributes and its `no_minify` flag.
/// Bucket order follows the first appearance of each signature in the
/// input, and items accumulate within their bucket in input order. Empty
/// input yields two empty sets.
pub fn partition(items: &[AssetItem]) -> Partition {
    let mut out = Partition::default();
    for item in items {
        let signature = Signature::of(item);
        let side = if item.no_minify {
            &mut out.separate
        } else {
            &mut out.minified
        };
        side.push(signature, item.clone());
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
