//! Attribute signatures: stable grouping keys for asset items.

use serde::Serialize;

use crate::asset::{AssetItem, AttrMap};
use crate::utils::hash;

/// A 256-bit attribute signature (blake3 over the canonical encoding).
///
/// Two items carry the same signature exactly when they can share a tag:
/// the signature covers `no_minify` and every custom attribute, and
/// excludes `path`, `render` and `external`, which never affect how a
/// group may be joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 32]);

impl Signature {
    /// Compute the signature of one item.
    pub fn of(item: &AssetItem) -> Self {
        Self::over(item.no_minify, &item.attrs)
    }

    pub(crate) fn over(no_minify: bool, attrs: &AttrMap) -> Self {
        #[derive(Serialize)]
        struct Parts<'a> {
            no_minify: bool,
            attrs: &'a AttrMap,
        }

        // Attrs are BTreeMap-backed, so the JSON encoding is key-sorted
        // and independent of insertion order. Scalar values only, hence
        // the encoding is total.
        let encoded = serde_json::to_vec(&Parts { no_minify, attrs })
            .expect("scalar attribute maps always encode");
        Self(hash::compute(&encoded))
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string (for debugging/display).
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetItem;

    #[test]
    fn test_signature_ignores_insertion_order() {
        let a = AssetItem::new("/a.css")
            .with_attr("media", "print")
            .with_attr("crossorigin", "anonymous");
        let b = AssetItem::new("/b.css")
            .with_attr("crossorigin", "anonymous")
            .with_attr("media", "print");
        assert_eq!(Signature::of(&a), Signature::of(&b));
    }

    #[test]
    fn test_signature_ignores_path_render_external() {
        let mut a = AssetItem::new("/one.js");
        let mut b = AssetItem::new("/two.js");
        a.render = true;
        b.external = true;
        assert_eq!(Signature::of(&a), Signature::of(&b));
    }

    #[test]
    fn test_signature_covers_no_minify() {
        let plain = AssetItem::new("/a.js");
        let mut kept = AssetItem::new("/a.js");
        kept.no_minify = true;
        assert_ne!(Signature::of(&plain), Signature::of(&kept));
    }

    #[test]
    fn test_signature_covers_attr_values() {
        let print = AssetItem::new("/a.css").with_attr("media", "print");
        let screen = AssetItem::new("/a.css").with_attr("media", "screen");
        assert_ne!(Signature::of(&print), Signature::of(&screen));
    }

    #[test]
    fn test_signature_distinguishes_value_types() {
        let truthy = AssetItem::new("/a.js").with_attr("defer", true);
        let texty = AssetItem::new("/a.js").with_attr("defer", "true");
        assert_ne!(Signature::of(&truthy), Signature::of(&texty));
    }

    #[test]
    fn test_signature_display_is_short_hex() {
        let sig = Signature::of(&AssetItem::new("/a.css"));
        let shown = format!("{sig}");
        assert_eq!(shown.len(), 16);
        assert!(sig.to_hex().starts_with(&shown));
    }
}
