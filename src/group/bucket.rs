//! Buckets: ordered groups of compatible asset items.

use rustc_hash::FxHashMap;

use super::Signature;
use crate::asset::AssetItem;

/// Items sharing one attribute signature, in declaration order.
#[derive(Debug, Clone)]
pub struct Bucket {
    signature: Signature,
    items: Vec<AssetItem>,
}

impl Bucket {
    fn new(signature: Signature) -> Self {
        Self {
            signature,
            items: Vec::new(),
        }
    }

    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn items(&self) -> &[AssetItem] {
        &self.items
    }

    /// Declared paths of the items, in order. This is the input to cache
    /// file naming.
    pub fn paths(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.path.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Bucket Set
// ============================================================================

/// Signature-keyed buckets preserving first-appearance order.
///
/// Buckets iterate in the order their first item was declared, and each
/// bucket keeps its items in declaration order, so emitted markup never
/// reorders what the caller wrote.
#[derive(Debug, Clone, Default)]
pub struct BucketSet {
    buckets: Vec<Bucket>,
    index: FxHashMap<Signature, usize>,
}

impl BucketSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to its signature's bucket, creating the bucket at
    /// the end of the order on first sight.
    pub(crate) fn push(&mut self, signature: Signature, item: AssetItem) {
        match self.index.get(&signature) {
            Some(&at) => self.buckets[at].items.push(item),
            None => {
                self.index.insert(signature, self.buckets.len());
                let mut bucket = Bucket::new(signature);
                bucket.items.push(item);
                self.buckets.push(bucket);
            }
        }
    }

    pub fn get(&self, signature: Signature) -> Option<&Bucket> {
        self.index.get(&signature).map(|&at| &self.buckets[at])
    }

    /// Iterate buckets in first-appearance order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<'a> IntoIterator for &'a BucketSet {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(path: &str) -> AssetItem {
        AssetItem::new(path)
    }

    #[test]
    fn test_push_groups_by_signature() {
        let mut set = BucketSet::new();
        let plain = Signature::of(&item("/a.css"));
        let print = Signature::of(&item("/b.css").with_attr("media", "print"));

        set.push(plain, item("/a.css"));
        set.push(print, item("/b.css").with_attr("media", "print"));
        set.push(plain, item("/c.css"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(plain).unwrap().paths(), ["/a.css", "/c.css"]);
        assert_eq!(set.get(print).unwrap().paths(), ["/b.css"]);
    }

    #[test]
    fn test_buckets_keep_first_appearance_order() {
        let mut set = BucketSet::new();
        let with_media = item("/m.css").with_attr("media", "print");
        let plain = item("/p.css");

        set.push(Signature::of(&with_media), with_media.clone());
        set.push(Signature::of(&plain), plain.clone());
        set.push(Signature::of(&with_media), item("/m2.css").with_attr("media", "print"));

        let first: Vec<&str> = set.iter().flat_map(Bucket::paths).collect();
        assert_eq!(first, ["/m.css", "/m2.css", "/p.css"]);
    }

    #[test]
    fn test_empty_set() {
        let set = BucketSet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
