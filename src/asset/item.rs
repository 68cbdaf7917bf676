//! Asset item model: a declared source path plus rendering attributes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Scalar attribute value carried on an asset item.
///
/// Attribute values stay scalar so their canonical JSON encoding (used
/// for grouping signatures) is total: no floats, no nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Attribute map with deterministic iteration order.
///
/// Backed by a `BTreeMap` so serialization and tag rendering are
/// independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttrMap(BTreeMap<String, AttrValue>);

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Iterate attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Asset Item
// ============================================================================

/// A single declared asset.
///
/// `path` is root-relative for local assets (`/static/app.js`) or a full
/// URL when `external` is set. The three flags control bundling:
///
/// - `no_minify`: keep the item out of minified bundles; it still groups
///   with other `no_minify` items sharing its attributes.
/// - `render`: copy the source into the bundle directory even when it is
///   referenced alone, so the served file never points at the original.
/// - `external`: the path is a foreign URL; never read, never bundled.
///
/// Everything else (`media`, `defer`, custom `data-*`) goes into `attrs`
/// and is emitted verbatim on the tag.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetItem {
    pub path: String,
    pub no_minify: bool,
    pub render: bool,
    pub external: bool,
    pub attrs: AttrMap,
}

impl AssetItem {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            no_minify: false,
            render: false,
            external: false,
            attrs: AttrMap::new(),
        }
    }

    /// Builder-style attribute insertion.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Resolve the on-disk location of a local asset below `app_root`.
    pub fn source_path(&self, app_root: &Path) -> PathBuf {
        app_root.join(self.path.trim_start_matches('/'))
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Items whose declarations violate the caller contract.
#[derive(Debug, Error)]
pub enum AssetError {
    /// An item was declared without a path.
    #[error("asset item {index} has an empty path")]
    EmptyPath { index: usize },

    /// A declared local source does not exist under the application root.
    #[error("asset source not found: {0}")]
    MissingSource(PathBuf),
}

// ============================================================================
// Tests
// ============================================================================
