//! Asset kind definitions.

/// Kind of bundleable asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Stylesheet rendered as a `<link>` tag.
    Css,
    /// Script rendered as a `<script>` tag.
    Js,
}

impl AssetKind {
    /// File extension used in source paths and cache file names.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
        }
    }
}
