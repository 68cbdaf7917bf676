//! Sheaf - CSS/JS asset bundling and tag rendering for server-rendered pages.
//!
//! A page declares the stylesheets and scripts it needs as [`AssetItem`]s;
//! the [`Bundler`] groups compatible items, maintains joined (and optionally
//! minified) bundle files under the application root, and returns the
//! `<link>`/`<script>` markup with cache-busting URL parameters.
//!
//! ```no_run
//! use sheaf::{AssetItem, BundleConfig, Bundler};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut config = BundleConfig::default();
//! config.app_root = "/srv/app".into();
//! config.css.join = true;
//! config.css.minify = true;
//!
//! let bundler = Bundler::new(config)?;
//! let tags = bundler.render_css(&[
//!     AssetItem::new("/static/base.css"),
//!     AssetItem::new("/static/theme.css").with_attr("media", "screen"),
//! ])?;
//! # Ok(())
//! # }
//! ```

mod bundler;
mod utils;

pub mod asset;
pub mod cache;
pub mod config;
pub mod freshness;
pub mod group;
pub mod logger;
pub mod render;

pub use asset::{AssetError, AssetItem, AssetKind, AttrMap, AttrValue};
pub use bundler::Bundler;
pub use cache::{BundleStore, Ensured, bundle_file_name};
pub use config::{BundleConfig, ConfigError, KindOptions};
pub use freshness::{FileCheck, ImprintCache};
pub use group::{Bucket, BucketSet, Partition, Signature, partition};
pub use logger::{Logger, NullLogger, TermLogger};
pub use render::{Indent, complete_href, href_with_imprint, link_tag, script_tag};
