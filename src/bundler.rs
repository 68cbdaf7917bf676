//! The bundler: from declared asset items to emitted markup.
//!
//! One render pass works in five steps:
//!
//! 1. validate the declared items (fail fast on contract violations)
//! 2. partition them into minify-together and render-separately buckets
//!    by attribute signature
//! 3. per bucket, derive the deterministic bundle file name and let the
//!    store reuse or rebuild the file
//! 4. complete each href with the configured base path and cache-busting
//!    imprint
//! 5. emit `<link>`/`<script>` tags in declaration order

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::asset::{AssetError, AssetItem, AssetKind, AttrMap, minify};
use crate::cache::{BundleStore, bundle_file_name};
use crate::config::BundleConfig;
use crate::freshness::ImprintCache;
use crate::group::{Bucket, partition};
use crate::logger::{Logger, TermLogger};
use crate::render::{complete_href, href_with_imprint, link_tag, script_tag};

/// Stateful asset bundler for one application.
///
/// Construction prepares the bundle directory; rendering is `&self` and
/// thread-safe, so one instance can serve concurrent page renders.
pub struct Bundler {
    config: BundleConfig,
    store: BundleStore,
    imprints: ImprintCache,
    logger: Box<dyn Logger>,
}

impl Bundler {
    /// Create a bundler from a configuration.
    ///
    /// Normalizes and validates the configuration and prepares the
    /// bundle directory below `app_root`.
    pub fn new(mut config: BundleConfig) -> Result<Self> {
        config.normalize();
        config.validate()?;
        let store = BundleStore::new(&config.app_root, &config.bundle_dir, config.render_files)?;
        Ok(Self {
            config,
            store,
            imprints: ImprintCache::new(),
            logger: Box::new(TermLogger::default()),
        })
    }

    /// Replace the diagnostic sink.
    #[must_use]
    pub fn with_logger(mut self, logger: Box<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// Drop the memoized imprint for one file. Call after rewriting an
    /// asset in place while keeping the bundler alive.
    pub fn invalidate(&self, path: &Path) {
        self.imprints.invalidate(path);
    }

    /// Render `<link>` tags for stylesheet items.
    pub fn render_css(&self, items: &[AssetItem]) -> Result<String> {
        self.render(AssetKind::Css, items)
    }

    /// Render `<script>` tags for script items.
    pub fn render_js(&self, items: &[AssetItem]) -> Result<String> {
        self.render(AssetKind::Js, items)
    }

    /// Render markup for one kind's items.
    ///
    /// Tags come out in declaration order: minify-together buckets first
    /// (in first-appearance order), then render-separately items.
    pub fn render(&self, kind: AssetKind, items: &[AssetItem]) -> Result<String> {
        if items.is_empty() {
            return Ok(String::new());
        }
        self.validate_items(items)?;

        let options = self.config.options(kind);
        let parts = partition(items);
        let mut tags = Vec::new();

        for bucket in &parts.minified {
            if options.join {
                self.push_joined(&mut tags, kind, bucket, options.minify)?;
            } else {
                for item in bucket.items() {
                    tags.push(self.single_tag(kind, item, options.minify)?);
                }
            }
        }
        for bucket in &parts.separate {
            for item in bucket.items() {
                tags.push(self.separate_tag(kind, item)?);
            }
        }

        Ok(self.join_tags(&tags))
    }

    // ========================================================================
    // item validation
    // ========================================================================

    /// Fail fast on malformed declarations before touching the store.
    fn validate_items(&self, items: &[AssetItem]) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            if item.path.trim().is_empty() {
                return Err(AssetError::EmptyPath { index }.into());
            }
            if item.external || !self.config.check_sources {
                continue;
            }
            let source = item.source_path(&self.config.app_root);
            if !source.exists() {
                return Err(AssetError::MissingSource(source).into());
            }
        }
        Ok(())
    }

    // ========================================================================
    // tag production
    // ========================================================================

    /// Emit one bucket as a joined bundle tag.
    ///
    /// External items cannot be read into a bundle; they keep their own
    /// tags ahead of the bucket's bundle tag, in declaration order.
    fn push_joined(
        &self,
        tags: &mut Vec<String>,
        kind: AssetKind,
        bucket: &Bucket,
        minify: bool,
    ) -> Result<()> {
        let (external, local): (Vec<&AssetItem>, Vec<&AssetItem>) =
            bucket.items().iter().partition(|item| item.external);

        for item in external {
            tags.push(self.external_tag(kind, item));
        }
        if local.is_empty() {
            return Ok(());
        }

        let paths: Vec<&str> = local.iter().map(|item| item.path.as_str()).collect();
        let name = bundle_file_name(&paths, minify, kind.extension());
        let sources: Vec<PathBuf> = local
            .iter()
            .map(|item| item.source_path(&self.config.app_root))
            .collect();

        let ensured = self.store.ensure(&name, &sources, &*self.logger, || {
            self.build_bundle(kind, &local, minify)
        })?;
        if ensured.written {
            self.imprints.invalidate(&ensured.path);
        }

        let href = self.bundle_href(&name, &ensured.path);
        tags.push(self.kind_tag(kind, &href, &local[0].attrs));
        Ok(())
    }

    /// Tag for one minify-together item when joining is off.
    ///
    /// With minification on, the item gets its own single-source bundle;
    /// pre-minified sources (`*.min.js`) are referenced directly.
    fn single_tag(&self, kind: AssetKind, item: &AssetItem, minify: bool) -> Result<String> {
        if item.external {
            return Ok(self.external_tag(kind, item));
        }
        if !minify || minify::is_preminified(&item.path) {
            return Ok(self.source_tag(kind, item));
        }

        let paths = [item.path.as_str()];
        let name = bundle_file_name(&paths, true, kind.extension());
        let sources = [item.source_path(&self.config.app_root)];

        let ensured = self.store.ensure(&name, &sources, &*self.logger, || {
            self.build_bundle(kind, &[item], true)
        })?;
        if ensured.written {
            self.imprints.invalidate(&ensured.path);
        }

        let href = self.bundle_href(&name, &ensured.path);
        Ok(self.kind_tag(kind, &href, &item.attrs))
    }

    /// Tag for one render-separately item.
    ///
    /// The `render` flag copies the source into the bundle directory so
    /// the emitted href never exposes the original location.
    fn separate_tag(&self, kind: AssetKind, item: &AssetItem) -> Result<String> {
        if item.external {
            return Ok(self.external_tag(kind, item));
        }
        if !item.render {
            return Ok(self.source_tag(kind, item));
        }

        let paths = [item.path.as_str()];
        let name = bundle_file_name(&paths, false, kind.extension());
        let sources = [item.source_path(&self.config.app_root)];

        let ensured = self.store.ensure(&name, &sources, &*self.logger, || {
            self.build_bundle(kind, &[item], false)
        })?;
        if ensured.written {
            self.imprints.invalidate(&ensured.path);
        }

        let href = self.bundle_href(&name, &ensured.path);
        Ok(self.kind_tag(kind, &href, &item.attrs))
    }

    /// Tag referencing the declared source directly.
    fn source_tag(&self, kind: AssetKind, item: &AssetItem) -> String {
        let href = complete_href(&self.config.base_path, &item.path);
        let href = self.versioned(href, &item.source_path(&self.config.app_root));
        self.kind_tag(kind, &href, &item.attrs)
    }

    /// Tag referencing a foreign URL verbatim: no completion, no imprint.
    fn external_tag(&self, kind: AssetKind, item: &AssetItem) -> String {
        self.kind_tag(kind, &item.path, &item.attrs)
    }

    fn kind_tag(&self, kind: AssetKind, href: &str, attrs: &AttrMap) -> String {
        match kind {
            AssetKind::Css => link_tag(href, attrs),
            AssetKind::Js => script_tag(href, attrs),
        }
    }

    // ========================================================================
    // href assembly
    // ========================================================================

    fn bundle_href(&self, name: &str, path: &Path) -> String {
        let href = complete_href(&self.config.base_path, &self.store.url_path(name));
        self.versioned(href, path)
    }

    /// Append the cache-busting parameter when an imprint is available.
    fn versioned(&self, href: String, file: &Path) -> String {
        match self.imprints.get_or_compute(file, self.config.file_check) {
            Some(imprint) => href_with_imprint(&href, &imprint),
            None => {
                self.logger.debug(&format!(
                    "no imprint for {}, emitting bare href",
                    file.display()
                ));
                href
            }
        }
    }

    // ========================================================================
    // bundle content
    // ========================================================================

    /// Read the items' sources and join them, minifying each piece when
    /// asked. A piece that fails to minify is kept raw with a warning.
    fn build_bundle(&self, kind: AssetKind, items: &[&AssetItem], minify: bool) -> Result<String> {
        let mut pieces = Vec::with_capacity(items.len());
        for item in items {
            let source = item.source_path(&self.config.app_root);
            let raw = fs::read_to_string(&source)
                .with_context(|| format!("reading asset source {}", source.display()))?;
            let piece = if minify && !minify::is_preminified(&item.path) {
                match minify::minify(kind, &raw) {
                    Some(minified) => minified,
                    None => {
                        self.logger
                            .warn(&format!("failed to minify {}, using raw source", item.path));
                        raw
                    }
                }
            } else {
                raw
            };
            pieces.push(piece);
        }
        Ok(pieces.join("\n"))
    }

    fn join_tags(&self, tags: &[String]) -> String {
        let prefix = self.config.indent.prefix();
        if prefix.is_empty() {
            tags.join("\n")
        } else {
            tags.iter()
                .map(|tag| format!("{prefix}{tag}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
