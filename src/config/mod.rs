//! Bundler configuration for `sheaf.toml`.
//!
//! # Fields
//!
//! | Field           | Default        | Purpose                                   |
//! |-----------------|----------------|-------------------------------------------|
//! | `app_root`      | `.`            | Served document root; asset paths resolve below it |
//! | `base_path`     | `""`           | Prefix for emitted hrefs (`/sub` or a CDN URL) |
//! | `bundle_dir`    | `cache/assets` | Bundle directory, relative to `app_root`  |
//! | `file_check`    | `mtime`        | Imprint mode: `mtime` or `content`        |
//! | `check_sources` | `true`         | Verify declared sources exist before bundling |
//! | `render_files`  | `true`         | Write bundle files (off for packaged deployments) |
//! | `indent`        | `0`            | Tag indentation: tab count or literal string |
//! | `[css]`         | all `false`    | `join` and `minify` switches for stylesheets |
//! | `[js]`          | all `false`    | `join` and `minify` switches for scripts  |

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset::AssetKind;
use crate::freshness::FileCheck;
use crate::logger::Logger;
use crate::render::Indent;
use crate::utils::{hash, path::normalize_path};

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config validation failed:\n- {}", .0.join("\n- "))]
    Validation(Vec<String>),
}

// ============================================================================
// Per-kind options
// ============================================================================

/// Join/minify switches for one asset kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindOptions {
    /// Join compatible items into one bundle file per bucket.
    pub join: bool,
    /// Minify bundled sources.
    pub minify: bool,
}

// ============================================================================
// Root configuration
// ============================================================================

/// Root configuration for one bundler instance.
///
/// Deliberately a plain value passed at construction: two bundlers with
/// different configurations can coexist in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Served document root; local asset paths resolve below it.
    pub app_root: PathBuf,

    /// Prefix for emitted hrefs: empty, root-relative (`/sub`) or an
    /// absolute `http(s)` URL.
    pub base_path: String,

    /// Bundle directory, relative to `app_root`.
    pub bundle_dir: PathBuf,

    /// How file identity is derived for cache-busting imprints.
    pub file_check: FileCheck,

    /// Verify declared sources exist before bundling.
    pub check_sources: bool,

    /// Write bundle files. Disabled for deployments where bundles were
    /// produced at build time and the runtime filesystem is read-only.
    pub render_files: bool,

    /// Indentation prefix for emitted tags.
    pub indent: Indent,

    /// Stylesheet bundling options.
    pub css: KindOptions,

    /// Script bundling options.
    pub js: KindOptions,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            app_root: PathBuf::from("."),
            base_path: String::new(),
            bundle_dir: PathBuf::from("cache/assets"),
            file_check: FileCheck::default(),
            check_sources: true,
            render_files: true,
            indent: Indent::default(),
            css: KindOptions::default(),
            js: KindOptions::default(),
        }
    }
}

impl BundleConfig {
    /// Load configuration from a TOML file.
    ///
    /// Unknown fields are reported through the logger and ignored; the
    /// result is normalized and validated.
    pub fn load(path: &Path, logger: &dyn Logger) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_toml(&content, logger)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string, reporting unknown fields.
    pub fn from_toml(content: &str, logger: &dyn Logger) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        if !ignored.is_empty() {
            logger.warn(&format!(
                "unknown config fields ignored: {}",
                ignored.join(", ")
            ));
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Normalize `app_root` to an absolute path.
    ///
    /// Bundle paths derived from it then stay stable even if the process
    /// later changes its working directory.
    pub fn normalize(&mut self) {
        self.app_root = normalize_path(&self.app_root);
    }

    /// Validate the configuration, collecting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.bundle_dir.as_os_str().is_empty() {
            problems.push("bundle_dir: must not be empty".to_string());
        }
        for component in self.bundle_dir.components() {
            use std::path::Component;
            match component {
                Component::ParentDir => {
                    problems
                        .push("bundle_dir: parent directory `..` is not allowed".to_string());
                    break;
                }
                Component::RootDir | Component::Prefix(_) => {
                    problems.push(
                        "bundle_dir: must be relative to app_root, not absolute".to_string(),
                    );
                    break;
                }
                _ => {}
            }
        }

        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            if self.base_path.starts_with("http://") || self.base_path.starts_with("https://") {
                if let Err(err) = url::Url::parse(&self.base_path) {
                    problems.push(format!("base_path: invalid URL ({err})"));
                }
            } else {
                problems.push(
                    "base_path: must be empty, root-relative or an absolute http(s) URL"
                        .to_string(),
                );
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }

    /// Options table for one asset kind.
    pub const fn options(&self, kind: AssetKind) -> KindOptions {
        match kind {
            AssetKind::Css => self.css,
            AssetKind::Js => self.js,
        }
    }

    /// Stable fingerprint of the effective configuration.
    ///
    /// Embedders mix this into their own cache keys, so cached markup is
    /// discarded whenever bundling options change.
    pub fn fingerprint(&self) -> String {
        #[derive(Serialize)]
        struct Canonical<'a> {
            app_root: String,
            base_path: &'a str,
            bundle_dir: String,
            file_check: FileCheck,
            check_sources: bool,
            render_files: bool,
            indent: &'a Indent,
            css: KindOptions,
            js: KindOptions,
        }

        let view = Canonical {
            app_root: self.app_root.to_string_lossy().into_owned(),
            base_path: &self.base_path,
            bundle_dir: self.bundle_dir.to_string_lossy().replace('\\', "/"),
            file_check: self.file_check,
            check_sources: self.check_sources,
            render_files: self.render_files,
            indent: &self.indent,
            css: self.css,
            js: self.js,
        };
        // Strings and bools only, so the encoding is total.
        let encoded = serde_json::to_vec(&view).expect("configuration views always encode");
        hash::fingerprint(&encoded)
    }
}

// ============================================================================
// Tests
// ============================================================================
