//! Bundle store: cache-directory bookkeeping and atomic writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::freshness::any_newer_than;
use crate::logger::Logger;

/// Owns the bundle directory below the served application root.
///
/// Bundles are plain files; concurrent renders are safe because every
/// write goes through a temp file in the same directory followed by an
/// atomic rename, so readers only ever see complete bundles.
#[derive(Debug)]
pub struct BundleStore {
    /// Absolute bundle directory (`app_root` joined with the configured
    /// bundle dir).
    dir: PathBuf,
    /// Root-relative URL prefix of the bundle directory.
    url_prefix: String,
    /// When false the store never writes; bundles are expected to exist
    /// from a previous build (packaged deployments).
    render_files: bool,
}

/// Outcome of an [`BundleStore::ensure`] call.
#[derive(Debug)]
pub struct Ensured {
    /// Where the bundle lives (written or not).
    pub path: PathBuf,
    /// Whether this call wrote the file.
    pub written: bool,
}

impl BundleStore {
    /// Create the store, preparing the bundle directory when writes are
    /// enabled.
    pub fn new(app_root: &Path, bundle_dir: &Path, render_files: bool) -> Result<Self> {
        let dir = app_root.join(bundle_dir);
        if render_files {
            fs::create_dir_all(&dir)
                .with_context(|| format!("creating bundle directory {}", dir.display()))?;
        }
        let url_prefix = format!("/{}", bundle_dir.to_string_lossy().replace('\\', "/"));
        Ok(Self {
            dir,
            url_prefix,
            render_files,
        })
    }

    /// Absolute path of a named bundle.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Root-relative URL path of a named bundle.
    pub fn url_path(&self, name: &str) -> String {
        format!("{}/{name}", self.url_prefix)
    }

    /// Reuse the named bundle when fresh, otherwise build and write it.
    ///
    /// Fresh means the bundle exists and none of `sources` is newer. The
    /// deterministic name already keys on the path list, so the mtime
    /// check is what catches content edits behind an unchanged name.
    pub fn ensure(
        &self,
        name: &str,
        sources: &[PathBuf],
        logger: &dyn Logger,
        build: impl FnOnce() -> Result<String>,
    ) -> Result<Ensured> {
        let target = self.path_of(name);

        if !any_newer_than(sources, &target) {
            logger.debug(&format!("bundle {name} is fresh, reusing"));
            return Ok(Ensured {
                path: target,
                written: false,
            });
        }

        if !self.render_files {
            if !target.exists() {
                logger.warn(&format!(
                    "bundle {name} is missing and file rendering is disabled"
                ));
            }
            return Ok(Ensured {
                path: target,
                written: false,
            });
        }

        let content = build()?;
        self.write_atomic(&target, &content)?;
        logger.debug(&format!("wrote bundle {name} ({} bytes)", content.len()));
        Ok(Ensured {
            path: target,
            written: true,
        })
    }

    /// Write through a temp file in the bundle directory, then rename
    /// into place.
    fn write_atomic(&self, target: &Path, content: &str) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("creating temp file in {}", self.dir.display()))?;
        tmp.write_all(content.as_bytes())
            .with_context(|| format!("writing bundle {}", target.display()))?;
        tmp.persist(target)
            .map_err(|e| e.error)
            .with_context(|| format!("moving bundle into place at {}", target.display()))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NullLogger;
    use std::time::Duration;
    use tempfile::TempDir;

    fn store_in(root: &Path, render_files: bool) -> BundleStore {
        BundleStore::new(root, Path::new("cache/assets"), render_files).unwrap()
    }

    #[test]
    fn test_new_creates_bundle_directory() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path(), true);
        assert!(store.path_of("x.css").parent().unwrap().is_dir());
    }

    #[test]
    fn test_new_without_rendering_skips_directory() {
        let root = TempDir::new().unwrap();
        let _store = store_in(root.path(), false);
        assert!(!root.path().join("cache/assets").exists());
    }

    #[test]
    fn test_url_path() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path(), true);
        assert_eq!(
            store.url_path("minified_css_aa.css"),
            "/cache/assets/minified_css_aa.css"
        );
    }

    #[test]
    fn test_ensure_writes_missing_bundle() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("app.css");
        fs::write(&source, "body{}").unwrap();

        let store = store_in(root.path(), true);
        let ensured = store
            .ensure("bundle.css", &[source], &NullLogger, || {
                Ok("body{color:red}".to_string())
            })
            .unwrap();

        assert!(ensured.written);
        assert_eq!(
            fs::read_to_string(&ensured.path).unwrap(),
            "body{color:red}"
        );
    }

    #[test]
    fn test_ensure_reuses_fresh_bundle() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("app.css");
        fs::write(&source, "body{}").unwrap();

        let store = store_in(root.path(), true);
        store
            .ensure("bundle.css", &[source.clone()], &NullLogger, || {
                Ok("first".to_string())
            })
            .unwrap();

        let reused = store
            .ensure("bundle.css", &[source], &NullLogger, || {
                panic!("fresh bundle must not be rebuilt")
            })
            .unwrap();

        assert!(!reused.written);
        assert_eq!(fs::read_to_string(&reused.path).unwrap(), "first");
    }

    #[test]
    fn test_ensure_rebuilds_when_source_changes() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("app.css");
        fs::write(&source, "body{}").unwrap();

        let store = store_in(root.path(), true);
        store
            .ensure("bundle.css", &[source.clone()], &NullLogger, || {
                Ok("first".to_string())
            })
            .unwrap();

        std::thread::sleep(Duration::from_millis(20));
        fs::write(&source, "body{color:blue}").unwrap();

        let rebuilt = store
            .ensure("bundle.css", &[source], &NullLogger, || {
                Ok("second".to_string())
            })
            .unwrap();

        assert!(rebuilt.written);
        assert_eq!(fs::read_to_string(&rebuilt.path).unwrap(), "second");
    }

    #[test]
    fn test_ensure_without_rendering_never_writes() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("app.css");
        fs::write(&source, "body{}").unwrap();

        let store = store_in(root.path(), false);
        let ensured = store
            .ensure("bundle.css", &[source], &NullLogger, || {
                panic!("must not build with rendering disabled")
            })
            .unwrap();

        assert!(!ensured.written);
        assert!(!ensured.path.exists());
    }

    #[test]
    fn test_ensure_leaves_no_temp_files_behind() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("app.css");
        fs::write(&source, "body{}").unwrap();

        let store = store_in(root.path(), true);
        store
            .ensure("bundle.css", &[source], &NullLogger, || {
                Ok("content".to_string())
            })
            .unwrap();

        let entries: Vec<_> = fs::read_dir(root.path().join("cache/assets"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["bundle.css"]);
    }
}
