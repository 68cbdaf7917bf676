//! File imprints: the cache-busting value appended to asset URLs.
//!
//! An imprint identifies the served file version. Two modes exist,
//! chosen in configuration: modification-time stamps (cheap, default)
//! and content fingerprints (stable across touch-without-change).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::mtime::get_mtime;
use crate::utils::{date, hash};

/// How file identity is derived for URL imprints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileCheck {
    /// Modification time, formatted `YYYY-MM-DD_HH-MM-SS` (UTC).
    #[default]
    #[serde(rename = "mtime")]
    ModTime,
    /// 8-char hex prefix of the content hash.
    #[serde(rename = "content")]
    Content,
}

/// Compute the imprint of a file.
///
/// Returns `None` when the file cannot be read; the caller emits the URL
/// without a version parameter in that case.
pub fn imprint(path: &Path, check: FileCheck) -> Option<String> {
    match check {
        FileCheck::ModTime => get_mtime(path).map(date::format_system_time),
        FileCheck::Content => content_imprint(path),
    }
}

fn content_imprint(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let reader = BufReader::with_capacity(64 * 1024, file);
    let digest = hash::compute_reader(reader).ok()?;
    Some(hash::short_hex(&digest))
}

// ============================================================================
// Imprint Cache
// ============================================================================

/// Thread-safe imprint memo scoped to one bundler instance.
///
/// A page render references the same bundle and source files repeatedly;
/// the cache keeps each stat/hash to one per file. Instance-scoped on
/// purpose: embedders that want per-request imprints create a fresh
/// bundler, long-running ones keep it and invalidate on writes.
#[derive(Debug, Default)]
pub struct ImprintCache {
    entries: DashMap<PathBuf, String>,
}

impl ImprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the imprint, computing and memoizing on miss.
    pub fn get_or_compute(&self, path: &Path, check: FileCheck) -> Option<String> {
        if let Some(hit) = self.entries.get(path) {
            return Some(hit.clone());
        }
        let value = imprint(path, check)?;
        self.entries.insert(path.to_path_buf(), value.clone());
        Some(value)
    }

    /// Drop the memo for one file (after rewriting it).
    pub fn invalidate(&self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drop all memos.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
