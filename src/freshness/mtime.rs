//! Mtime-based freshness detection for bundle files.
//!
//! Bundles are rebuilt when any of their sources is newer than the
//! written bundle. Timestamps are reliable here because the bundle file
//! is always written after its sources were last read.

use std::path::Path;
use std::time::SystemTime;

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Check if file A is newer than file B
///
/// Returns `true` if A exists and is newer than B
/// Returns `false` if either file doesn't exist or times can't be compared
pub fn is_newer_than(a: &Path, b: &Path) -> bool {
    let (Some(a_time), Some(b_time)) = (get_mtime(a), get_mtime(b)) else {
        return false;
    };
    a_time > b_time
}

/// Check if any source is newer than the target.
///
/// An unreadable source counts as newer: the subsequent rebuild surfaces
/// the real IO error instead of silently serving a stale bundle.
pub fn any_newer_than<P: AsRef<Path>>(sources: &[P], target: &Path) -> bool {
    let Some(target_time) = get_mtime(target) else {
        return true;
    };
    sources.iter().any(|source| {
        get_mtime(source.as_ref()).is_none_or(|source_time| source_time > target_time)
    })
}
