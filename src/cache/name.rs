//! Deterministic bundle file naming.

use crate::utils::hash;

/// Delimiter between source paths in the name key. Declared paths are
/// root-relative URLs, which never contain a comma.
const PATH_DELIMITER: &str = ",";

/// Derive the cache file name for an ordered list of source paths.
///
/// The name is `{minified|rendered}_{ext}_{hash}.{ext}`, where the hash
/// covers the delimiter-joined path list plus the minify flag. Identical
/// inputs always produce the identical name, so a previously written
/// bundle is found again without recomputation. The key is path-based,
/// not content-based; content staleness is handled by the store's
/// mtime check, not by the name.
pub fn bundle_file_name<S: AsRef<str>>(paths: &[S], minify: bool, extension: &str) -> String {
    let joined = paths
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PATH_DELIMITER);
    let key = format!("{joined}_{minify}");
    let prefix = if minify { "minified" } else { "rendered" };
    format!("{prefix}_{extension}_{}.{extension}", hash::fingerprint(&key))
}

// ============================================================================
// Tests
// ============================================================================
