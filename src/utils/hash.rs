//! Unified content hashing using BLAKE3.
//!
//! Hash output lands in file names and URLs, so it must be stable across
//! processes, platforms and releases. BLAKE3 gives that plus streaming
//! support for large files.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let h = hash::compute("some content"); // -> [u8; 32]
//! let fp = hash::fingerprint("some content"); // -> "a1b2c3d4e5f60718"
//! ```

use std::io::{self, Read};

/// Compute the BLAKE3 hash of in-memory data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> [u8; 32] {
    *blake3::hash(data.as_ref()).as_bytes()
}

/// Compute the hash from a reader (streaming, for large files).
pub fn compute_reader(mut reader: impl Read) -> io::Result<[u8; 32]> {
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(*hasher.finalize().as_bytes())
}

/// Compute hash and return a 16-char hex fingerprint.
///
/// Used for cache file names (e.g. `minified_css_a1b2c3d4e5f60718.css`).
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    hex::encode(&compute(value)[..8])
}

/// Shortened 8-char hex form of a full hash, for URL parameters.
#[inline]
pub fn short_hex(hash: &[u8; 32]) -> String {
    hex::encode(&hash[..4])
}

// ============================================================================
// Tests
// ============================================================================
