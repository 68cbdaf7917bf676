//! Href completion and cache-busting URL parameters.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters percent-encoded inside path segments: controls plus the
/// WHATWG path set and the query/fragment delimiters. Dots, dashes and
/// underscores stay readable so asset names survive intact.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Percent-encode a root-relative URL path, segment by segment.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Complete a root-relative asset path into the final href.
///
/// `base_path` is empty for apps served at the domain root, a
/// root-relative prefix (`/sub`) for apps in a subdirectory, or an
/// absolute `http(s)` URL when assets live on another host.
pub fn complete_href(base_path: &str, url_path: &str) -> String {
    let encoded = encode_path(url_path);
    let rooted = if encoded.starts_with('/') {
        encoded
    } else {
        format!("/{encoded}")
    };
    if base_path.is_empty() {
        rooted
    } else {
        format!("{}{rooted}", base_path.trim_end_matches('/'))
    }
}

/// Append the cache-busting parameter, picking `?` or `&` by whether the
/// href already carries a query string.
pub fn href_with_imprint(href: &str, imprint: &str) -> String {
    let separator = if href.contains('?') { '&' } else { '?' };
    format!("{href}{separator}v={imprint}")
}

// ============================================================================
// Tests
// ============================================================================
