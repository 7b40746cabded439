//! URL detection

use url::Url;

/// Check whether `path` is an absolute http(s)-style URL
///
/// The input must start with the literal `http` prefix and parse as a URL.
/// Parse failures are reported as `false`.
pub fn is_url(path: Option<&str>) -> bool {
    match path {
        Some(p) if p.starts_with("http") => Url::parse(p).is_ok(),
        _ => false,
    }
}
