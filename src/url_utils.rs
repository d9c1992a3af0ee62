//! URL validation and resolution.
//!
//! Relative URLs in content and metadata are resolved against the final
//! (post-redirect) page URL. Resolution is best-effort: an unresolvable
//! input comes back unchanged rather than failing extraction.

use url::Url;

/// Check whether a string is an absolute http(s) URL, returning the parsed
/// form when it is.
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }
    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Check whether a string is acceptable CLI input: an absolute http(s) URL,
/// with the scheme optional.
#[must_use]
pub fn is_valid_url(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    if is_absolute_url(s).0 {
        return true;
    }
    // Scheme-less input like "example.com/page"
    !s.starts_with("http") && is_absolute_url(&format!("https://{s}")).0
}

/// Resolve a possibly-relative URL against a base.
///
/// Returns the input unchanged when it is already absolute, uses a special
/// scheme (`data:`, `mailto:`, ...), or cannot be resolved.
#[must_use]
pub fn create_absolute_url(url_str: &str, base: Option<&Url>) -> String {
    let url_str = url_str.trim();
    if url_str.is_empty() {
        return String::new();
    }

    if url_str.starts_with("data:")
        || url_str.starts_with("javascript:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    if is_absolute_url(url_str).0 {
        return url_str.to_string();
    }

    match base.and_then(|b| b.join(url_str).ok()) {
        Some(resolved) => resolved.to_string(),
        None => url_str.to_string(),
    }
}

/// Host of a URL string, empty when unparseable.
#[must_use]
pub fn host_of(url_str: &str) -> String {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
        .unwrap_or_default()
}
