//! Character encoding detection and transcoding for fetched pages.
//!
//! The declared charset is taken from the Content-Type header when present,
//! otherwise from meta tags in the document head, defaulting to UTF-8.
//! Decoding is lossy: invalid sequences become replacement characters, never
//! errors.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

#[allow(clippy::expect_used)]
static CHARSET_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)charset\s*=\s*([^;\s]+)").expect("valid regex")
});

/// Charset label declared in a Content-Type header value, if any.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    CHARSET_HEADER_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_matches('"').to_string())
}

/// Detect the encoding of an HTML body.
///
/// Order: header hint, `<meta charset>` in the first 1024 bytes, UTF-8.
#[must_use]
pub fn detect_encoding(body: &[u8], header_charset: Option<&str>) -> &'static Encoding {
    if let Some(label) = header_charset {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return encoding;
        }
    }

    let head = &body[..body.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(cap) = CHARSET_META_RE.captures(&head_str).and_then(|c| c.get(1)) {
        if let Some(encoding) = Encoding::for_label(cap.as_str().as_bytes()) {
            return encoding;
        }
    }

    UTF_8
}

/// Decode an HTML body to UTF-8, lossily.
///
/// Returns the decoded text and the name of the encoding used.
#[must_use]
pub fn decode_body(body: &[u8], header_charset: Option<&str>) -> (String, &'static str) {
    let encoding = detect_encoding(body, header_charset);
    if encoding == UTF_8 {
        return (String::from_utf8_lossy(body).into_owned(), UTF_8.name());
    }
    let (decoded, used, _had_errors) = encoding.decode(body);
    (decoded.into_owned(), used.name())
}
