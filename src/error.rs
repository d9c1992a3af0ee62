//! Error types for pressclip.
//!
//! Fetch, IO and serialization failures are hard errors. Missing optional
//! signals during extraction (no subtitle, no readability output, ...) are
//! not errors; they degrade to empty values and lower confidence instead.

/// Error type for fetch and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input URL is not a valid http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Network or HTTP failure while fetching a page.
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Structural failure while parsing or extracting from a document.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// JSON serialization failure at the output boundary.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem failure while persisting results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fetch and extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
