//! Readability strategy.
//!
//! Independent full-page summarizer wrapped as a competing extraction
//! strategy. Uses `dom_smoothie` behind the `readability` feature; any
//! failure or empty output yields `None` rather than an error, so the
//! arbiter can fall through to the heuristic candidates.

use crate::dom::{self, Document};
use crate::record::ContentSource;

/// Reading speed used for the time estimate.
const WORDS_PER_MINUTE: f64 = 200.0;

/// Output of the readability strategy.
#[derive(Debug, Clone)]
pub struct ReadabilityContent {
    /// Strategy tag, always [`ContentSource::Readability`].
    pub source: ContentSource,
    /// Best-effort document title.
    pub title: String,
    /// HTML fragment of the readable region.
    pub summary_html: String,
    /// Paragraph texts joined by blank lines.
    pub text: String,
    /// Non-empty paragraph/list-item texts.
    pub paragraphs: Vec<String>,
    /// Word count of `text`.
    pub word_count: usize,
    /// Reading time in minutes, 2 decimals, floor 0.1.
    pub reading_time_minutes: f64,
    /// min(0.95, 0.6 + words/1500)
    pub confidence: f64,
}

/// Estimated reading time for a word count, in minutes.
#[must_use]
pub fn estimate_reading_time(word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    let minutes = (word_count as f64 / WORDS_PER_MINUTE).max(0.1);
    (minutes * 100.0).round() / 100.0
}

/// Wrap a summarizer result (title + HTML fragment) into strategy output.
///
/// Returns `None` when the fragment contains no paragraph text.
#[must_use]
pub fn wrap_summary(title: &str, summary_html: &str) -> Option<ReadabilityContent> {
    let fragment = Document::from(summary_html);
    let paragraphs: Vec<String> = fragment
        .select("p, li")
        .nodes()
        .iter()
        .map(dom::node_text)
        .filter(|p| !p.is_empty())
        .collect();

    let text = paragraphs.join("\n\n").trim().to_string();
    if text.is_empty() {
        return None;
    }

    let word_count = text.split_whitespace().count();
    Some(ReadabilityContent {
        source: ContentSource::Readability,
        title: dom::clean_text(title),
        summary_html: summary_html.to_string(),
        text,
        paragraphs,
        word_count,
        reading_time_minutes: estimate_reading_time(word_count),
        confidence: (0.6 + word_count as f64 / 1500.0).min(0.95),
    })
}

/// Run the readability summarizer over the raw HTML.
///
/// Failures are silent: an unusable document simply yields `None`.
#[cfg(feature = "readability")]
#[must_use]
pub fn extract_main_content(html: &str, base_url: &str) -> Option<ReadabilityContent> {
    use dom_smoothie::Readability;

    let url = if base_url.is_empty() { None } else { Some(base_url) };
    let mut reader = Readability::new(html, url, None).ok()?;
    let article = reader.parse().ok()?;
    wrap_summary(&article.title, &article.content)
}

/// Stub when the `readability` feature is disabled: no output, never an error.
#[cfg(not(feature = "readability"))]
#[must_use]
pub fn extract_main_content(_html: &str, _base_url: &str) -> Option<ReadabilityContent> {
    None
}
