//! Content arbitration.
//!
//! Chooses the final main content among the strategies with a fixed-order
//! waterfall, not a score comparison: a readability result over the quality
//! bar always wins, then the top-ranked candidate block, then whatever
//! readability produced, then the empty fallback. Absence of a signal at any
//! tier degrades to the next — nothing here raises.

use crate::candidates::CandidateBlock;
use crate::dom::clean_text;
use crate::readability::{estimate_reading_time, ReadabilityContent};
use crate::record::ContentSource;

/// Words the readability output needs to win outright.
const READABILITY_MIN_WORDS: usize = 80;

/// The arbitration winner.
#[derive(Debug, Clone, Default)]
pub struct MainContent {
    /// Strategy that produced this content.
    pub source: ContentSource,
    /// Content title (may be the page-level fallback).
    pub title: String,
    /// Body text.
    pub text: String,
    /// Ordered paragraphs.
    pub paragraphs: Vec<String>,
    /// Word count.
    pub word_count: usize,
    /// Reading time, minutes.
    pub reading_time_minutes: f64,
    /// Extraction confidence, 0.0–1.0.
    pub confidence: f64,
    /// HTML fragment of the chosen region, when available.
    pub html: Option<String>,
    /// Winning candidate score (heuristic tier only).
    pub score: Option<f64>,
    /// Winning candidate DOM path (heuristic tier only).
    pub dom_path: Option<String>,
}

impl MainContent {
    fn from_readability(content: ReadabilityContent, fallback_title: &str) -> Self {
        let title = if content.title.is_empty() {
            fallback_title.to_string()
        } else {
            content.title
        };
        Self {
            source: ContentSource::Readability,
            title,
            text: content.text,
            paragraphs: content.paragraphs,
            word_count: content.word_count,
            reading_time_minutes: content.reading_time_minutes,
            confidence: content.confidence,
            html: Some(content.summary_html),
            score: None,
            dom_path: None,
        }
    }

    fn from_block(block: &CandidateBlock, fallback_title: &str) -> Self {
        let text = {
            let joined = block.paragraphs.join("\n\n");
            let joined = joined.trim();
            if joined.is_empty() {
                block.text_preview.clone()
            } else {
                joined.to_string()
            }
        };
        let word_count = if block.word_count > 0 {
            block.word_count
        } else {
            text.split_whitespace().count()
        };
        let title = if block.heading.is_empty() {
            fallback_title.to_string()
        } else {
            block.heading.clone()
        };
        Self {
            source: ContentSource::Heuristic,
            title,
            text,
            paragraphs: block.paragraphs.clone(),
            word_count,
            reading_time_minutes: estimate_reading_time(word_count),
            confidence: (0.4 + (block.score / 1500.0).min(0.45)).min(0.85),
            html: Some(block.html.clone()),
            score: Some(block.score),
            dom_path: Some(block.dom_path.clone()),
        }
    }

    fn empty(fallback_title: &str) -> Self {
        Self {
            source: ContentSource::Unknown,
            title: fallback_title.to_string(),
            confidence: 0.2,
            ..Self::default()
        }
    }

    /// First paragraph, used as the excerpt fallback.
    #[must_use]
    pub fn first_paragraph(&self) -> String {
        self.paragraphs.first().map(|p| clean_text(p)).unwrap_or_default()
    }
}

/// Pick the main content from the strategies' outputs.
///
/// Tier 1: readability with at least 80 words. Tier 2: the first ranked
/// candidate block (which is the schema pick when one was seated). Tier 3:
/// a readability result below the bar when no block exists, else the empty
/// unknown-source object with confidence 0.2.
#[must_use]
pub fn choose_main_content(
    readability: Option<ReadabilityContent>,
    blocks: &[CandidateBlock],
    fallback_title: &str,
) -> MainContent {
    if let Some(content) = &readability {
        if content.word_count >= READABILITY_MIN_WORDS {
            return MainContent::from_readability(content.clone(), fallback_title);
        }
    }
    if let Some(best) = blocks.first() {
        return MainContent::from_block(best, fallback_title);
    }
    match readability {
        Some(content) => MainContent::from_readability(content, fallback_title),
        None => MainContent::empty(fallback_title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readability::wrap_summary;

    fn block(score: f64, words: usize) -> CandidateBlock {
        CandidateBlock {
            id: "block_0".to_string(),
            tag: "div".to_string(),
            classes: vec![],
            dom_path: "div[0]".to_string(),
            heading: "Block heading".to_string(),
            paragraphs: vec!["First para.".to_string(), "Second para.".to_string()],
            html: "<div><p>First para.</p><p>Second para.</p></div>".to_string(),
            text_preview: "First para. Second para.".to_string(),
            word_count: words,
            link_density: 0.0,
            score,
        }
    }

    fn readability(words: usize) -> ReadabilityContent {
        let text: String = (0..words).map(|i| format!("w{i} ")).collect();
        wrap_summary("Readable title", &format!("<p>{text}</p>")).unwrap()
    }

    #[test]
    fn readability_wins_over_any_heuristic_score() {
        let chosen = choose_main_content(Some(readability(120)), &[block(99_999.0, 500)], "fb");
        assert_eq!(chosen.source, ContentSource::Readability);
        assert_eq!(chosen.title, "Readable title");
    }

    #[test]
    fn short_readability_defers_to_blocks() {
        let chosen = choose_main_content(Some(readability(40)), &[block(300.0, 90)], "fb");
        assert_eq!(chosen.source, ContentSource::Heuristic);
        assert_eq!(chosen.title, "Block heading");
        assert_eq!(chosen.text, "First para.\n\nSecond para.");
        assert_eq!(chosen.score, Some(300.0));
    }

    #[test]
    fn heuristic_confidence_is_bounded() {
        let low = choose_main_content(None, &[block(0.0, 90)], "fb");
        assert!((low.confidence - 0.4).abs() < 1e-9);
        let high = choose_main_content(None, &[block(1_000_000.0, 90)], "fb");
        assert!((high.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn short_readability_used_when_no_blocks() {
        let chosen = choose_main_content(Some(readability(40)), &[], "fb");
        assert_eq!(chosen.source, ContentSource::Readability);
        assert_eq!(chosen.word_count, 40);
    }

    #[test]
    fn empty_fallback_has_fixed_confidence() {
        let chosen = choose_main_content(None, &[], "Page title");
        assert_eq!(chosen.source, ContentSource::Unknown);
        assert_eq!(chosen.title, "Page title");
        assert_eq!(chosen.confidence, 0.2);
        assert!(chosen.text.is_empty());
        assert_eq!(chosen.word_count, 0);
    }
}
