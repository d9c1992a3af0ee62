//! Candidate block scoring and selection.
//!
//! Enumerates structural elements in the noise-filtered tree, scores each as
//! a main-content candidate and ranks them. A separate schema probe checks a
//! fixed list of semantic selectors and, when one hits, its block is placed
//! ahead of the ranked list.

use crate::dom::{self, Document, NodeRef, Selection};
use crate::noise::should_skip_element;

/// Minimum words for an element to become a candidate at all.
const MIN_CANDIDATE_WORDS: usize = 40;

/// Maximum candidates kept after ranking.
const MAX_CANDIDATES: usize = 10;

/// Ancestor levels included in a DOM path.
const MAX_PATH_DEPTH: usize = 5;

/// Preview length in characters before ellipsizing.
const PREVIEW_CHARS: usize = 280;

/// Semantic probes checked in order by the schema strategy.
const SCHEMA_SELECTORS: &[&str] = &[
    r#"[itemprop="articleBody"]"#,
    r#"[itemtype*="Article"]"#,
    "article",
    r#"[role="main"]"#,
    ".article-body",
    ".story__content",
    ".article__content",
];

/// A structural element judged as a possible main-content container.
#[derive(Debug, Clone)]
pub struct CandidateBlock {
    /// Identifier (`block_N` by enumeration order, `schema_N` by probe index).
    pub id: String,
    /// Tag name.
    pub tag: String,
    /// Class names on the element.
    pub classes: Vec<String>,
    /// Leaf-to-ancestor DOM path.
    pub dom_path: String,
    /// First h1–h3 heading text inside the element.
    pub heading: String,
    /// Non-empty paragraph texts inside the element.
    pub paragraphs: Vec<String>,
    /// Raw HTML snapshot of the element.
    pub html: String,
    /// Text preview, at most 280 characters, ellipsized.
    pub text_preview: String,
    /// Word count of the element's visible text.
    pub word_count: usize,
    /// Fraction of the visible text inside anchors, 0.0–1.0.
    pub link_density: f64,
    /// Heuristic score.
    pub score: f64,
}

/// Score a block from its raw signals.
///
/// words × heading bonus × paragraph bonus × link penalty; a heading is
/// worth 25%, each paragraph up to five adds 10%, and link density eats up
/// to 90% of the total.
#[must_use]
pub fn score_block(
    word_count: usize,
    link_density: f64,
    paragraph_count: usize,
    heading: &str,
) -> f64 {
    let heading_bonus = if heading.is_empty() { 1.0 } else { 1.25 };
    let paragraph_bonus = 1.0 + 0.1 * paragraph_count.min(5) as f64;
    let link_penalty = 1.0 - link_density.min(0.9);
    word_count as f64 * heading_bonus * paragraph_bonus * link_penalty
}

/// Compute the DOM path of an element: up to five levels of
/// `tag[#id | .class1.class2 | ""][same-tag-sibling-index]`, leaf first,
/// joined with `" > "`.
#[must_use]
pub fn compute_dom_path(node: &NodeRef) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(*node);
    while let Some(n) = current {
        if parts.len() >= MAX_PATH_DEPTH || !n.is_element() {
            break;
        }
        let mut descriptor = dom::node_tag(&n);
        if let Some(id) = dom::node_attr(&n, "id").filter(|id| !id.is_empty()) {
            descriptor.push('#');
            descriptor.push_str(&id);
        } else {
            let classes = dom::class_list(&n);
            if !classes.is_empty() {
                descriptor.push('.');
                descriptor.push_str(&classes[..classes.len().min(2)].join("."));
            }
        }
        descriptor.push_str(&format!("[{}]", dom::same_tag_sibling_index(&n)));
        parts.push(descriptor);
        current = dom::parent_element(&n);
    }
    parts.join(" > ")
}

/// Build the candidate record for one element.
///
/// Returns `None` when the element's visible text is under 40 words.
#[must_use]
pub fn build_block_info(node: &NodeRef, id: &str) -> Option<CandidateBlock> {
    let sel = Selection::from(*node);
    let text = dom::text_of(&sel);
    let word_count = text.split_whitespace().count();
    if word_count < MIN_CANDIDATE_WORDS {
        return None;
    }

    let link_text = sel
        .select("a")
        .nodes()
        .iter()
        .map(dom::node_text)
        .collect::<Vec<_>>()
        .join(" ");
    let link_density = link_text.chars().count() as f64 / text.chars().count().max(1) as f64;

    let paragraphs: Vec<String> = sel
        .select("p")
        .nodes()
        .iter()
        .map(dom::node_text)
        .filter(|p| !p.is_empty())
        .collect();

    let heading = sel
        .select("h1, h2, h3")
        .nodes()
        .first()
        .map(dom::node_text)
        .unwrap_or_default();

    let score = score_block(word_count, link_density, paragraphs.len(), &heading);

    let preview: String = text.chars().take(PREVIEW_CHARS).collect();
    let text_preview = if text.chars().count() > PREVIEW_CHARS {
        format!("{preview}...")
    } else {
        preview
    };

    Some(CandidateBlock {
        id: id.to_string(),
        tag: dom::node_tag(node),
        classes: dom::class_list(node),
        dom_path: compute_dom_path(node),
        heading,
        paragraphs,
        html: dom::outer_html(node),
        text_preview,
        word_count,
        link_density: round3(link_density),
        score: round2(score),
    })
}

/// Enumerate and rank candidate blocks in the noise-filtered document.
///
/// Sort is stable and descending by score, so ties keep document order.
#[must_use]
pub fn extract_content_blocks(doc: &Document) -> Vec<CandidateBlock> {
    let mut candidates: Vec<CandidateBlock> = Vec::new();
    for (idx, node) in doc
        .select("article, main, section, div")
        .nodes()
        .iter()
        .enumerate()
    {
        // The filter already ran, but enumeration must not trust it.
        if should_skip_element(node) {
            continue;
        }
        if let Some(block) = build_block_info(node, &format!("block_{idx}")) {
            candidates.push(block);
        }
    }
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Probe the schema selectors in order; the first non-noise match that
/// yields a valid block is returned.
#[must_use]
pub fn extract_schema_block(doc: &Document) -> Option<CandidateBlock> {
    for (idx, selector) in SCHEMA_SELECTORS.iter().enumerate() {
        if let Some(node) = dom::select_first(doc, selector) {
            if should_skip_element(&node) {
                continue;
            }
            if let Some(block) = build_block_info(&node, &format!("schema_{idx}")) {
                return Some(block);
            }
        }
    }
    None
}

/// Rank candidates and seat the schema block.
///
/// The schema block is prepended to the score-sorted list and the result is
/// truncated to ten WITHOUT re-sorting: the schema pick keeps position 0 and
/// thereby wins arbitration regardless of its numeric score. This position
/// dependency is intentional and must not be replaced by a score comparison.
#[must_use]
pub fn ranked_candidates(doc: &Document) -> Vec<CandidateBlock> {
    let mut blocks = extract_content_blocks(doc);
    if let Some(schema) = extract_schema_block(doc) {
        blocks.insert(0, schema);
    }
    blocks.truncate(MAX_CANDIDATES);
    blocks
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn short_blocks_are_not_candidates() {
        let doc = Document::from("<html><body><div><p>Too short.</p></div></body></html>");
        let node = dom::select_first(&doc, "div").unwrap();
        assert!(build_block_info(&node, "block_0").is_none());
    }

    #[test]
    fn block_info_captures_signals() {
        let html = format!(
            "<html><body><div id='main' class='story wrap'><h2>Heading</h2>\
             <p>{}</p><p>{}</p></div></body></html>",
            words(30),
            words(30)
        );
        let doc = Document::from(html);
        let node = dom::select_first(&doc, "#main").unwrap();
        let block = build_block_info(&node, "block_0").unwrap();
        assert_eq!(block.tag, "div");
        assert_eq!(block.classes, vec!["story", "wrap"]);
        assert_eq!(block.heading, "Heading");
        assert_eq!(block.paragraphs.len(), 2);
        assert!(block.word_count >= 60);
        assert!(block.link_density < 0.05);
        assert!(block.dom_path.starts_with("div#main[0]"));
    }

    #[test]
    fn preview_is_ellipsized_at_280_chars() {
        let html = format!("<html><body><div><p>{}</p></div></body></html>", words(120));
        let doc = Document::from(html);
        let node = dom::select_first(&doc, "div").unwrap();
        let block = build_block_info(&node, "block_0").unwrap();
        assert!(block.text_preview.ends_with("..."));
        assert_eq!(block.text_preview.chars().count(), 283);
    }

    #[test]
    fn heading_bonus_and_paragraph_bonus() {
        assert_eq!(score_block(100, 0.0, 0, ""), 100.0);
        assert_eq!(score_block(100, 0.0, 0, "t"), 125.0);
        assert_eq!(score_block(100, 0.0, 3, ""), 130.0);
        // Paragraph bonus caps at five paragraphs.
        assert_eq!(score_block(100, 0.0, 9, ""), 150.0);
    }

    #[test]
    fn link_density_never_raises_score() {
        let base = score_block(200, 0.0, 2, "h");
        let denser = score_block(200, 0.3, 2, "h");
        let densest = score_block(200, 0.95, 2, "h");
        assert!(denser < base);
        assert!(densest < denser);
        // Penalty floor: density above 0.9 is clamped.
        assert_eq!(score_block(200, 0.9, 2, "h"), score_block(200, 1.0, 2, "h"));
    }

    #[test]
    fn dom_path_is_leaf_first_and_depth_limited() {
        let doc = Document::from(
            "<html><body><div class='a b c'><section><article id='x'>t</article>\
             </section></div></body></html>",
        );
        let node = dom::select_first(&doc, "#x").unwrap();
        let path = compute_dom_path(&node);
        let parts: Vec<&str> = path.split(" > ").collect();
        assert_eq!(parts[0], "article#x[0]");
        assert_eq!(parts[1], "section[0]");
        // Only the first two classes appear.
        assert_eq!(parts[2], "div.a.b[0]");
        assert!(parts.len() <= 5);
    }

    #[test]
    fn ranking_is_descending_and_capped() {
        let mut body = String::new();
        for i in 0..14 {
            let extra = if i % 2 == 0 { "<h2>H</h2>" } else { "" };
            body.push_str(&format!("<section>{extra}<p>{}</p></section>", words(45 + i)));
        }
        let doc = Document::from(format!("<html><body>{body}</body></html>"));
        let blocks = ranked_candidates(&doc);
        assert!(blocks.len() <= 10);
        for pair in blocks.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn schema_block_takes_position_zero() {
        let html = format!(
            "<html><body>\
             <div class='huge'><h1>Big</h1><p>{}</p></div>\
             <article><p>{}</p></article>\
             </body></html>",
            words(400),
            words(50)
        );
        let doc = Document::from(html);
        let blocks = ranked_candidates(&doc);
        // The <article> probe wins position 0 even though the div outscores it.
        assert!(blocks[0].id.starts_with("schema_"));
        assert_eq!(blocks[0].tag, "article");
        assert!(blocks[1].score > blocks[0].score);
    }

    #[test]
    fn schema_probe_skips_noisy_matches() {
        let html = format!(
            "<html><body><article class='promo carousel'><p>{}</p></article>\
             <div class='article-body'><p>{}</p></div></body></html>",
            words(60),
            words(60)
        );
        // The noisy <article> survives filtering only if fed directly.
        let doc = Document::from(html);
        let schema = extract_schema_block(&doc).unwrap();
        assert_eq!(schema.classes, vec!["article-body"]);
    }
}
