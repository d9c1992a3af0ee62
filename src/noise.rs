//! Noise filter.
//!
//! Single pass over the parsed tree that removes chrome and boilerplate
//! before candidate scoring: scripts and other non-rendered elements
//! unconditionally, then every element matching the removal predicate.
//!
//! The predicate is keyword-driven: a bag of words collected from the
//! element's naming attributes is scanned for noise terms, but an article
//! hint in the same bag overrides the noise match. That precedence keeps
//! containers like `article-comments-wrapper` out while `article-body`
//! survives.

use crate::dom::{self, Document, NodeRef, Selection};

/// Tags removed without evaluation (never rendered as content).
const STRIP_TAGS: &str = "script, style, noscript, iframe, svg, canvas";

/// Structural tags that are chrome by definition.
const CHROME_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// ARIA roles that mark chrome regions.
const CHROME_ROLES: &[&str] = &["navigation", "banner", "complementary", "contentinfo", "search"];

/// Attributes contributing to the keyword bag.
const NAMING_ATTRS: &[&str] = &[
    "class",
    "id",
    "name",
    "aria-label",
    "data-track-label",
    "data-component",
    "data-testid",
];

/// Terms associated with boilerplate UI regions.
pub const NOISE_KEYWORDS: &[&str] = &[
    "nav", "menu", "footer", "header", "subscribe", "metered", "paywall",
    "share", "social", "toolbar", "breadcrumbs", "breadcrumb", "cookie",
    "banner", "popup", "modal", "adv", "advert", "ads", "sponsor",
    "related", "recommend", "newsletter", "comment", "comments", "form-",
    "promo", "utility", "widget", "sidebar", "login", "signup", "consent",
    "gdpr", "tracking", "notification", "overlay", "player-controls",
    "gallery", "carousel", "slider", "tags", "taglist", "pagination",
];

/// Terms that override a noise match on the same element.
pub const ARTICLE_HINTS: &[&str] = &[
    "article", "story", "content", "body", "post", "entry", "main",
    "text", "read", "news", "detail",
];

/// Removal predicate for a single element.
///
/// True for chrome tags, chrome ARIA roles, and elements whose naming
/// attributes contain a noise keyword without an article hint.
#[must_use]
pub fn should_skip_element(node: &NodeRef) -> bool {
    let tag = dom::node_tag(node);
    if CHROME_TAGS.contains(&tag.as_str()) {
        return true;
    }

    if let Some(role) = dom::node_attr(node, "role") {
        if CHROME_ROLES.contains(&role.to_lowercase().as_str()) {
            return true;
        }
    }

    let mut bag: Vec<String> = Vec::new();
    for attr in NAMING_ATTRS {
        if let Some(value) = dom::node_attr(node, attr) {
            let value = value.to_lowercase();
            if !value.trim().is_empty() {
                bag.push(value);
            }
        }
    }
    if bag.is_empty() {
        return false;
    }

    let joined = bag.join(" ");
    if NOISE_KEYWORDS.iter().any(|kw| joined.contains(kw)) {
        // Hint wins over noise on the same element.
        return !ARTICLE_HINTS.iter().any(|hint| joined.contains(hint));
    }
    false
}

/// Parse HTML into a noise-filtered document.
///
/// Non-rendered elements are stripped first, then every surviving element is
/// checked against [`should_skip_element`] and decomposed on a match.
/// Re-running the filter on its own output removes nothing further.
#[must_use]
pub fn prepare_content_doc(html: &str) -> Document {
    let doc = Document::from(html);

    let stripped = doc.select(STRIP_TAGS).nodes().to_vec();
    for node in stripped.into_iter().rev() {
        Selection::from(node).remove();
    }

    // Snapshot before mutation; elements detached with an ancestor are
    // no-ops when removed again.
    let elements = doc.select("*").nodes().to_vec();
    for node in elements.into_iter().rev() {
        if should_skip_element(&node) {
            Selection::from(node).remove();
        }
    }

    doc
}
