//! Link derivation.
//!
//! In-article links come from the chosen content fragment; related links are
//! the remaining page anchors, minus URLs the article already carries and
//! minus anchors with no text. All targets are resolved to absolute URLs and
//! flagged external when their host differs from the page host.

use std::collections::HashSet;

use url::Url;

use crate::dom::{self, Document};
use crate::record::Link;
use crate::url_utils::{create_absolute_url, host_of};

/// In-article link cap.
pub const MAX_ARTICLE_LINKS: usize = 40;

/// Related-link cap.
const MAX_RELATED_LINKS: usize = 15;

/// Page anchors scanned when collecting related links.
const RELATED_SCAN_LIMIT: usize = 60;

/// Collect anchors with an `href` from a document, up to `limit`.
#[must_use]
pub fn extract_links(doc: &Document, base: Option<&Url>, limit: usize) -> Vec<Link> {
    let base_host = base.and_then(|b| b.host_str()).unwrap_or_default();
    let mut links = Vec::new();
    for node in doc.select("a[href]").nodes() {
        let Some(href) = dom::node_attr(node, "href") else {
            continue;
        };
        let absolute = create_absolute_url(&href, base);
        let target_host = host_of(&absolute);
        links.push(Link {
            text: dom::node_text(node),
            href: absolute,
            is_external: target_host != base_host,
            title: dom::node_attr(node, "title").unwrap_or_default(),
        });
        if links.len() >= limit {
            break;
        }
    }
    links
}

/// Links inside the chosen content fragment, capped at 40.
#[must_use]
pub fn extract_links_from_fragment(fragment_html: Option<&str>, base: Option<&Url>) -> Vec<Link> {
    match fragment_html {
        Some(html) => extract_links(&Document::from(html.to_string()), base, MAX_ARTICLE_LINKS),
        None => Vec::new(),
    }
}

/// Up to 15 page links not already among the article's own links, skipping
/// anchors with empty text.
#[must_use]
pub fn build_related_links(doc: &Document, base: Option<&Url>, primary: &[Link]) -> Vec<Link> {
    let seen: HashSet<&str> = primary.iter().map(|l| l.href.as_str()).collect();
    let mut related = Vec::new();
    for link in extract_links(doc, base, RELATED_SCAN_LIMIT) {
        if link.text.is_empty() || seen.contains(link.href.as_str()) {
            continue;
        }
        related.push(link);
        if related.len() >= MAX_RELATED_LINKS {
            break;
        }
    }
    related
}
