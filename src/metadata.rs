//! Article metadata derivation.
//!
//! Meta tags come from the unfiltered page; DOM fallbacks (subtitle, byline
//! elements, `<time>` tags) run on the noise-filtered page. All lookups are
//! first-non-empty-wins with documented fallback keys, and every field
//! degrades to empty/absent rather than failing.

use std::collections::BTreeMap;

use crate::dom::{self, Document, Selection};

/// Flat map of page meta tags.
pub type MetaMap = BTreeMap<String, String>;

/// Byline texts that are labels, not names.
const BYLINE_STOPWORDS: &[&str] = &["di", "by"];

/// Derived article metadata before assembly.
#[derive(Debug, Clone, Default)]
pub struct ArticleMetadata {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub section: Option<String>,
    pub excerpt: Option<String>,
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
}

/// Collect the page's meta tags into a flat map.
///
/// `name` wins over `property`; a bare `charset` attribute is stored under
/// `"charset"`. Later duplicates overwrite earlier ones.
#[must_use]
pub fn extract_meta(doc: &Document) -> MetaMap {
    let mut meta = MetaMap::new();
    for node in doc.select("meta").nodes() {
        let tag = Selection::from(*node);
        let content = tag.attr("content").map(|v| v.to_string());
        if let (Some(name), Some(content)) = (tag.attr("name"), content.as_ref()) {
            meta.insert(name.to_string(), content.clone());
        } else if let (Some(property), Some(content)) = (tag.attr("property"), content.as_ref()) {
            meta.insert(property.to_string(), content.clone());
        } else if let Some(charset) = tag.attr("charset") {
            meta.insert("charset".to_string(), charset.to_string());
        }
    }
    meta
}

/// Derive the article metadata from the meta map and the filtered page.
#[must_use]
pub fn extract_article_metadata(doc: &Document, meta: &MetaMap) -> ArticleMetadata {
    let (published_at, updated_at) = find_dates(doc, meta);
    ArticleMetadata {
        title: first_meta(meta, &["og:title", "twitter:title", "title"]),
        subtitle: find_subtitle(doc),
        authors: find_authors(doc, meta),
        published_at,
        updated_at,
        section: first_meta(meta, &["article:section", "category-label"]),
        excerpt: first_meta(meta, &["description", "og:description"]),
        keywords: split_meta_values(first_meta(meta, &["news_keywords", "keywords"]).as_deref()),
        tags: split_meta_values(first_meta(meta, &["article:tag", "parsely-tags"]).as_deref()),
    }
}

/// First non-empty meta value among `keys`, in priority order.
#[must_use]
pub fn first_meta(meta: &MetaMap, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| meta.get(*k))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Split a comma-separated meta value into trimmed, non-empty items.
#[must_use]
pub fn split_meta_values(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Subtitle: a heading/paragraph with a "subtitle" class, else the common
/// standfirst selectors.
fn find_subtitle(doc: &Document) -> Option<String> {
    for node in doc.select("h2, p").nodes() {
        if let Some(class) = dom::node_attr(node, "class") {
            if class.to_lowercase().contains("subtitle") {
                let text = dom::node_text(node);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    dom::select_first(
        doc,
        r#"[data-testid*="subtitle"], .article-subtitle, .story__summary, .lead"#,
    )
    .map(|node| dom::node_text(&node))
    .filter(|text| !text.is_empty())
}

/// Authors from meta tags (comma-split), else byline-like DOM elements,
/// de-duplicated preserving first-seen order.
fn find_authors(doc: &Document, meta: &MetaMap) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();
    for key in ["author", "article:author", "parsely-author"] {
        if let Some(value) = meta.get(key) {
            authors.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string),
            );
        }
    }
    if !authors.is_empty() {
        return dedup_preserving_order(authors);
    }

    for node in doc
        .select(r#"[itemprop="author"], .author-name, .byline, [rel="author"]"#)
        .nodes()
    {
        let text = dom::node_text(node);
        if !text.is_empty() && !BYLINE_STOPWORDS.contains(&text.to_lowercase().as_str()) {
            authors.push(text);
        }
    }
    dedup_preserving_order(authors)
}

/// Published/updated timestamps: meta tags first, then `<time>` elements.
/// Values are passed through verbatim, never parsed.
fn find_dates(doc: &Document, meta: &MetaMap) -> (Option<String>, Option<String>) {
    let mut published = first_meta(meta, &["article:published_time", "pubdate", "parsely-pub-date"]);
    let mut updated = first_meta(meta, &["article:modified_time", "last-modified"]);

    if published.is_none() {
        if let Some(node) = dom::select_first(doc, "time[datetime]") {
            published = dom::node_attr(&node, "datetime")
                .filter(|v| !v.is_empty())
                .or_else(|| Some(dom::node_text(&node)))
                .filter(|v| !v.is_empty());
        }
    }
    if updated.is_none() {
        if let Some(node) = dom::select_first(doc, r#"time[itemprop="dateModified"]"#) {
            updated = dom::node_attr(&node, "datetime")
                .filter(|v| !v.is_empty())
                .or_else(|| Some(dom::node_text(&node)))
                .filter(|v| !v.is_empty());
        }
    }
    (published, updated)
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Document {
        Document::from(html.to_string())
    }

    #[test]
    fn meta_map_prefers_name_then_property() {
        let d = doc(
            r#"<html><head>
            <meta name="description" content="From name">
            <meta property="og:title" content="OG Title">
            <meta charset="utf-8">
            </head><body></body></html>"#,
        );
        let meta = extract_meta(&d);
        assert_eq!(meta.get("description").map(String::as_str), Some("From name"));
        assert_eq!(meta.get("og:title").map(String::as_str), Some("OG Title"));
        assert_eq!(meta.get("charset").map(String::as_str), Some("utf-8"));
    }

    #[test]
    fn title_priority_is_og_then_twitter_then_plain() {
        let mut meta = MetaMap::new();
        meta.insert("title".into(), "Plain".into());
        meta.insert("twitter:title".into(), "Twitter".into());
        assert_eq!(first_meta(&meta, &["og:title", "twitter:title", "title"]).as_deref(), Some("Twitter"));
        meta.insert("og:title".into(), "OG".into());
        assert_eq!(first_meta(&meta, &["og:title", "twitter:title", "title"]).as_deref(), Some("OG"));
    }

    #[test]
    fn authors_deduplicate_preserving_order() {
        let d = doc("<html><body></body></html>");
        let mut meta = MetaMap::new();
        meta.insert("author".into(), "Jane Doe, Jane Doe, John Smith".into());
        let md = extract_article_metadata(&d, &meta);
        assert_eq!(md.authors, vec!["Jane Doe", "John Smith"]);
    }

    #[test]
    fn dom_byline_fallback_skips_labels() {
        let d = doc(
            r#"<html><body>
            <span class="byline">By</span>
            <span class="author-name">Maria Rossi</span>
            <span rel="author">Maria Rossi</span>
            </body></html>"#,
        );
        let md = extract_article_metadata(&d, &MetaMap::new());
        assert_eq!(md.authors, vec!["Maria Rossi"]);
    }

    #[test]
    fn dates_pass_through_verbatim() {
        let d = doc("<html><body></body></html>");
        let mut meta = MetaMap::new();
        meta.insert("article:published_time".into(), "2024-05-01T10:00:00+02:00".into());
        meta.insert("last-modified".into(), "yesterday, more or less".into());
        let md = extract_article_metadata(&d, &meta);
        assert_eq!(md.published_at.as_deref(), Some("2024-05-01T10:00:00+02:00"));
        assert_eq!(md.updated_at.as_deref(), Some("yesterday, more or less"));
    }

    #[test]
    fn time_element_fallback_for_dates() {
        let d = doc(
            r#"<html><body>
            <time datetime="2024-03-02">2 March 2024</time>
            <time itemprop="dateModified" datetime="2024-03-05">5 March</time>
            </body></html>"#,
        );
        let md = extract_article_metadata(&d, &MetaMap::new());
        assert_eq!(md.published_at.as_deref(), Some("2024-03-02"));
        assert_eq!(md.updated_at.as_deref(), Some("2024-03-05"));
    }

    #[test]
    fn subtitle_from_class_then_selector_list() {
        let d = doc(
            r#"<html><body><p class="ArticleSubtitle">The standfirst</p></body></html>"#,
        );
        let md = extract_article_metadata(&d, &MetaMap::new());
        assert_eq!(md.subtitle.as_deref(), Some("The standfirst"));

        let d = doc(r#"<html><body><div class="lead">Lead text</div></body></html>"#);
        let md = extract_article_metadata(&d, &MetaMap::new());
        assert_eq!(md.subtitle.as_deref(), Some("Lead text"));
    }

    #[test]
    fn keywords_and_tags_are_comma_split() {
        let d = doc("<html><body></body></html>");
        let mut meta = MetaMap::new();
        meta.insert("keywords".into(), "rust, parsing , ,extraction".into());
        meta.insert("article:tag".into(), "news,tech".into());
        let md = extract_article_metadata(&d, &meta);
        assert_eq!(md.keywords, vec!["rust", "parsing", "extraction"]);
        assert_eq!(md.tags, vec!["news", "tech"]);
    }
}
