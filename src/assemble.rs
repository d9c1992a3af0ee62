//! Article assembly and page context.
//!
//! Pure composition: the arbiter and derivers have already made every
//! judgement call, this module only merges their outputs into the final
//! record, plus the mechanical extraction of headings, lists and tables.

use url::Url;

use crate::arbiter::MainContent;
use crate::candidates::CandidateBlock;
use crate::dom::{self, Document, Selection};
use crate::links::{build_related_links, extract_links_from_fragment};
use crate::media::extract_article_media;
use crate::metadata::{extract_article_metadata, MetaMap};
use crate::record::{
    ArticleBody, ArticleRecord, ArticleStats, CandidateSummary, Headings, ListGroups, PageContext,
    TableData,
};

/// Candidates shown in the page-context summary.
const SUMMARY_CANDIDATES: usize = 5;

/// Collect headings grouped by level.
#[must_use]
pub fn extract_headings(doc: &Document) -> Headings {
    let texts = |tag: &str| -> Vec<String> {
        doc.select(tag).nodes().iter().map(dom::node_text).collect()
    };
    Headings {
        h1: texts("h1"),
        h2: texts("h2"),
        h3: texts("h3"),
        h4: texts("h4"),
        h5: texts("h5"),
        h6: texts("h6"),
    }
}

/// Collect `ul`/`ol` item groups from an HTML fragment.
///
/// Items are whitespace-collapsed; empty items and empty lists are dropped.
#[must_use]
pub fn extract_lists(fragment_html: Option<&str>) -> ListGroups {
    let mut groups = ListGroups::default();
    let Some(html) = fragment_html else {
        return groups;
    };
    let fragment = Document::from(html.to_string());
    for (tag, bucket) in [("ul", &mut groups.ul), ("ol", &mut groups.ol)] {
        for list in fragment.select(tag).nodes() {
            let items: Vec<String> = Selection::from(*list)
                .select("li")
                .nodes()
                .iter()
                .map(dom::node_text)
                .filter(|item| !item.is_empty())
                .collect();
            if !items.is_empty() {
                bucket.push(items);
            }
        }
    }
    groups
}

/// Collect tables from an HTML fragment: header cells from `<th>`, rows from
/// `<tr>`; rows without cells are dropped.
#[must_use]
pub fn extract_tables(fragment_html: Option<&str>) -> Vec<TableData> {
    let Some(html) = fragment_html else {
        return Vec::new();
    };
    let fragment = Document::from(html.to_string());
    let mut tables = Vec::new();
    for (id, table) in fragment.select("table").nodes().iter().enumerate() {
        let table_sel = Selection::from(*table);
        let headers: Vec<String> = table_sel
            .select("th")
            .nodes()
            .iter()
            .map(dom::node_text)
            .collect();
        let mut rows = Vec::new();
        for row in table_sel.select("tr").nodes() {
            let cells: Vec<String> = Selection::from(*row)
                .select("td, th")
                .nodes()
                .iter()
                .map(dom::node_text)
                .collect();
            if !cells.is_empty() {
                rows.push(cells);
            }
        }
        tables.push(TableData { id, headers, rows });
    }
    tables
}

/// Merge the arbitration winner and the derived fields into the article.
#[must_use]
pub fn build_article_section(
    main: &MainContent,
    meta: &MetaMap,
    content_doc: &Document,
    base: Option<&Url>,
) -> ArticleRecord {
    let metadata = extract_article_metadata(content_doc, meta);
    let fragment = main.html.as_deref();
    let media = extract_article_media(fragment, meta, base, content_doc);
    let links = extract_links_from_fragment(fragment, base);
    let lists = extract_lists(fragment);
    let tables = extract_tables(fragment);

    let excerpt = metadata
        .excerpt
        .clone()
        .map(|e| dom::clean_text(&e))
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| main.first_paragraph());

    let body = ArticleBody {
        text: main.text.trim().to_string(),
        paragraphs: main.paragraphs.clone(),
        word_count: main.word_count,
        reading_time_minutes: main.reading_time_minutes,
        source: main.source,
        html: main.html.clone(),
    };

    let stats = ArticleStats {
        confidence: (main.confidence * 100.0).round() / 100.0,
        paragraph_count: body.paragraphs.len(),
        has_media: media.hero_image.is_some() || !media.videos.is_empty(),
        has_links: !links.is_empty(),
    };

    let title = if main.title.is_empty() {
        metadata.title.clone().unwrap_or_default()
    } else {
        main.title.clone()
    };

    ArticleRecord {
        title,
        subtitle: metadata.subtitle,
        section: metadata.section,
        authors: metadata.authors,
        published_at: metadata.published_at,
        updated_at: metadata.updated_at,
        excerpt,
        keywords: metadata.keywords,
        tags: metadata.tags,
        body,
        media,
        links,
        lists,
        tables,
        stats,
    }
}

/// Page-level context: headings, related links and the candidate summary.
#[must_use]
pub fn build_page_context(
    content_doc: &Document,
    base: Option<&Url>,
    article: &ArticleRecord,
    blocks: &[CandidateBlock],
) -> PageContext {
    PageContext {
        headings: extract_headings(content_doc),
        related_links: build_related_links(content_doc, base, &article.links),
        candidates: summarize_blocks(blocks),
    }
}

/// Top-5 candidate summary for the page context.
#[must_use]
pub fn summarize_blocks(blocks: &[CandidateBlock]) -> Vec<CandidateSummary> {
    blocks
        .iter()
        .take(SUMMARY_CANDIDATES)
        .map(|block| CandidateSummary {
            id: block.id.clone(),
            heading: block.heading.clone(),
            word_count: block.word_count,
            score: block.score,
            dom_path: block.dom_path.clone(),
        })
        .collect()
}
