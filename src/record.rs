//! Output data model.
//!
//! Value objects produced by one extraction call and owned by the caller.
//! Everything here round-trips through serde without loss, which is the
//! contract at the output boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which strategy produced the main content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Full-page readability summarizer.
    Readability,
    /// Candidate-block scoring over the noise-filtered tree.
    Heuristic,
    /// No strategy produced usable content.
    #[default]
    Unknown,
}

/// Main body of the extracted article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleBody {
    /// Body text, paragraphs joined by blank lines.
    pub text: String,

    /// Ordered paragraph texts.
    pub paragraphs: Vec<String>,

    /// Word count of the body text.
    pub word_count: usize,

    /// Estimated reading time at 200 words per minute, 2 decimals.
    pub reading_time_minutes: f64,

    /// Strategy that produced this body.
    pub source: ContentSource,

    /// HTML fragment of the chosen content region, when available.
    pub html: Option<String>,
}

/// An image in the article gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Absolute image URL.
    pub src: String,
    /// Alt text.
    pub alt: String,
    /// Title attribute.
    pub title: String,
}

/// Media attached to the article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleMedia {
    /// Hero image URL from page metadata, absolute.
    pub hero_image: Option<String>,

    /// Images inside the chosen content fragment (at most 5).
    pub gallery: Vec<GalleryImage>,

    /// Video URLs (at most 3).
    pub videos: Vec<String>,
}

/// A hyperlink with resolved target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Anchor text, whitespace-collapsed.
    pub text: String,
    /// Absolute target URL.
    pub href: String,
    /// Whether the target host differs from the page host.
    pub is_external: bool,
    /// Title attribute.
    pub title: String,
}

/// `ul`/`ol` item groups found in the content fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListGroups {
    /// Unordered lists, one item vector per `<ul>`.
    pub ul: Vec<Vec<String>>,
    /// Ordered lists, one item vector per `<ol>`.
    pub ol: Vec<Vec<String>>,
}

/// A table found in the content fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Zero-based table index within the fragment.
    pub id: usize,
    /// Header cell texts (`<th>`).
    pub headers: Vec<String>,
    /// Row cell texts (`<tr>` → `<td>`/`<th>`), rows without cells dropped.
    pub rows: Vec<Vec<String>>,
}

/// Extraction quality summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleStats {
    /// Arbitration confidence, rounded to 2 decimals.
    pub confidence: f64,
    /// Number of body paragraphs.
    pub paragraph_count: usize,
    /// Whether a hero image or any video was found.
    pub has_media: bool,
    /// Whether any in-article link was found.
    pub has_links: bool,
}

/// The assembled article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Article title (content title, then meta title, then page title).
    pub title: String,

    /// Standfirst/subtitle, when one is present.
    pub subtitle: Option<String>,

    /// Site section or category label.
    pub section: Option<String>,

    /// De-duplicated author names, first-seen order.
    pub authors: Vec<String>,

    /// Publication timestamp, passed through verbatim.
    pub published_at: Option<String>,

    /// Last-update timestamp, passed through verbatim.
    pub updated_at: Option<String>,

    /// Description meta or first body paragraph.
    pub excerpt: String,

    /// Keyword list from meta tags.
    pub keywords: Vec<String>,

    /// Tag list from meta tags.
    pub tags: Vec<String>,

    /// Main body.
    pub body: ArticleBody,

    /// Hero image, gallery and videos.
    pub media: ArticleMedia,

    /// In-article links (at most 40).
    pub links: Vec<Link>,

    /// List groups from the content fragment.
    pub lists: ListGroups,

    /// Tables from the content fragment.
    pub tables: Vec<TableData>,

    /// Quality summary.
    pub stats: ArticleStats,
}

/// Page headings grouped by level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

/// One line of the candidate summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    /// Candidate identifier (`block_N` or `schema_N`).
    pub id: String,
    /// First h1–h3 heading inside the candidate.
    pub heading: String,
    /// Candidate word count.
    pub word_count: usize,
    /// Heuristic score.
    pub score: f64,
    /// Leaf-to-ancestor DOM path.
    pub dom_path: String,
}

/// Page-level context around the article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// Headings by level from the noise-filtered page.
    pub headings: Headings,

    /// Additional page links not already in the article (at most 15,
    /// empty-text anchors excluded).
    pub related_links: Vec<Link>,

    /// Top 5 scored candidates.
    pub candidates: Vec<CandidateSummary>,
}

/// Full result of parsing one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedPage {
    /// `<title>` element text.
    pub title: String,

    /// Final page URL used as resolution base.
    pub base_url: String,

    /// Host of the base URL.
    pub domain: String,

    /// Flat meta-tag map (`name`/`property` → content).
    pub meta: BTreeMap<String, String>,

    /// The extracted article.
    pub article: ArticleRecord,

    /// Page-level context.
    pub context: PageContext,
}
