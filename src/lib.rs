//! # pressclip
//!
//! Main-article extraction from web pages.
//!
//! Given a page's HTML and its final URL, pressclip decides which DOM region
//! is the real article — filtering out navigation, ads and other chrome,
//! scoring structural candidates, and arbitrating between a readability-style
//! summarizer and its own heuristics — then derives metadata, media, links,
//! lists and tables from the winner.
//!
//! ## Quick start
//!
//! ```rust
//! use pressclip::extract;
//!
//! let html = r#"<html><head><title>My Page</title></head>
//! <body><article><h1>Headline</h1><p>Body text.</p></article></body></html>"#;
//!
//! let page = extract(html, "https://example.com/story")?;
//! println!("title: {}", page.article.title);
//! println!("confidence: {}", page.article.stats.confidence);
//! # Ok::<(), pressclip::Error>(())
//! ```
//!
//! Fetching is a separate concern: [`PageFetcher`] retrieves pages with
//! user-agent rotation and request jitter, and [`output`] persists results
//! as JSON. The `scrape` binary wires the three together for batch runs.

mod arbiter;
mod error;
mod options;

/// Content arbitration between extraction strategies.
pub use arbiter::{choose_main_content, MainContent};

/// DOM adapter over `dom_query`.
pub mod dom;

/// Noise filtering of chrome and boilerplate elements.
pub mod noise;

/// Candidate block scoring and the schema-selector probe.
pub mod candidates;

/// Readability strategy wrapper.
pub mod readability;

/// Article metadata derivation.
pub mod metadata;

/// Hero image, gallery and video derivation.
pub mod media;

/// In-article and related link derivation.
pub mod links;

/// Final record assembly and page context.
pub mod assemble;

/// Output data model.
pub mod record;

/// URL validation and resolution.
pub mod url_utils;

/// Charset detection and transcoding.
pub mod encoding;

/// Blocking page fetcher.
pub mod fetch;

/// JSON serialization and persistence.
pub mod output;

pub use error::{Error, Result};
pub use fetch::{PageFetcher, PageInfo, ScrapeOutput};
pub use options::{Options, DEFAULT_USER_AGENTS};
pub use record::{ArticleRecord, PageContext, ParsedPage};

use tracing::info;
use url::Url;

/// Extract the main article and page context from an HTML document.
///
/// `final_url` is the post-redirect page URL; it is the base for all URL
/// resolution and the host reference for the external-link flag.
///
/// Missing signals degrade gracefully (empty fields, lower confidence);
/// only structural failures return an error.
pub fn extract(html: &str, final_url: &str) -> Result<ParsedPage> {
    info!(url = final_url, "parsing HTML");

    let full_doc = dom::Document::from(html);
    let content_doc = noise::prepare_content_doc(html);
    let base = Url::parse(final_url).ok();

    let page_title = full_doc
        .select("title")
        .nodes()
        .first()
        .map(dom::node_text)
        .unwrap_or_default();
    let meta = metadata::extract_meta(&full_doc);

    let readability_content = readability::extract_main_content(html, final_url);
    let blocks = candidates::ranked_candidates(&content_doc);

    let main = choose_main_content(readability_content, &blocks, &page_title);
    let article = assemble::build_article_section(&main, &meta, &content_doc, base.as_ref());
    let context = assemble::build_page_context(&content_doc, base.as_ref(), &article, &blocks);

    Ok(ParsedPage {
        title: page_title,
        base_url: final_url.to_string(),
        domain: url_utils::host_of(final_url),
        meta,
        article,
        context,
    })
}

/// Fetch a URL and extract its article in one call.
///
/// Convenience wrapper over [`PageFetcher`] and [`extract`]; the fetcher's
/// final (post-redirect) URL is used as the extraction base.
pub fn scrape(url: &str, options: &Options) -> Result<ScrapeOutput> {
    let mut fetcher = PageFetcher::new(options)?;
    let fetched = fetcher.fetch(url)?;
    let content = extract(&fetched.html, &fetched.info.url)?;
    Ok(ScrapeOutput {
        page: fetched.info,
        content,
    })
}
