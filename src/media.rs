//! Media derivation: hero image, gallery and videos.
//!
//! The hero image comes from page metadata; the gallery and videos come from
//! the chosen content fragment. Everything is resolved to absolute URLs
//! against the final page URL, with fixed caps.

use url::Url;

use crate::dom::{self, Document, Selection};
use crate::metadata::{first_meta, MetaMap};
use crate::record::{ArticleMedia, GalleryImage};
use crate::url_utils::create_absolute_url;

/// Gallery cap.
const MAX_GALLERY: usize = 5;

/// Video cap (gallery-fragment videos plus the page-level iframe probe).
const MAX_VIDEOS: usize = 3;

/// Derive article media from the content fragment and page metadata.
///
/// `page_doc` is the noise-filtered page, used only for the iframe probe.
#[must_use]
pub fn extract_article_media(
    fragment_html: Option<&str>,
    meta: &MetaMap,
    base: Option<&Url>,
    page_doc: &Document,
) -> ArticleMedia {
    let mut media = ArticleMedia::default();

    if let Some(hero) = first_meta(meta, &["og:image", "twitter:image", "image_thumb_src"]) {
        media.hero_image = Some(create_absolute_url(&hero, base));
    }

    if let Some(html) = fragment_html {
        let fragment = Document::from(html.to_string());

        for node in fragment.select("img").nodes() {
            let src = dom::node_attr(node, "src")
                .filter(|s| !s.is_empty())
                .or_else(|| dom::node_attr(node, "data-src").filter(|s| !s.is_empty()));
            if let Some(src) = src {
                media.gallery.push(GalleryImage {
                    src: create_absolute_url(&src, base),
                    alt: dom::clean_text(&dom::node_attr(node, "alt").unwrap_or_default()),
                    title: dom::clean_text(&dom::node_attr(node, "title").unwrap_or_default()),
                });
            }
        }

        for node in fragment.select("video").nodes() {
            let video = Selection::from(*node);
            let src = video
                .select("source")
                .nodes()
                .first()
                .and_then(|s| dom::node_attr(s, "src"))
                .or_else(|| dom::node_attr(node, "src"))
                .filter(|s| !s.is_empty());
            if let Some(src) = src {
                media.videos.push(create_absolute_url(&src, base));
            }
        }
    }

    // Embedded players are usually stripped with the noise, so this probe
    // only fires for iframes that survived filtering.
    if let Some(iframe) = dom::select_first(page_doc, "iframe[src]") {
        if let Some(src) = dom::node_attr(&iframe, "src").filter(|s| !s.is_empty()) {
            media.videos.push(create_absolute_url(&src, base));
        }
    }

    media.gallery.truncate(MAX_GALLERY);
    media.videos.truncate(MAX_VIDEOS);
    media
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Option<Url> {
        Url::parse("https://example.com/news/x").ok()
    }

    fn empty_page() -> Document {
        Document::from("<html><body></body></html>")
    }

    #[test]
    fn hero_image_is_resolved_absolute() {
        let mut meta = MetaMap::new();
        meta.insert("og:image".into(), "/img/a.png".into());
        let media = extract_article_media(None, &meta, base().as_ref(), &empty_page());
        assert_eq!(media.hero_image.as_deref(), Some("https://example.com/img/a.png"));
    }

    #[test]
    fn gallery_reads_src_and_data_src() {
        let fragment = r#"<div>
            <img src="/one.jpg" alt=" First  image ">
            <img data-src="https://cdn.example.org/two.jpg" title="Two">
            <img alt="no source">
        </div>"#;
        let media =
            extract_article_media(Some(fragment), &MetaMap::new(), base().as_ref(), &empty_page());
        assert_eq!(media.gallery.len(), 2);
        assert_eq!(media.gallery[0].src, "https://example.com/one.jpg");
        assert_eq!(media.gallery[0].alt, "First image");
        assert_eq!(media.gallery[1].src, "https://cdn.example.org/two.jpg");
    }

    #[test]
    fn gallery_cap_is_five() {
        let imgs: String = (0..9).map(|i| format!(r#"<img src="/i{i}.png">"#)).collect();
        let media = extract_article_media(
            Some(&format!("<div>{imgs}</div>")),
            &MetaMap::new(),
            base().as_ref(),
            &empty_page(),
        );
        assert_eq!(media.gallery.len(), 5);
    }

    #[test]
    fn videos_prefer_source_child_and_cap_at_three() {
        let fragment = r#"<div>
            <video><source src="/v1.mp4"><source src="/ignored.mp4"></video>
            <video src="/v2.mp4"></video>
            <video src="/v3.mp4"></video>
            <video src="/v4.mp4"></video>
        </div>"#;
        let media =
            extract_article_media(Some(fragment), &MetaMap::new(), base().as_ref(), &empty_page());
        assert_eq!(media.videos.len(), 3);
        assert_eq!(media.videos[0], "https://example.com/v1.mp4");
    }

    #[test]
    fn surviving_iframe_contributes_a_video() {
        let page = Document::from(
            r#"<html><body><iframe src="https://player.example.org/e/1"></iframe></body></html>"#,
        );
        let media = extract_article_media(None, &MetaMap::new(), base().as_ref(), &page);
        assert_eq!(media.videos, vec!["https://player.example.org/e/1"]);
    }
}
