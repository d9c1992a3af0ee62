//! JSON shape of the extraction output.

use pressclip::extract;

#[test]
fn output_keys_and_source_tag() {
    let html = r#"<html><head><title>T</title></head>
        <body><article><h1>H</h1><p>Some body text here.</p></article></body></html>"#;
    let page = extract(html, "https://example.com/a").unwrap();
    let value = serde_json::to_value(&page).unwrap();

    assert!(value.get("title").is_some());
    assert!(value.get("base_url").is_some());
    assert!(value.get("domain").is_some());
    assert!(value.get("meta").is_some());

    let article = value.get("article").unwrap();
    for key in [
        "title", "subtitle", "section", "authors", "published_at", "updated_at",
        "excerpt", "keywords", "tags", "body", "media", "links", "lists",
        "tables", "stats",
    ] {
        assert!(article.get(key).is_some(), "missing article key {key}");
    }

    let source = article["body"]["source"].as_str().unwrap();
    assert!(matches!(source, "readability" | "heuristic" | "unknown"));

    let context = value.get("context").unwrap();
    assert!(context.get("headings").is_some());
    assert!(context.get("related_links").is_some());
    assert!(context.get("candidates").is_some());
}

#[test]
fn confidence_is_two_decimal_bounded() {
    let html = r#"<html><head><title>T</title></head><body></body></html>"#;
    let page = extract(html, "https://example.com/a").unwrap();
    let confidence = page.article.stats.confidence;
    assert!((0.0..=1.0).contains(&confidence));
    assert_eq!((confidence * 100.0).round() / 100.0, confidence);
}
