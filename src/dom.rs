//! DOM adapter over `dom_query`.
//!
//! Small helpers shared by the filter, scorer and derivers: whitespace-safe
//! text extraction, attribute reads, and the node-level walks needed for DOM
//! path computation.

pub use dom_query::{Document, NodeRef, Selection};
pub use tendril::StrTendril;

/// Collapse all whitespace runs to single spaces and trim.
#[must_use]
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-collapsed text content of a selection.
#[must_use]
pub fn text_of(sel: &Selection) -> String {
    clean_text(&sel.text())
}

/// Whitespace-collapsed text content of a single node.
#[must_use]
pub fn node_text(node: &NodeRef) -> String {
    text_of(&Selection::from(*node))
}

/// Attribute value of a node, if present.
#[must_use]
pub fn node_attr(node: &NodeRef, name: &str) -> Option<String> {
    Selection::from(*node).attr(name).map(|v| v.to_string())
}

/// Tag name of a node (lowercase).
#[must_use]
pub fn node_tag(node: &NodeRef) -> String {
    node.node_name()
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Class attribute split into individual class names.
#[must_use]
pub fn class_list(node: &NodeRef) -> Vec<String> {
    node_attr(node, "class")
        .map(|c| c.split_whitespace().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Outer HTML of a node.
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
    Selection::from(*node).html().to_string()
}

/// Parent element of a node, skipping non-element ancestors.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut current = node.parent();
    while let Some(p) = current {
        if p.is_element() {
            return Some(p);
        }
        current = p.parent();
    }
    None
}

/// Position of `node` among its parent's direct children that share its tag.
///
/// Returns 0 when the node has no parent or cannot be located.
#[must_use]
pub fn same_tag_sibling_index(node: &NodeRef) -> usize {
    let Some(parent) = parent_element(node) else {
        return 0;
    };
    let tag = node_tag(node);
    let mut index = 0;
    for sibling in Selection::from(parent).children().nodes() {
        if node_tag(sibling) != tag {
            continue;
        }
        if sibling.id == node.id {
            return index;
        }
        index += 1;
    }
    0
}

/// First node matching `selector` under `doc`, in document order.
#[must_use]
pub fn select_first<'a>(doc: &'a Document, selector: &str) -> Option<NodeRef<'a>> {
    doc.select(selector).nodes().first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  hello \n\t world  "), "hello world");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn sibling_index_counts_same_tag_only() {
        let doc = Document::from(
            "<div><p>a</p><span>x</span><p id='target'>b</p><p>c</p></div>",
        );
        let target = select_first(&doc, "#target").unwrap();
        assert_eq!(same_tag_sibling_index(&target), 1);
    }

    #[test]
    fn class_list_splits_names() {
        let doc = Document::from(r#"<div class="a b  c"></div>"#);
        let node = select_first(&doc, "div").unwrap();
        assert_eq!(class_list(&node), vec!["a", "b", "c"]);
    }

    #[test]
    fn parent_element_walks_up() {
        let doc = Document::from("<section><div><p id='x'>t</p></div></section>");
        let node = select_first(&doc, "#x").unwrap();
        let parent = parent_element(&node).unwrap();
        assert_eq!(node_tag(&parent), "div");
    }
}
