//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate so the extraction code reads in
//! terms of "first match", "attribute", "text" and "closest ancestor" rather
//! than raw selections and node references.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

/// Parse an HTML document.
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value with surrounding whitespace removed, treating a
/// blank value as absent.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    get_attribute(sel, name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content trimmed of surrounding whitespace.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    text_content(sel).trim().to_string()
}

// === Querying ===

/// First element (in document order) under `root` matching `selector`.
///
/// Selector groups (`a, b`) return whichever member appears first in the
/// document, not the first group member that matches.
#[must_use]
pub fn query_selector<'a>(root: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    root.select(selector)
        .nodes()
        .first()
        .map(|node| Selection::from(*node))
}

/// All elements under `root` matching `selector`, one selection per node.
#[must_use]
pub fn query_selector_all<'a>(root: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    root.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// First element in the whole document matching `selector`.
#[must_use]
pub fn document_query<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .first()
        .map(|node| Selection::from(*node))
}

/// All elements in the whole document matching `selector`.
#[must_use]
pub fn document_query_all<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

// === Tree Navigation ===

/// Nearest element, starting with `sel` itself and walking up through its
/// ancestors, that matches `selector`.
#[must_use]
pub fn closest<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    let mut current = sel.nodes().first().copied();

    while let Some(node) = current {
        if node.is_element() {
            let candidate = Selection::from(node);
            if candidate.is(selector) {
                return Some(candidate);
            }
        }
        current = node.parent();
    }

    None
}
