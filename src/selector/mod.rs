//! Field Strategy Chains
//!
//! Ordered (selector, accessor) pairs for locating the title and thumbnail
//! of any page. A chain is tried top to bottom and the first strategy that
//! yields non-blank text wins.
//!
//! The order is part of the contract: structural tags come before generic
//! headings, headings before ad-hoc class hooks, and class hooks before
//! metadata tags. Changing it changes results on real pages.

use dom_query::{Document, Selection};
use tracing::trace;

use crate::dom;
use crate::text::TitleOrigin;

/// Which field a chain fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Title,
    Thumbnail,
}

/// How a value is read from a matched node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// `content` attribute of a `<meta>` node.
    MetaContent,
    /// `poster` attribute of a `<video>` node.
    Poster,
    /// `src` attribute of an `<img>`/`<source>` node.
    Source,
    /// Trimmed text content.
    Text,
}

impl Accessor {
    /// Accessor implied by a node's tag.
    #[must_use]
    pub fn for_node(sel: &Selection) -> Self {
        match dom::tag_name(sel).as_deref() {
            Some("meta") => Accessor::MetaContent,
            Some("video") => Accessor::Poster,
            Some("img" | "source") => Accessor::Source,
            _ => Accessor::Text,
        }
    }

    /// Read the value; `None` when missing or blank.
    #[must_use]
    pub fn read(self, sel: &Selection) -> Option<String> {
        match self {
            Accessor::MetaContent => dom::non_empty_attribute(sel, "content"),
            Accessor::Poster => dom::non_empty_attribute(sel, "poster"),
            Accessor::Source => dom::non_empty_attribute(sel, "src"),
            Accessor::Text => Some(dom::trimmed_text(sel)).filter(|t| !t.is_empty()),
        }
    }
}

/// A single locator in a chain.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub selector: &'static str,
    pub origin: TitleOrigin,
}

impl Strategy {
    const fn new(selector: &'static str) -> Self {
        Self { selector, origin: TitleOrigin::Content }
    }

    /// Locator for a value the page declares about itself.
    const fn declared(selector: &'static str) -> Self {
        Self { selector, origin: TitleOrigin::Declared }
    }

    /// Apply to the first node matching the selector.
    #[must_use]
    pub fn apply(&self, doc: &Document) -> Option<String> {
        let node = dom::document_query(doc, self.selector)?;
        Accessor::for_node(&node).read(&node)
    }
}

/// Title strategies (in priority order)
pub static TITLE_CHAIN: &[Strategy] = &[
    Strategy::declared("title"),
    Strategy::new("h1"),
    Strategy::new("[data-title]"),
    Strategy::new(".video-title"),
    Strategy::new(".title"),
    Strategy::declared(r#"meta[property="og:title"]"#),
    Strategy::declared(r#"meta[name="title"]"#),
];

/// Thumbnail strategies (in priority order)
pub static THUMBNAIL_CHAIN: &[Strategy] = &[
    Strategy::new(r#"meta[property="og:image"]"#),
    Strategy::new(r#"meta[name="twitter:image"]"#),
    Strategy::new("video"),
    Strategy::new(".video-thumbnail img"),
    Strategy::new(".thumbnail img"),
];

/// Chain for a field kind.
#[must_use]
pub fn chain(kind: FieldKind) -> &'static [Strategy] {
    match kind {
        FieldKind::Title => TITLE_CHAIN,
        FieldKind::Thumbnail => THUMBNAIL_CHAIN,
    }
}

/// First non-blank value of a chain and the strategy that produced it.
#[derive(Debug, Clone)]
pub struct ChainMatch {
    pub value: String,
    pub strategy: &'static Strategy,
}

impl ChainMatch {
    #[must_use]
    pub fn origin(&self) -> TitleOrigin {
        self.strategy.origin
    }
}

/// Run the chain for `kind` and return the first non-blank value.
#[must_use]
pub fn run_chain(doc: &Document, kind: FieldKind) -> Option<ChainMatch> {
    for strategy in chain(kind) {
        match strategy.apply(doc) {
            Some(value) => return Some(ChainMatch { value, strategy }),
            None => trace!(?kind, selector = strategy.selector, "strategy missed"),
        }
    }
    None
}

/// Value of the first matching strategy, without its origin.
#[must_use]
pub fn run_chain_value(doc: &Document, kind: FieldKind) -> Option<String> {
    run_chain(doc, kind).map(|found| found.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_title_element_over_h1() {
        let doc = dom::parse("<html><head><title>From Title</title></head><body><h1>From H1</h1></body></html>");
        assert_eq!(run_chain_value(&doc, FieldKind::Title).as_deref(), Some("From Title"));
    }

    #[test]
    fn test_title_blank_strategy_is_a_miss() {
        let doc = dom::parse(r#"
            <html><head><title>   </title></head>
            <body><h1>
            </h1><div class="video-title">Hooked</div></body></html>
        "#);
        assert_eq!(run_chain_value(&doc, FieldKind::Title).as_deref(), Some("Hooked"));
    }

    #[test]
    fn test_title_class_hooks_before_meta() {
        let doc = dom::parse(r#"
            <html><head><meta property="og:title" content="OG"></head>
            <body><span class="title">Class Title</span></body></html>
        "#);
        assert_eq!(run_chain_value(&doc, FieldKind::Title).as_deref(), Some("Class Title"));
    }

    #[test]
    fn test_title_meta_name_last() {
        let doc = dom::parse(r#"<html><head><meta name="title" content="Named"></head><body></body></html>"#);
        assert_eq!(run_chain_value(&doc, FieldKind::Title).as_deref(), Some("Named"));
    }

    #[test]
    fn test_thumbnail_meta_before_video() {
        let doc = dom::parse(r#"
            <html><head><meta name="twitter:image" content="https://cdn/t.jpg"></head>
            <body><video poster="https://cdn/p.jpg"></video></body></html>
        "#);
        assert_eq!(run_chain_value(&doc, FieldKind::Thumbnail).as_deref(), Some("https://cdn/t.jpg"));
    }

    #[test]
    fn test_thumbnail_video_without_poster_falls_through() {
        let doc = dom::parse(r#"
            <html><body><video src="v.mp4"></video>
            <div class="thumbnail"><img src="/thumb.png"></div></body></html>
        "#);
        assert_eq!(run_chain_value(&doc, FieldKind::Thumbnail).as_deref(), Some("/thumb.png"));
    }

    #[test]
    fn test_empty_document_misses_everything() {
        let doc = dom::parse("<html><body><p>nothing here</p></body></html>");
        assert!(run_chain(&doc, FieldKind::Title).is_none());
        assert!(run_chain(&doc, FieldKind::Thumbnail).is_none());
    }

    #[test]
    fn test_match_reports_origin() {
        let declared = dom::parse("<html><head><title>Frieren - 12</title></head><body><h1>H</h1></body></html>");
        let found = run_chain(&declared, FieldKind::Title).map(|m| (m.strategy.selector, m.origin()));
        assert_eq!(found, Some(("title", TitleOrigin::Declared)));

        let heading = dom::parse(r#"<html><body><h1>Frieren</h1></body><meta property="og:title" content="x"></html>"#);
        assert_eq!(run_chain(&heading, FieldKind::Title).map(|m| m.origin()), Some(TitleOrigin::Content));
    }

    #[test]
    fn test_accessor_for_node() {
        let doc = dom::parse(r#"<meta name="x" content="c"><video poster="p"></video><img src="s"><p>t</p>"#);
        assert_eq!(Accessor::for_node(&doc.select("meta")), Accessor::MetaContent);
        assert_eq!(Accessor::for_node(&doc.select("video")), Accessor::Poster);
        assert_eq!(Accessor::for_node(&doc.select("img")), Accessor::Source);
        assert_eq!(Accessor::for_node(&doc.select("p")), Accessor::Text);
    }
}
