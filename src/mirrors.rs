//! Mirror-Link Discovery
//!
//! Finds candidate alternate sources on aggregator pages. Two phases:
//!
//! 1. **Structured containers** - elements whose classes mark them as mirror
//!    or episode link wrappers. Each container contributes at most one
//!    candidate: its first resolvable link, annotated with author and
//!    description found inside the same container.
//! 2. **Loose anchors** - only when phase 1 found nothing. Every anchor whose
//!    `href` mentions a known hosting domain becomes a candidate; the author
//!    label is whatever text surrounds it in its list item.
//!
//! Candidates come out in document order and are not deduplicated here.

use tracing::debug;
use url::Url;

use crate::dom::{self, Document, Selection};
use crate::result::MirrorLink;
use crate::url_utils;

/// Markup conventions a site uses for its mirror lists.
///
/// Each `&str` field is a CSS selector group; `hosts` are substrings matched
/// against raw `href` values.
#[derive(Debug, Clone, Copy)]
pub struct MirrorPatterns {
    /// Link container wrappers.
    pub containers: &'static str,
    /// Author markers inside a container.
    pub author: &'static str,
    /// Link elements inside a container.
    pub link: &'static str,
    /// Description markers inside a container.
    pub description: &'static str,
    /// Known video hosting domains for the anchor scan.
    pub hosts: &'static [&'static str],
    /// Ancestor whose text supplies the author in the anchor scan.
    pub anchor_context: &'static str,
}

/// Per-run inputs shared by both phases.
#[derive(Debug, Clone, Copy)]
pub struct Discovery<'a> {
    pub patterns: &'a MirrorPatterns,
    pub base: Option<&'a Url>,
    pub placeholder: &'a str,
}

impl Discovery<'_> {
    /// Run both phases and return the candidates, pre-dedup.
    #[must_use]
    pub fn run(&self, doc: &Document) -> Vec<MirrorLink> {
        let from_containers = self.scan_containers(doc);
        debug!(count = from_containers.len(), "links from containers");

        if !from_containers.is_empty() {
            return from_containers;
        }

        let from_anchors = self.scan_anchors(doc);
        debug!(count = from_anchors.len(), "links from known host anchors");
        from_anchors
    }

    /// Phase 1: one candidate per container with a resolvable link.
    #[must_use]
    pub fn scan_containers(&self, doc: &Document) -> Vec<MirrorLink> {
        let containers = dom::document_query_all(doc, self.patterns.containers);
        debug!(count = containers.len(), "found link containers");

        containers
            .iter()
            .filter_map(|container| self.container_link(container))
            .collect()
    }

    fn container_link(&self, container: &Selection) -> Option<MirrorLink> {
        let (link, url) = dom::query_selector_all(container, self.patterns.link)
            .into_iter()
            .find_map(|candidate| {
                let href = dom::get_attribute(&candidate, "href")?;
                let url = url_utils::resolve_link(&href, self.base)?;
                Some((candidate, url))
            })?;

        let author = dom::query_selector(container, self.patterns.author)
            .map(|el| dom::trimmed_text(&el))
            .unwrap_or_default();

        let description = dom::query_selector(container, self.patterns.description)
            .map(|el| dom::trimmed_text(&el))
            .filter(|text| !text.is_empty())
            .or_else(|| {
                let text = dom::trimmed_text(&link);
                (!text.is_empty() && text != url).then_some(text)
            })
            .unwrap_or_default();

        Some(MirrorLink::new(author, url, description, self.placeholder))
    }

    /// Phase 2: anchors pointing at known hosts.
    #[must_use]
    pub fn scan_anchors(&self, doc: &Document) -> Vec<MirrorLink> {
        let anchors = dom::document_query_all(doc, "a[href]");

        anchors
            .iter()
            .filter_map(|anchor| {
                let href = dom::get_attribute(anchor, "href")?;
                if !self.patterns.hosts.iter().any(|host| href.contains(host)) {
                    return None;
                }
                let url = url_utils::resolve_link(&href, self.base)?;
                let text = dom::trimmed_text(anchor);
                let author = dom::closest(anchor, self.patterns.anchor_context)
                    .map(|context| surrounding_text(&context, &url, &text))
                    .unwrap_or_default();

                Some(MirrorLink::new(author, url, text, self.placeholder))
            })
            .collect()
    }
}

/// Text of `context` with the first occurrence of the URL and of the
/// anchor's own text removed.
fn surrounding_text(context: &Selection, url: &str, anchor_text: &str) -> String {
    let mut text = dom::text_content(context).to_string();
    text = text.replacen(url, "", 1);
    if !anchor_text.is_empty() {
        text = text.replacen(anchor_text, "", 1);
    }
    text.trim().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::result::UNKNOWN_AUTHOR;

    static TEST_PATTERNS: MirrorPatterns = MirrorPatterns {
        containers: ".mirror-links .mirror-link",
        author: ".mirror-author",
        link: "a[href], .mirror-url",
        description: ".mirror-desc",
        hosts: &["voe.sx", "mixdrop.co"],
        anchor_context: "li, .mirror",
    };

    fn discovery<'a>(base: &'a Url) -> Discovery<'a> {
        Discovery { patterns: &TEST_PATTERNS, base: Some(base), placeholder: "Episode link" }
    }

    #[test]
    fn test_container_fields() {
        let base = Url::parse("https://site.test/ep/1").unwrap();
        let doc = dom::parse(r#"
            <div class="mirror-links">
              <div class="mirror-link">
                <span class="mirror-author">Alice</span>
                <a href="/play/1">Player one</a>
                <span class="mirror-desc">1080p</span>
              </div>
            </div>
        "#);

        let links = discovery(&base).scan_containers(&doc);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].author, "Alice");
        assert_eq!(links[0].url, "https://site.test/play/1");
        assert_eq!(links[0].description, "1080p");
    }

    #[test]
    fn test_container_description_falls_back_to_link_text() {
        let base = Url::parse("https://site.test/").unwrap();
        let doc = dom::parse(r#"
            <div class="mirror-links">
              <div class="mirror-link"><a href="https://voe.sx/e/1">VOE HD</a></div>
              <div class="mirror-link"><a href="https://voe.sx/e/2">https://voe.sx/e/2</a></div>
            </div>
        "#);

        let links = discovery(&base).scan_containers(&doc);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].description, "VOE HD");
        assert_eq!(links[0].author, UNKNOWN_AUTHOR);
        assert_eq!(links[1].description, "Episode link");
    }

    #[test]
    fn test_container_without_link_is_dropped() {
        let base = Url::parse("https://site.test/").unwrap();
        let doc = dom::parse(r#"
            <div class="mirror-links">
              <div class="mirror-link"><span class="mirror-author">Nobody</span></div>
              <div class="mirror-link"><span class="mirror-url">no href</span><a href="">empty</a></div>
              <div class="mirror-link"><span class="mirror-author">Bob</span><a href="/ok">ok</a></div>
            </div>
        "#);

        let links = discovery(&base).scan_containers(&doc);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].author, "Bob");
    }

    #[test]
    fn test_anchor_scan_only_when_containers_empty() {
        let base = Url::parse("https://site.test/").unwrap();
        let doc = dom::parse(r#"
            <div class="mirror-links">
              <div class="mirror-link"><a href="/own">own</a></div>
            </div>
            <ul><li>Carol <a href="https://voe.sx/e/9">watch</a></li></ul>
        "#);

        let links = discovery(&base).run(&doc);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://site.test/own");
    }

    #[test]
    fn test_anchor_scan_author_from_context() {
        let base = Url::parse("https://site.test/").unwrap();
        let doc = dom::parse(r#"
            <ul>
              <li>Author: Alice <a href="https://mixdrop.co/e/abc">Mixdrop</a></li>
              <li><a href="https://voe.sx/e/x"></a></li>
              <li><a href="https://elsewhere.test/e/x">skip</a></li>
            </ul>
            <p><a href="https://voe.sx/e/y">loose</a></p>
        "#);

        let links = discovery(&base).run(&doc);
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].author, "Author: Alice");
        assert_eq!(links[0].description, "Mixdrop");
        assert_eq!(links[1].author, UNKNOWN_AUTHOR);
        assert_eq!(links[1].description, "Episode link");
        assert_eq!(links[2].author, UNKNOWN_AUTHOR);
        assert_eq!(links[2].description, "loose");
    }

    #[test]
    fn test_surrounding_text_strips_url_and_text() {
        let doc = dom::parse(r#"<li id="c">Dave https://voe.sx/e/1 <a href="https://voe.sx/e/1">go</a></li>"#);
        let context = doc.select("#c");
        assert_eq!(surrounding_text(&context, "https://voe.sx/e/1", "go"), "Dave");
    }
}
