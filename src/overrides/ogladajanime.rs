//! ogladajanime.pl
//!
//! WordPress-style anime aggregator. Titles live in `h1.entry-title`, the
//! cover in `.post-thumbnail`, and each episode page lists player mirrors
//! from several uploaders.

use dom_query::Document;

use crate::dom;
use crate::mirrors::MirrorPatterns;
use crate::options::Locale;
use crate::overrides::SiteOverride;

/// Mirror list conventions seen across the site's templates.
pub static PATTERNS: MirrorPatterns = MirrorPatterns {
    containers: ".episode-links .link-container, \
                 .mirror-links .mirror-link, \
                 .mirror-container .mirror-item, \
                 .download-links .link-item, \
                 .episode-mirrors .mirror, \
                 .link-list .link-entry",
    author: ".author-name, .mirror-author, .link-author, \
             .mirror-title, .link-title, .source-name",
    link: "a[href], .download-link, .mirror-url, .link-url",
    description: ".link-desc, .mirror-desc, .link-description, \
                  .mirror-description, .source-desc",
    hosts: &[
        "ogladajanime.pl",
        "streamtape.com",
        "mp4upload.com",
        "yourupload.com",
        "streamlare.com",
        "mixdrop.co",
        "dood.to",
        "filemoon.sx",
        "voe.sx",
        "vidstreaming.io",
    ],
    anchor_context: ".link-item, .mirror-item, li, .mirror, .source",
};

pub struct OgladajAnime;

impl SiteOverride for OgladajAnime {
    fn name(&self) -> &'static str {
        "ogladajanime"
    }

    fn host_pattern(&self) -> &'static str {
        "ogladajanime.pl"
    }

    fn locale(&self) -> Locale {
        Locale::Pl
    }

    fn title(&self, doc: &Document) -> Option<String> {
        dom::document_query(doc, "h1.entry-title")
            .map(|h1| dom::trimmed_text(&h1))
            .filter(|t| !t.is_empty())
    }

    fn thumbnail(&self, doc: &Document) -> Option<String> {
        dom::document_query(doc, ".post-thumbnail img")
            .and_then(|img| dom::non_empty_attribute(&img, "src"))
            .or_else(|| {
                dom::document_query(doc, "video")
                    .and_then(|video| dom::non_empty_attribute(&video, "poster"))
            })
    }

    fn mirror_patterns(&self) -> &'static MirrorPatterns {
        &PATTERNS
    }
}
