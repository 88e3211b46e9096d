//! The extraction pipeline.
//!
//! One call reads one document state and builds a complete [`VideoInfo`]:
//!
//! 1. resolve the site override for the address
//! 2. run the override's title/thumbnail lookups
//! 3. fill whatever is still empty from the generic chains
//! 4. clean and clamp the title, resolve the thumbnail
//! 5. under an override, discover and dedupe mirror links
//!
//! The pipeline never fails; every miss degrades to a documented default.

use chrono::Utc;
use tracing::debug;

use crate::dedup::dedup_by_url;
use crate::dom::{self, Document};
use crate::mirrors::Discovery;
use crate::options::Options;
use crate::overrides::{self, SiteOverride};
use crate::result::VideoInfo;
use crate::selector::{self, FieldKind};
use crate::text::{self, TitleOrigin};
use crate::url_utils;

/// Parse `html` and extract against `address`.
pub(crate) fn extract_video_info(html: &str, address: &str, options: &Options) -> VideoInfo {
    let document = dom::parse(html);
    extract_from_document(&document, address, options)
}

/// Extract from an already parsed document.
#[must_use]
pub fn extract_from_document(doc: &Document, address: &str, options: &Options) -> VideoInfo {
    let captured_at = Utc::now();
    let base = url_utils::document_base(doc, address);

    let site: Option<&dyn SiteOverride> = if options.enable_overrides {
        overrides::resolve(address)
    } else {
        None
    };

    let (raw_title, title_origin) = site
        .and_then(|s| s.title(doc))
        .map(|title| (title, TitleOrigin::Content))
        .or_else(|| selector::run_chain(doc, FieldKind::Title).map(|found| {
            let origin = found.origin();
            (found.value, origin)
        }))
        .unwrap_or((String::new(), TitleOrigin::Content));

    let raw_thumbnail = site
        .and_then(|s| s.thumbnail(doc))
        .or_else(|| selector::run_chain_value(doc, FieldKind::Thumbnail))
        .unwrap_or_default();

    let mirror_links = match site {
        Some(site) => {
            let locale = options.locale.unwrap_or_else(|| site.locale());
            let discovery = Discovery {
                patterns: site.mirror_patterns(),
                base: base.as_ref(),
                placeholder: locale.link_placeholder(),
            };
            let candidates = discovery.run(doc);
            let unique = dedup_by_url(candidates);
            debug!(site = site.name(), count = unique.len(), "final unique links");
            unique
        }
        None => Vec::new(),
    };

    VideoInfo {
        source_url: address.to_string(),
        title: text::clean_title(&raw_title, title_origin, options),
        thumbnail: url_utils::resolve_media(&raw_thumbnail, base.as_ref()),
        domain: url_utils::domain_from_address(address),
        captured_at,
        mirror_links,
        site: site.map(|s| s.name().to_string()),
    }
}
