//! Site Override Resolver
//!
//! Some sites mark up their pages in ways the generic chains cannot read.
//! A [`SiteOverride`] supplies narrower title and thumbnail lookups that run
//! before the generic chains, plus the mirror list conventions for that
//! site. Overrides are layered, not exclusive: a field the override leaves
//! empty still goes through the generic chain.

pub mod ogladajanime;

use dom_query::Document;

use crate::mirrors::MirrorPatterns;
use crate::options::Locale;
use crate::url_utils;

/// A site-specific extraction routine.
pub trait SiteOverride: Send + Sync {
    /// Short identifier reported in `VideoInfo::site`.
    fn name(&self) -> &'static str;

    /// Substring that a document's hostname must contain.
    fn host_pattern(&self) -> &'static str;

    /// Whether this override handles documents served from `host`.
    ///
    /// Substring match, so subdomains qualify.
    fn matches_host(&self, host: &str) -> bool {
        host.contains(self.host_pattern())
    }

    /// Language of the site, used for placeholder text.
    fn locale(&self) -> Locale {
        Locale::En
    }

    /// Site-specific title lookup, untrimmed of separators.
    fn title(&self, doc: &Document) -> Option<String>;

    /// Site-specific thumbnail lookup, as a raw (possibly relative) reference.
    fn thumbnail(&self, doc: &Document) -> Option<String>;

    /// Markup conventions for mirror discovery on this site.
    fn mirror_patterns(&self) -> &'static MirrorPatterns;
}

/// Known site overrides (first match wins)
pub static OVERRIDES: &[&dyn SiteOverride] = &[&ogladajanime::OgladajAnime];

/// Find the override for a document address, if any.
///
/// Addresses without a host never match.
#[must_use]
pub fn resolve(address: &str) -> Option<&'static dyn SiteOverride> {
    let host = url_utils::host_of(address)?;
    OVERRIDES.iter().copied().find(|o| o.matches_host(&host))
}
