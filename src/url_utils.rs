//! URL Utility Functions
//!
//! Link normalization for extracted references: resolving relative `href`
//! and `src` values the way a browser would, producing the stable key used
//! for mirror deduplication, and deriving the reported domain.

use url::Url;

use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::result::UNKNOWN_DOMAIN;

/// Parse a document address into a `Url`.
///
/// Any scheme is accepted; the address only has to be absolute.
pub fn parse_address(address: &str) -> Result<Url> {
    Url::parse(address.trim()).map_err(|e| Error::InvalidUrl(format!("{address}: {e}")))
}

/// Hostname of an address, lowercased, if it has one.
#[must_use]
pub fn host_of(address: &str) -> Option<String> {
    parse_address(address)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .filter(|host| !host.is_empty())
}

/// Domain reported for a document: the hostname without a leading `www.`.
///
/// Returns `"unknown"` when the address has no parseable host.
#[must_use]
pub fn domain_from_address(address: &str) -> String {
    match host_of(address) {
        Some(host) => host.strip_prefix("www.").unwrap_or(&host).to_string(),
        None => UNKNOWN_DOMAIN.to_string(),
    }
}

/// Base URL against which relative references in `doc` resolve.
///
/// A `<base href>` wins over the document address, and is itself resolved
/// against the address when relative.
#[must_use]
pub fn document_base(doc: &Document, address: &str) -> Option<Url> {
    let address_url = parse_address(address).ok();

    let declared = dom::document_query(doc, "base[href]")
        .and_then(|base| dom::non_empty_attribute(&base, "href"))
        .and_then(|href| match &address_url {
            Some(addr) => addr.join(&href).ok(),
            None => Url::parse(&href).ok(),
        });

    declared.or(address_url)
}

/// Resolve a link reference (`href`) to an absolute URL.
///
/// Returns `None` for empty references, script pseudo-links and relative
/// references that have no base to resolve against.
#[must_use]
pub fn resolve_link(raw: &str, base: Option<&Url>) -> Option<String> {
    let raw = raw.trim();

    if raw.is_empty() || raw.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }

    let resolved = match base {
        Some(base) => base.join(raw).ok(),
        None => Url::parse(raw).ok(),
    }?;

    Some(resolved.to_string())
}

/// Resolve a media reference (`src`, `poster`, `content`) to an absolute URL.
///
/// `data:` URIs are kept unchanged. When resolution fails the trimmed raw
/// value is returned, so a thumbnail is never lost to normalization.
#[must_use]
pub fn resolve_media(raw: &str, base: Option<&Url>) -> String {
    let raw = raw.trim();

    if raw.is_empty() {
        return String::new();
    }

    if raw.starts_with("data:") {
        return raw.to_string();
    }

    resolve_link(raw, base).unwrap_or_else(|| raw.to_string())
}

/// Normalize a URL into the key used for deduplication.
///
/// Removes the fragment and a trailing slash from the path (unless the path
/// is the root). Unparseable input is returned trimmed.
#[must_use]
pub fn dedup_key(url_str: &str) -> String {
    let Ok(mut url) = Url::parse(url_str.trim()) else {
        return url_str.trim().to_string();
    };

    url.set_fragment(None);

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    url.to_string()
}

/// Check if two URLs refer to the same mirror.
#[must_use]
pub fn urls_match(url1: &str, url2: &str) -> bool {
    dedup_key(url1) == dedup_key(url2)
}
