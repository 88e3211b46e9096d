//! Result types for extraction output.
//!
//! A pipeline run produces one [`VideoInfo`]; it is never mutated after
//! construction, only replaced by the next run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when no strategy yields any text.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Author used when a mirror candidate carries no author marker.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Domain reported for addresses without a parseable host.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// A candidate alternate source for the same video.
///
/// Values are immutable once discovered. The `url` is always absolute;
/// candidates without one are dropped before a `MirrorLink` is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MirrorLink {
    /// Uploader or source label (`UNKNOWN_AUTHOR` when absent).
    pub author: String,

    /// Absolute URL of the mirror.
    pub url: String,

    /// Free-text description, or the locale placeholder.
    pub description: String,
}

impl MirrorLink {
    /// Creates a mirror link, substituting sentinels for empty fields.
    #[must_use]
    pub fn new(author: impl Into<String>, url: impl Into<String>, description: impl Into<String>, placeholder: &str) -> Self {
        let author = author.into();
        let description = description.into();
        Self {
            author: if author.trim().is_empty() { UNKNOWN_AUTHOR.to_string() } else { author },
            url: url.into(),
            description: if description.trim().is_empty() { placeholder.to_string() } else { description },
        }
    }
}

/// Structured video metadata extracted from one document state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Full address of the document at extraction time.
    pub source_url: String,

    /// Cleaned title; never empty.
    pub title: String,

    /// Absolute thumbnail URL, or empty when none was found.
    pub thumbnail: String,

    /// Hostname without a leading `www.`, or `"unknown"`.
    pub domain: String,

    /// When the pipeline run that produced this value happened.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub captured_at: DateTime<Utc>,

    /// Deduplicated mirror candidates in discovery order.
    pub mirror_links: Vec<MirrorLink>,

    /// Name of the site override that handled this document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl VideoInfo {
    /// Whether any mirror candidates were found.
    #[must_use]
    pub fn has_mirror_links(&self) -> bool {
        !self.mirror_links.is_empty()
    }

    /// Whether a site override handled this document.
    ///
    /// Presentation layers use this to offer the mirror list in place of a
    /// direct download of the page address.
    #[must_use]
    pub fn is_override_site(&self) -> bool {
        self.site.is_some()
    }

    /// Compares every field except `captured_at`.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.source_url == other.source_url
            && self.title == other.title
            && self.thumbnail == other.thumbnail
            && self.domain == other.domain
            && self.mirror_links == other.mirror_links
            && self.site == other.site
    }
}
