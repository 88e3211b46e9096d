//! # vidinfo
//!
//! Video page metadata extraction for single-page sites.
//!
//! Given a rendered document and its address, the library produces a
//! [`VideoInfo`]: a cleaned title, an absolute thumbnail URL, the source
//! domain and, on sites with a registered override, the list of alternate
//! mirror sources found on the page.
//!
//! ## Quick Start
//!
//! ```rust
//! use vidinfo::extract;
//!
//! let html = r#"<html><head>
//!   <meta property="og:title" content="  My Video - Site  ">
//!   <meta property="og:image" content="/thumb.jpg">
//! </head><body></body></html>"#;
//!
//! let info = extract(html, "https://www.example.com/watch/1");
//! assert_eq!(info.title, "My Video");
//! assert_eq!(info.thumbnail, "https://www.example.com/thumb.jpg");
//! assert_eq!(info.domain, "example.com");
//! ```
//!
//! ## Live documents
//!
//! For pages that navigate without reloading, wrap the document in a
//! [`DocumentHandle`] and hand it to an [`Engine`]. The engine's watcher
//! re-runs extraction once the address has settled and publishes each
//! result to its sinks and to pull queries.
//!
//! ## Features
//!
//! - **Field Strategy Chains**: ordered selector fallbacks for title and thumbnail
//! - **Site Overrides**: narrower lookups and mirror discovery for known sites
//! - **Mirror Discovery**: container scan with an anchor scan fallback, deduplicated
//! - **Byte Input**: charset detection before parsing

mod error;
mod extract;
mod options;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Field strategy chains for title and thumbnail.
pub mod selector;

/// Site-specific extraction routines.
pub mod overrides;

/// Mirror link discovery.
pub mod mirrors;

/// Mirror link deduplication.
pub mod dedup;

/// Title cleaning and clamping.
pub mod text;

/// URL utilities for resolution, normalization and domain reporting.
pub mod url_utils;

/// Character encoding detection and decoding.
pub mod encoding;

/// Document handles and mutation events.
pub mod document;

/// Result publishing, sinks and pull queries.
pub mod publisher;

/// Debounced re-extraction on in-page navigation.
pub mod watcher;

/// Per-document extraction context.
pub mod engine;

/// Host boundary messages.
pub mod message;

/// Download service request payload.
pub mod request;

// Public API - re-exports
pub use document::{DocumentHandle, LiveDocument, Mutation, Snapshot};
pub use engine::Engine;
pub use error::{Error, Result};
pub use extract::extract_from_document;
pub use message::{HostMessage, HostRequest, HostResponse};
pub use options::{Locale, Options};
pub use publisher::{ChannelSink, Publisher, QueryClient, ResultSink};
pub use request::DownloadRequest;
pub use result::{MirrorLink, VideoInfo, UNKNOWN_AUTHOR, UNKNOWN_DOMAIN, UNKNOWN_TITLE};
pub use watcher::WatcherHandle;

/// Extracts video metadata from an HTML document using default options.
///
/// `address` is the document's full URL; it selects the site override and
/// is the base for relative links.
#[must_use]
pub fn extract(html: &str, address: &str) -> VideoInfo {
    extract_with_options(html, address, &Options::default())
}

/// Extracts video metadata with custom options.
///
/// # Example
///
/// ```rust
/// use vidinfo::{extract_with_options, Options};
///
/// let html = "<title>A very long title</title>";
/// let options = Options { max_title_chars: 6, ..Options::default() };
/// let info = extract_with_options(html, "https://example.com/v", &options);
/// assert_eq!(info.title, "A very...");
/// ```
#[must_use]
pub fn extract_with_options(html: &str, address: &str, options: &Options) -> VideoInfo {
    extract::extract_video_info(html, address, options)
}

/// Extracts video metadata from raw bytes, detecting the character encoding.
///
/// The encoding comes from a byte order mark, else a `<meta>` charset
/// declaration, else UTF-8. Malformed sequences become U+FFFD.
///
/// # Example
///
/// ```rust
/// use vidinfo::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9</title></head></html>";
/// let info = extract_bytes(html, "https://example.com/v");
/// assert_eq!(info.title, "Café");
/// ```
#[must_use]
pub fn extract_bytes(html: &[u8], address: &str) -> VideoInfo {
    extract_bytes_with_options(html, address, &Options::default())
}

/// Extracts video metadata from raw bytes with custom options.
#[must_use]
pub fn extract_bytes_with_options(html: &[u8], address: &str, options: &Options) -> VideoInfo {
    let decoded = encoding::decode_document(html);
    extract_with_options(&decoded.text, address, options)
}
