//! Error types for vidinfo.
//!
//! Extraction itself never fails: every missing field degrades to a default.
//! These errors only surface at the edges (address parsing, host messages,
//! channels and file input).

/// Error type for the non-extraction edges of the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document address or link could not be parsed as an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing or deserializing a host message failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The other end of a sink or query channel is gone.
    #[error("Channel closed")]
    ChannelClosed,

    /// A push sink still holds unread messages; the push was dropped.
    #[error("Sink full")]
    SinkFull,
}

/// Result type alias for vidinfo operations.
pub type Result<T> = std::result::Result<T, Error>;
