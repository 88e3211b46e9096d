//! Configuration options for extraction and watching.
//!
//! The `Options` struct controls pipeline behavior. Use `Default::default()`
//! for the reference settings and struct update syntax to change a field.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Language of the description placeholder put on mirror links without text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Polish.
    Pl,
}

impl Locale {
    /// Placeholder description for a mirror link in this language.
    #[must_use]
    pub fn link_placeholder(self) -> &'static str {
        match self {
            Locale::En => "Episode link",
            Locale::Pl => "Link do odcinka",
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pl" => Ok(Locale::Pl),
            other => Err(format!("unsupported locale: {other}")),
        }
    }
}

/// Configuration options for extraction.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use vidinfo::Options;
///
/// let options = Options {
///     settle_delay: Duration::from_millis(250),
///     enable_overrides: false,
///     ..Options::default()
/// };
/// assert_eq!(options.max_title_chars, 100);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Wait after a detected navigation before re-extracting.
    ///
    /// Default: `1000ms`
    pub settle_delay: Duration,

    /// Maximum title length in characters before `...` is appended.
    ///
    /// Default: `100`
    pub max_title_chars: usize,

    /// Remove a trailing single-word ` - Site` segment from titles.
    ///
    /// Default: `true`
    pub strip_site_suffix: bool,

    /// Consult site overrides. When false every page uses the generic chains
    /// and mirror discovery never runs.
    ///
    /// Default: `true`
    pub enable_overrides: bool,

    /// Force the placeholder language. `None` uses the matched override's
    /// locale, or English on generic pages.
    ///
    /// Default: `None`
    pub locale: Option<Locale>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1000),
            max_title_chars: 100,
            strip_site_suffix: true,
            enable_overrides: true,
            locale: None,
        }
    }
}
