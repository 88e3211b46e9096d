//! Title cleaning.
//!
//! Raw titles come from arbitrary markup: `<title>` text with newlines,
//! `og:title` values with a site suffix, headings with stray separators.
//! [`clean_title`] turns any of them into the published form. Only titles
//! the page declares about itself (`<title>`, `meta`) may lose a site
//! suffix; headings and site routines carry episode numbers in that spot.

use std::sync::LazyLock;

use regex::Regex;

use crate::options::Options;
use crate::result::UNKNOWN_TITLE;

/// Marker appended to clamped titles.
pub const ELLIPSIS: &str = "...";

/// Runs of any whitespace
#[allow(clippy::expect_used)]
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("valid regex")
});

/// One dash separator at the start of a title
#[allow(clippy::expect_used)]
static LEADING_DASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*").expect("valid regex")
});

/// One dash separator at the end of a title
#[allow(clippy::expect_used)]
static TRAILING_DASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*-\s*$").expect("valid regex")
});

/// Final ` - Word` / ` | Word` segment naming the site; no digits
#[allow(clippy::expect_used)]
static SITE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[-–—|]\s+[^\s\d]+$").expect("valid regex")
});

/// Where a raw title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleOrigin {
    /// `<title>` or a `meta` tag: the page naming itself, often with the site.
    Declared,
    /// Headings, class hooks and site routines.
    Content,
}

/// Collapse every whitespace run to a single space and trim.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// Remove one leading and one trailing `-` separator.
#[must_use]
pub fn strip_dashes(s: &str) -> String {
    let s = LEADING_DASH.replace(s, "");
    TRAILING_DASH.replace(&s, "").into_owned()
}

/// Remove a trailing single-word site segment (`"My Video - Site"`).
///
/// Only applies when something is left in front of the separator. A
/// segment with a digit (`- 12`, `- S01E05`) is an episode marker and stays.
#[must_use]
pub fn strip_site_suffix(s: &str) -> String {
    match SITE_SUFFIX.find(s) {
        Some(m) if m.start() > 0 => s[..m.start()].to_string(),
        _ => s.to_string(),
    }
}

/// Clamp to `max_chars` characters, appending `...` when truncated.
#[must_use]
pub fn clamp_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut clamped: String = s.chars().take(max_chars).collect();
    clamped.push_str(ELLIPSIS);
    clamped
}

/// Produce the published title from a raw candidate.
///
/// Never returns an empty string: empty input maps to `"Unknown Title"`.
#[must_use]
pub fn clean_title(raw: &str, origin: TitleOrigin, opts: &Options) -> String {
    let mut title = strip_dashes(&collapse_whitespace(raw));

    if opts.strip_site_suffix && origin == TitleOrigin::Declared {
        title = strip_site_suffix(&title);
    }

    let title = title.trim();
    if title.is_empty() {
        return UNKNOWN_TITLE.to_string();
    }

    clamp_chars(title, opts.max_title_chars)
}
