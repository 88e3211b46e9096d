//! Mirror link deduplication.
//!
//! Order-preserving, first-occurrence-wins filter keyed on the normalized
//! URL. Later duplicates are discarded whole; fields are never merged.

use std::collections::HashSet;

use crate::result::MirrorLink;
use crate::url_utils;

/// Collapse candidates to one entry per unique URL, keeping the first.
#[must_use]
pub fn dedup_by_url(candidates: Vec<MirrorLink>) -> Vec<MirrorLink> {
    let mut seen = HashSet::with_capacity(candidates.len());

    candidates
        .into_iter()
        .filter(|link| seen.insert(url_utils::dedup_key(&link.url)))
        .collect()
}
