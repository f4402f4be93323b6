//! Tiered name matching against remote catalogs.
//!
//! A local key is looked up in three tiers, stopping at the first hit:
//!
//! 1. **Exact**: the key is present in the catalog.
//! 2. **Fuzzy**: the catalog key with the highest normalized Levenshtein
//!    similarity, if it reaches [`FUZZY_THRESHOLD`].
//! 3. **Substring**: one key contains the other and both are longer than
//!    [`MIN_SUBSTRING_LEN`] characters.
//!
//! Ties are broken by ascending catalog key, so results are deterministic.

use std::fmt;

use retro_cloud_core::System;

use crate::catalog::{CatalogCache, RemoteCatalog};
use crate::source::ThumbnailSource;

/// Minimum similarity accepted by the fuzzy tier.
pub const FUZZY_THRESHOLD: f64 = 0.6;

/// Both operands of a substring match must be longer than this.
pub const MIN_SUBSTRING_LEN: usize = 5;

/// Which tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Fuzzy,
    Substring,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Substring => write!(f, "substring"),
        }
    }
}

/// A resolved remote cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub collection: String,
    /// Catalog key that matched.
    pub key: String,
    /// Remote file name to fetch.
    pub file_name: String,
    pub tier: MatchTier,
    /// Similarity between the local key and `key` (1.0 for exact).
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Run the fuzzy and substring tiers. When false only exact keys match.
    pub fuzzy: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { fuzzy: true }
    }
}

/// A fuzzy candidate reported by [`candidates`].
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub key: String,
    pub file_name: String,
    pub score: f64,
}

/// Symmetric similarity in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Resolve a normalized key against one catalog.
pub fn resolve(key: &str, catalog: &RemoteCatalog, options: MatchOptions) -> Option<Match> {
    if key.is_empty() {
        return None;
    }
    let found = exact(key, catalog).or_else(|| {
        if options.fuzzy {
            fuzzy(key, catalog).or_else(|| substring(key, catalog))
        } else {
            None
        }
    });
    found.map(|(catalog_key, file_name, tier, score)| Match {
        collection: catalog.collection().to_string(),
        key: catalog_key.to_string(),
        file_name: file_name.to_string(),
        tier,
        score,
    })
}

type Hit<'a> = (&'a str, &'a str, MatchTier, f64);

fn exact<'a>(key: &str, catalog: &'a RemoteCatalog) -> Option<Hit<'a>> {
    catalog
        .get_key_value(key)
        .map(|(k, file)| (k, file, MatchTier::Exact, 1.0))
}

fn fuzzy<'a>(key: &str, catalog: &'a RemoteCatalog) -> Option<Hit<'a>> {
    let mut best: Option<Hit<'a>> = None;
    for (k, file) in catalog.iter() {
        let score = similarity(key, k);
        // Strictly greater keeps the earliest key on ties.
        if best.is_none_or(|(_, _, _, s)| score > s) {
            best = Some((k, file, MatchTier::Fuzzy, score));
        }
    }
    best.filter(|(_, _, _, score)| *score >= FUZZY_THRESHOLD)
}

fn substring<'a>(key: &str, catalog: &'a RemoteCatalog) -> Option<Hit<'a>> {
    let key_len = key.chars().count();
    if key_len <= MIN_SUBSTRING_LEN {
        return None;
    }
    let mut best: Option<(usize, Hit<'a>)> = None;
    for (k, file) in catalog.iter() {
        let len = k.chars().count();
        if len <= MIN_SUBSTRING_LEN || !(k.contains(key) || key.contains(k)) {
            continue;
        }
        let diff = len.abs_diff(key_len);
        if best.as_ref().is_none_or(|(d, _)| diff < *d) {
            best = Some((diff, (k, file, MatchTier::Substring, similarity(key, k))));
        }
    }
    best.map(|(_, hit)| hit)
}

/// Try each of the system's collections in priority order and return the
/// first match. Collections whose listing failed are skipped.
pub fn resolve_across(
    key: &str,
    system: System,
    cache: &mut CatalogCache,
    source: &dyn ThumbnailSource,
    options: MatchOptions,
) -> Option<Match> {
    resolve_in(key, system.thumbnail_collections(), cache, source, options)
}

/// Like [`resolve_across`] with an explicit collection list.
pub fn resolve_in(
    key: &str,
    collections: &[&str],
    cache: &mut CatalogCache,
    source: &dyn ThumbnailSource,
    options: MatchOptions,
) -> Option<Match> {
    for collection in collections {
        let Some(catalog) = cache.get_or_fetch(source, collection) else {
            continue;
        };
        if let Some(found) = resolve(key, catalog, options) {
            log::debug!(
                "'{}' -> '{}' in {} ({}, {:.2})",
                key,
                found.file_name,
                collection,
                found.tier,
                found.score
            );
            return Some(found);
        }
    }
    None
}

/// The `limit` catalog keys most similar to `key` with a score of at least
/// `cutoff`, best first.
pub fn candidates(key: &str, catalog: &RemoteCatalog, limit: usize, cutoff: f64) -> Vec<Candidate> {
    let mut scored: Vec<Candidate> = catalog
        .iter()
        .map(|(k, file)| Candidate {
            key: k.to_string(),
            file_name: file.to_string(),
            score: similarity(key, k),
        })
        .filter(|c| c.score >= cutoff)
        .collect();
    // Stable sort keeps ascending key order among equal scores.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
