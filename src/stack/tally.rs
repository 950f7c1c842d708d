// src/stack/tally.rs
// =============================================================================
// This module turns per-repository language maps into a ranked list.
//
// Steps:
// 1. Sum bytes per language across all repositories (skipped languages are
//    never added)
// 2. Drop languages whose share of the grand total is below min_percent
// 3. Sort by bytes, largest first; equal byte counts are ordered by name
//
// The percentage filter runs on the summed totals, never per repository.
// =============================================================================

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;

use super::badges::is_skipped;

/// Languages under this share of the total bytes (in percent) are ignored.
pub const DEFAULT_MIN_PERCENT: f64 = 0.5;

/// Language name -> bytes summed across every counted repository.
pub type Tally = HashMap<String, u64>;

/// One entry of the ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Share of the total bytes, 0-100
    pub percent: f64,
}

/// Sums byte counts per language, leaving out the skip list.
pub fn aggregate<'a, I>(maps: I) -> Tally
where
    I: IntoIterator<Item = &'a HashMap<String, u64>>,
{
    let mut totals = Tally::new();

    for map in maps {
        for (language, bytes) in map {
            if is_skipped(language) {
                continue;
            }
            let total = totals.entry(language.clone()).or_insert(0);
            *total = total.saturating_add(*bytes);
        }
    }

    totals
}

/// Filters a tally by minimum share and sorts it, largest first.
///
/// Returns an empty list when there is nothing to rank.
pub fn rank(tally: &Tally, min_percent: f64) -> Vec<LanguageShare> {
    let total = tally.values().fold(0u64, |sum, &bytes| sum.saturating_add(bytes));
    if total == 0 {
        return Vec::new();
    }

    // bytes / total * 100 >= min_percent, rearranged to avoid the division
    // so that exact boundaries (e.g. 5 of 1000 at 0.5%) are kept
    let threshold = min_percent * total as f64;

    let mut ranked: Vec<LanguageShare> = tally
        .iter()
        .filter(|(_, &bytes)| bytes > 0 && bytes as f64 * 100.0 >= threshold)
        .map(|(name, &bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percent: bytes as f64 * 100.0 / total as f64,
        })
        .collect();

    ranked.sort_by(|a, b| {
        Reverse(a.bytes)
            .cmp(&Reverse(b.bytes))
            .then_with(|| a.name.cmp(&b.name))
    });

    ranked
}
