//! Candidate ranking: score one raw counselor name against the full adult
//! roster.
//!
//! The roster tops out in the low hundreds, so every query is an exhaustive
//! scan — no index, no shortcutting. The engine is a pure query; callers
//! decide whether to persist the result as a sighting, a cached candidate
//! list, or an automatic match.

use serde::{Deserialize, Serialize};

use crate::db::DbAdult;
use crate::normalize::normalize;
use crate::scorer::{self, MatchTier};

/// Default floor below which candidates are not returned at all.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.4;

/// Ranked lists are capped at this many candidates.
pub const MAX_CANDIDATES: usize = 10;

/// One ranked roster candidate for a raw name. Transient — persisted only
/// as part of an unmatched name's cached candidate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub adult_id: i64,
    pub name: String,
    pub confidence: f64,
    pub tier: MatchTier,
}

/// Rank roster candidates for a raw counselor name.
///
/// Returns candidates at or above `min_confidence`, sorted by confidence
/// descending with ties broken by adult id ascending, capped at
/// [`MAX_CANDIDATES`]. Empty input, an empty roster, or no qualifying
/// candidate all yield an empty list.
pub fn find_matches(raw_name: &str, adults: &[DbAdult], min_confidence: f64) -> Vec<MatchCandidate> {
    let query = normalize(raw_name);
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<MatchCandidate> = Vec::new();
    for adult in adults {
        let full_name = format!("{} {}", adult.first_name, adult.last_name);
        let candidate = normalize(&full_name);
        if let Some(s) = scorer::score(&query, &candidate) {
            if s.confidence >= min_confidence {
                matches.push(MatchCandidate {
                    adult_id: adult.id,
                    name: full_name,
                    confidence: s.confidence,
                    tier: s.tier,
                });
            }
        }
    }

    matches.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.adult_id.cmp(&b.adult_id))
    });
    matches.truncate(MAX_CANDIDATES);

    log::debug!(
        "find_matches: {} candidate(s) for '{}' at floor {:.2}",
        matches.len(),
        raw_name,
        min_confidence
    );
    matches
}
