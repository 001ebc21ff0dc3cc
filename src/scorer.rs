//! Tiered confidence scoring between a query name and one roster candidate.
//!
//! Tiers are tried in priority order and the first qualifying tier wins;
//! scores are never combined across tiers. The constants are calibrated
//! against real Scoutbook exports — exact and nickname hits are near
//! certain, fuzzy hits carry their edit similarity, and a phonetic-only
//! hit is plausible but always worth human eyes.

use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedName;
use crate::phonetic::soundex;

/// Confidence assigned to a nickname-tier hit.
pub const NICKNAME_CONFIDENCE: f64 = 0.95;

/// Confidence assigned to a phonetic-tier hit.
pub const PHONETIC_CONFIDENCE: f64 = 0.80;

/// Fuzzy similarity below this floor is treated as no match at all.
pub const FUZZY_FLOOR: f64 = 0.4;

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Exact,
    Nickname,
    Fuzzy,
    Phonetic,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Nickname => "nickname",
            MatchTier::Fuzzy => "fuzzy",
            MatchTier::Phonetic => "phonetic",
        }
    }
}

/// A qualifying score: confidence in [0,1] plus the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierScore {
    pub confidence: f64,
    pub tier: MatchTier,
}

/// Score a normalized query against a normalized candidate.
///
/// Returns `None` when no tier qualifies, including whenever either side
/// normalized to nothing.
pub fn score(query: &NormalizedName, candidate: &NormalizedName) -> Option<TierScore> {
    if query.is_empty() || candidate.is_empty() {
        return None;
    }

    // Tier 1: exact — same tokens regardless of order, so "Smith, John"
    // meets "John Smith" here.
    if query.sorted_tokens() == candidate.sorted_tokens() {
        return Some(TierScore {
            confidence: 1.0,
            tier: MatchTier::Exact,
        });
    }

    // Tier 2: nickname-aware — same comparison after canonicalizing each
    // token ("mike" → "michael").
    if query.sorted_canonical_tokens() == candidate.sorted_canonical_tokens() {
        return Some(TierScore {
            confidence: NICKNAME_CONFIDENCE,
            tier: MatchTier::Nickname,
        });
    }

    // Tier 3: fuzzy — best normalized edit similarity across the joined
    // name in both token orders, to stay robust to "Last First" entry.
    let q = query.joined();
    let fuzzy = strsim::normalized_levenshtein(&q, &candidate.joined())
        .max(strsim::normalized_levenshtein(&q, &candidate.reordered()));
    if fuzzy >= FUZZY_FLOOR {
        return Some(TierScore {
            confidence: fuzzy,
            tier: MatchTier::Fuzzy,
        });
    }

    // Tier 4: phonetic — first and last tokens must both encode the same.
    // Requires a first and last name on each side; single-token strings
    // are too ambiguous to match on sound alone.
    if query.tokens.len() >= 2 && candidate.tokens.len() >= 2 {
        let (qf, ql) = (query.first().unwrap_or(""), query.last().unwrap_or(""));
        let (cf, cl) = (candidate.first().unwrap_or(""), candidate.last().unwrap_or(""));
        if soundex(qf) == soundex(cf) && soundex(ql) == soundex(cl) {
            return Some(TierScore {
                confidence: PHONETIC_CONFIDENCE,
                tier: MatchTier::Phonetic,
            });
        }
    }

    None
}
