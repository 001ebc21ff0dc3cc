//! Shared type definitions for the database layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::MatchCandidate;

/// Errors specific to database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to create database directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Schema migration failed: {0}")]
    Migration(String),

    #[error("Invalid decision: {0}")]
    Validation(String),

    #[error("Decision {decision_id} not found in the ledger for '{raw_name}'")]
    DecisionNotFound { raw_name: String, decision_id: i64 },

    #[error("Candidate cache serialization failed: {0}")]
    CandidateJson(#[from] serde_json::Error),
}

/// A row from the `adults` table — one registered adult from the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbAdult {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub bsa_number: Option<i64>,
}

/// A row from `unmatched_mbc_names` — one distinct raw counselor name that
/// failed automatic resolution.
///
/// `potential_matches` is an advisory display cache of the last engine run;
/// the decision ledger, not this row, is authoritative for resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbUnmatchedName {
    pub raw_name: String,
    pub occurrence_count: i64,
    pub potential_matches: Vec<MatchCandidate>,
    pub is_resolved: bool,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A human reviewer's decision about an unmatched name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAction {
    /// Resolved to a roster adult. Requires `adult_id`.
    Matched,
    /// Deferred — left in the queue for later.
    Skipped,
    /// Not a real counselor name (test data, garbage).
    MarkedInvalid,
    /// Refers to a real person missing from the roster.
    CreateNew,
    /// Reverses a prior decision. Requires `undoes_decision_id`.
    Undone,
}

impl MatchAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchAction::Matched => "matched",
            MatchAction::Skipped => "skipped",
            MatchAction::MarkedInvalid => "marked_invalid",
            MatchAction::CreateNew => "create_new",
            MatchAction::Undone => "undone",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "matched" => MatchAction::Matched,
            "skipped" => MatchAction::Skipped,
            "marked_invalid" => MatchAction::MarkedInvalid,
            "create_new" => MatchAction::CreateNew,
            _ => MatchAction::Undone,
        }
    }
}

/// A row from the append-only `mbc_manual_decisions` ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbManualDecision {
    pub id: i64,
    pub raw_name: String,
    pub action: MatchAction,
    pub adult_id: Option<i64>,
    pub confidence: Option<f64>,
    pub decided_by: String,
    pub notes: Option<String>,
    /// Set only when `action` is `Undone`: the decision being reversed.
    pub undoes_decision_id: Option<i64>,
    pub created_at: String,
}

/// Input for appending a ledger entry. Id and timestamp are assigned by
/// the ledger itself.
#[derive(Debug, Clone)]
pub struct NewDecision {
    pub raw_name: String,
    pub action: MatchAction,
    pub adult_id: Option<i64>,
    pub confidence: Option<f64>,
    pub decided_by: String,
    pub notes: Option<String>,
    pub undoes_decision_id: Option<i64>,
}

impl NewDecision {
    /// A terminal decision with no adult target.
    pub fn plain(raw_name: &str, action: MatchAction, decided_by: &str) -> Self {
        NewDecision {
            raw_name: raw_name.to_string(),
            action,
            adult_id: None,
            confidence: None,
            decided_by: decided_by.to_string(),
            notes: None,
            undoes_decision_id: None,
        }
    }

    /// A `matched` decision targeting a roster adult.
    pub fn matched(raw_name: &str, adult_id: i64, confidence: Option<f64>, decided_by: &str) -> Self {
        NewDecision {
            raw_name: raw_name.to_string(),
            action: MatchAction::Matched,
            adult_id: Some(adult_id),
            confidence,
            decided_by: decided_by.to_string(),
            notes: None,
            undoes_decision_id: None,
        }
    }

    /// An `undone` decision reversing a prior ledger entry.
    pub fn undo(raw_name: &str, undoes_decision_id: i64, decided_by: &str) -> Self {
        NewDecision {
            raw_name: raw_name.to_string(),
            action: MatchAction::Undone,
            adult_id: None,
            confidence: None,
            decided_by: decided_by.to_string(),
            notes: None,
            undoes_decision_id: Some(undoes_decision_id),
        }
    }
}

/// Optional narrowing for the review queue.
#[derive(Debug, Clone, Default)]
pub struct UnresolvedFilter {
    /// Only names sighted at least this many times.
    pub min_occurrences: Option<i64>,
    /// Only names containing this substring (case-insensitive).
    pub name_contains: Option<String>,
}

/// A row from `mbc_name_mappings` — a durable record of an automatic
/// high-confidence match made during import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbNameMapping {
    pub raw_name: String,
    pub adult_id: i64,
    pub confidence: f64,
    pub match_tier: String,
    pub created_by: String,
    pub created_at: String,
}

/// Aggregate review-progress counts for the queue header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatistics {
    pub total_unmatched: i64,
    pub unresolved: i64,
    pub matched: i64,
    pub skipped: i64,
    pub marked_invalid: i64,
    pub create_new: i64,
    pub total_sightings: i64,
}
