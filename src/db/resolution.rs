//! Projection of the decision ledger into a single answer per name.
//!
//! Import code asks one question about a raw name: "has a reviewer dealt
//! with this already, and how?" The answer is computed from the ledger on
//! every call, so an undo appended a moment ago is reflected immediately.

use serde::{Deserialize, Serialize};

use super::*;

/// Why a name was rejected rather than linked to an adult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Reviewer deferred the name; it stays out of the active queue.
    Skipped,
    /// The string is not a real person (unit name, garbage import data).
    MarkedInvalid,
    /// A real counselor missing from the roster; needs a roster entry.
    CreateNew,
}

/// The effective standing of a raw name after consulting the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Resolution {
    /// A reviewer linked this name to a roster adult.
    #[serde(rename_all = "camelCase")]
    Matched {
        adult_id: i64,
        confidence: Option<f64>,
        decided_by: String,
    },
    /// A reviewer decided the name should not be linked.
    Rejected { reason: RejectionReason },
    /// No decision in effect; the name belongs in the review queue.
    Unresolved,
}

impl MatchDb {
    /// Resolve a raw name against the decision ledger.
    ///
    /// Never errors for unknown names: a name with no ledger history (or
    /// whose decisions have all been undone) is simply `Unresolved`.
    pub fn resolve(&self, raw_name: &str) -> Result<Resolution, DbError> {
        let Some(decision) = self.current_decision(raw_name)? else {
            return Ok(Resolution::Unresolved);
        };

        let resolution = match decision.action {
            MatchAction::Matched => {
                let Some(adult_id) = decision.adult_id else {
                    // The ledger append validates this; a NULL here means
                    // the row was written by something other than this code.
                    return Err(DbError::Validation(format!(
                        "matched decision {} for '{}' has no adult id",
                        decision.id, raw_name
                    )));
                };
                Resolution::Matched {
                    adult_id,
                    confidence: decision.confidence,
                    decided_by: decision.decided_by,
                }
            }
            MatchAction::Skipped => Resolution::Rejected {
                reason: RejectionReason::Skipped,
            },
            MatchAction::MarkedInvalid => Resolution::Rejected {
                reason: RejectionReason::MarkedInvalid,
            },
            MatchAction::CreateNew => Resolution::Rejected {
                reason: RejectionReason::CreateNew,
            },
            // current_decision never returns an undo marker.
            MatchAction::Undone => Resolution::Unresolved,
        };
        Ok(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_db;
    use super::*;

    #[test]
    fn test_unknown_name_is_unresolved() {
        let db = test_db();
        let resolution = db.resolve("never seen").expect("resolve");
        assert_eq!(resolution, Resolution::Unresolved);
    }

    #[test]
    fn test_matched_resolution_carries_decision_fields() {
        let db = test_db();
        db.append_decision(&NewDecision::matched("J. Smyth", 7, Some(0.95), "alice"))
            .expect("append");

        let resolution = db.resolve("J. Smyth").expect("resolve");
        assert_eq!(
            resolution,
            Resolution::Matched {
                adult_id: 7,
                confidence: Some(0.95),
                decided_by: "alice".to_string(),
            }
        );
    }

    #[test]
    fn test_rejection_reasons_map_from_actions() {
        let db = test_db();
        let cases = [
            ("skip me", MatchAction::Skipped, RejectionReason::Skipped),
            ("Troop 42", MatchAction::MarkedInvalid, RejectionReason::MarkedInvalid),
            ("New Person", MatchAction::CreateNew, RejectionReason::CreateNew),
        ];
        for (name, action, reason) in cases {
            db.append_decision(&NewDecision::plain(name, action, "alice"))
                .expect("append");
            assert_eq!(
                db.resolve(name).expect("resolve"),
                Resolution::Rejected { reason }
            );
        }
    }

    #[test]
    fn test_undo_returns_name_to_unresolved() {
        let db = test_db();
        let id = db
            .append_decision(&NewDecision::matched("J. Smyth", 7, None, "alice"))
            .expect("append");
        db.append_decision(&NewDecision::undo("J. Smyth", id, "alice"))
            .expect("undo");

        assert_eq!(db.resolve("J. Smyth").expect("resolve"), Resolution::Unresolved);
    }

    #[test]
    fn test_latest_decision_wins() {
        let db = test_db();
        let skip = db
            .append_decision(&NewDecision::plain("J. Smyth", MatchAction::Skipped, "alice"))
            .expect("skip");
        db.append_decision(&NewDecision::undo("J. Smyth", skip, "bob"))
            .expect("undo");
        db.append_decision(&NewDecision::matched("J. Smyth", 12, Some(0.8), "bob"))
            .expect("match");

        assert_eq!(
            db.resolve("J. Smyth").expect("resolve"),
            Resolution::Matched {
                adult_id: 12,
                confidence: Some(0.8),
                decided_by: "bob".to_string(),
            }
        );
    }
}
