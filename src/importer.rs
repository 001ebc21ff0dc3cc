//! Counselor assignment step for the progress-record import pipeline.
//!
//! The CSV importer calls [`assign_counselor`] once per progress record.
//! It is the only place automatic matching, the stored mapping table, and
//! the reviewer ledger meet: prior decisions and stored mappings are reused
//! before the engine runs, and anything the engine cannot settle at high
//! confidence lands in the manual review queue instead of being guessed.

use chrono::Utc;

use crate::db::{DbAdult, DbError, DbNameMapping, MatchDb, Resolution};
use crate::engine::{self, DEFAULT_MIN_CONFIDENCE};

/// Minimum engine confidence for linking a record without review.
pub const AUTO_MATCH_THRESHOLD: f64 = 0.9;

/// Outcome of the per-record assignment step.
#[derive(Debug, Clone, PartialEq)]
pub enum CounselorAssignment {
    /// The record carried no counselor name.
    NoCounselor,
    /// Linked automatically, either by a fresh engine run at or above the
    /// threshold or by reusing a mapping stored on an earlier run.
    Auto { adult_id: i64, confidence: f64 },
    /// A reviewer decision already links this name to an adult.
    Manual { adult_id: i64 },
    /// A reviewer decided this name must not be linked.
    Rejected,
    /// Queued for manual review; candidates are cached on the queue row.
    NeedsReview,
}

impl CounselorAssignment {
    /// The adult to assign on the progress record, if any.
    pub fn adult_id(&self) -> Option<i64> {
        match self {
            CounselorAssignment::Auto { adult_id, .. }
            | CounselorAssignment::Manual { adult_id } => Some(*adult_id),
            _ => None,
        }
    }
}

/// Resolve the counselor name on one progress record.
///
/// Precedence: reviewer decisions first, then mappings stored by earlier
/// import runs, then a fresh engine run. Only a best candidate at or above
/// `threshold` links automatically; everything else is recorded as a
/// sighting with its candidate list cached for the review queue.
pub fn assign_counselor(
    db: &MatchDb,
    adults: &[DbAdult],
    raw_name: &str,
    threshold: f64,
) -> Result<CounselorAssignment, DbError> {
    let raw_name = raw_name.trim();
    if raw_name.is_empty() {
        return Ok(CounselorAssignment::NoCounselor);
    }

    match db.resolve(raw_name)? {
        Resolution::Matched { adult_id, .. } => {
            return Ok(CounselorAssignment::Manual { adult_id });
        }
        Resolution::Rejected { .. } => {
            // Keep occurrence counts honest even for names a reviewer has
            // written off; the resolved flag keeps them out of the queue.
            db.record_sighting(raw_name)?;
            return Ok(CounselorAssignment::Rejected);
        }
        Resolution::Unresolved => {}
    }

    if let Some(mapping) = db.get_mapping(raw_name)? {
        return Ok(CounselorAssignment::Auto {
            adult_id: mapping.adult_id,
            confidence: mapping.confidence,
        });
    }

    let candidates = engine::find_matches(raw_name, adults, DEFAULT_MIN_CONFIDENCE);
    if let Some(best) = candidates.first() {
        if best.confidence >= threshold {
            db.store_mapping(&DbNameMapping {
                raw_name: raw_name.to_string(),
                adult_id: best.adult_id,
                confidence: best.confidence,
                match_tier: best.tier.as_str().to_string(),
                created_by: "system".to_string(),
                created_at: Utc::now().to_rfc3339(),
            })?;
            log::info!(
                "Auto-matched '{}' to adult {} at {:.2} ({})",
                raw_name,
                best.adult_id,
                best.confidence,
                best.tier.as_str()
            );
            return Ok(CounselorAssignment::Auto {
                adult_id: best.adult_id,
                confidence: best.confidence,
            });
        }
    }

    db.record_sighting(raw_name)?;
    db.refresh_candidates(raw_name, &candidates)?;
    log::debug!(
        "'{}' needs review ({} candidate(s) below threshold {:.2})",
        raw_name,
        candidates.len(),
        threshold
    );
    Ok(CounselorAssignment::NeedsReview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_utils::test_db;
    use crate::db::{MatchAction, NewDecision};

    fn adult(id: i64, first: &str, last: &str) -> DbAdult {
        DbAdult {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: None,
            bsa_number: None,
        }
    }

    fn roster() -> Vec<DbAdult> {
        vec![adult(3, "John", "Smith"), adult(7, "Michael", "Johnson")]
    }

    #[test]
    fn test_blank_name_means_no_counselor() {
        let db = test_db();
        for raw in ["", "   "] {
            let result = assign_counselor(&db, &roster(), raw, AUTO_MATCH_THRESHOLD)
                .expect("assign");
            assert_eq!(result, CounselorAssignment::NoCounselor);
        }
    }

    #[test]
    fn test_exact_name_auto_matches_and_stores_mapping() {
        let db = test_db();
        let result = assign_counselor(&db, &roster(), "Smith, John", AUTO_MATCH_THRESHOLD)
            .expect("assign");
        assert_eq!(
            result,
            CounselorAssignment::Auto {
                adult_id: 3,
                confidence: 1.0,
            }
        );

        let mapping = db.get_mapping("Smith, John").expect("get").expect("stored");
        assert_eq!(mapping.adult_id, 3);
        assert_eq!(mapping.match_tier, "exact");
        assert_eq!(mapping.created_by, "system");

        // Auto-matched names never enter the review queue.
        assert!(db.get_unmatched_name("Smith, John").expect("get").is_none());
    }

    #[test]
    fn test_stored_mapping_reused_without_engine_run() {
        let db = test_db();
        assign_counselor(&db, &roster(), "Mike Johnson", AUTO_MATCH_THRESHOLD).expect("first");

        // Same name on a later run with an empty roster still resolves.
        let result = assign_counselor(&db, &[], "Mike Johnson", AUTO_MATCH_THRESHOLD)
            .expect("second");
        assert_eq!(
            result,
            CounselorAssignment::Auto {
                adult_id: 7,
                confidence: 0.95,
            }
        );
    }

    #[test]
    fn test_low_confidence_name_queued_for_review() {
        let db = test_db();
        let result = assign_counselor(&db, &roster(), "Jhn Smth", AUTO_MATCH_THRESHOLD)
            .expect("assign");
        assert_eq!(result, CounselorAssignment::NeedsReview);

        let row = db.get_unmatched_name("Jhn Smth").expect("get").expect("queued");
        assert_eq!(row.occurrence_count, 1);
        assert!(!row.potential_matches.is_empty());
        assert_eq!(row.potential_matches[0].adult_id, 3);
    }

    #[test]
    fn test_repeat_sightings_accumulate() {
        let db = test_db();
        for _ in 0..3 {
            assign_counselor(&db, &roster(), "Nobody Known", AUTO_MATCH_THRESHOLD)
                .expect("assign");
        }
        let row = db
            .get_unmatched_name("Nobody Known")
            .expect("get")
            .expect("queued");
        assert_eq!(row.occurrence_count, 3);
    }

    #[test]
    fn test_reviewer_match_takes_precedence() {
        let db = test_db();
        db.append_decision(&NewDecision::matched("Jhn Smth", 7, Some(0.6), "alice"))
            .expect("decision");

        let result = assign_counselor(&db, &roster(), "Jhn Smth", AUTO_MATCH_THRESHOLD)
            .expect("assign");
        assert_eq!(result, CounselorAssignment::Manual { adult_id: 7 });
        assert_eq!(result.adult_id(), Some(7));
    }

    #[test]
    fn test_rejected_name_not_linked_but_counted() {
        let db = test_db();
        db.record_sighting("Troop 42").expect("sighting");
        db.append_decision(&NewDecision::plain("Troop 42", MatchAction::MarkedInvalid, "alice"))
            .expect("decision");

        let result = assign_counselor(&db, &roster(), "Troop 42", AUTO_MATCH_THRESHOLD)
            .expect("assign");
        assert_eq!(result, CounselorAssignment::Rejected);
        assert_eq!(result.adult_id(), None);

        let row = db.get_unmatched_name("Troop 42").expect("get").expect("exists");
        assert_eq!(row.occurrence_count, 2);
        assert!(row.is_resolved, "rejected names stay out of the queue");
    }
}
