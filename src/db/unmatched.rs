//! Store for raw counselor names that failed automatic resolution.
//!
//! One row per distinct raw string. Repeat sightings across import runs
//! increment the occurrence count; the count drives review-queue ordering
//! so the names blocking the most progress records surface first.

use chrono::Utc;
use rusqlite::params;

use super::*;
use crate::engine::MatchCandidate;

impl MatchDb {
    /// Record one sighting of an unmatched raw name.
    ///
    /// Creates the row on first sighting, increments the occurrence count
    /// on every subsequent one. Single-statement upsert: concurrent import
    /// runs racing on the same name both land as increments, never as
    /// duplicate rows.
    pub fn record_sighting(&self, raw_name: &str) -> Result<(), DbError> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO unmatched_mbc_names (raw_name, occurrence_count, created_at, updated_at)
             VALUES (?1, 1, ?2, ?2)
             ON CONFLICT(raw_name) DO UPDATE SET
                occurrence_count = occurrence_count + 1,
                updated_at = excluded.updated_at",
            params![raw_name, now],
        )?;
        log::debug!("Recorded sighting of unmatched MBC name '{raw_name}'");
        Ok(())
    }

    /// Overwrite the cached candidate list for a name.
    ///
    /// Display state only — the review UI shows these without re-running
    /// the engine. No-op if the name has never been sighted.
    pub fn refresh_candidates(
        &self,
        raw_name: &str,
        candidates: &[MatchCandidate],
    ) -> Result<(), DbError> {
        let payload = serde_json::to_string(candidates)?;
        self.conn.execute(
            "UPDATE unmatched_mbc_names
             SET potential_matches = ?1, updated_at = ?2
             WHERE raw_name = ?3",
            params![payload, Utc::now().to_rfc3339(), raw_name],
        )?;
        Ok(())
    }

    /// Names still awaiting a reviewer decision, most-sighted first.
    ///
    /// The occurrence-count-descending order is a contract with the review
    /// UI, not an implementation detail: resolving the top of this list
    /// unblocks the most progress records.
    pub fn get_unresolved(&self, filter: &UnresolvedFilter) -> Result<Vec<DbUnmatchedName>, DbError> {
        let pattern = filter
            .name_contains
            .as_deref()
            .map(|s| format!("%{}%", s.to_lowercase()));
        let mut stmt = self.conn.prepare(
            "SELECT raw_name, occurrence_count, potential_matches, is_resolved,
                    notes, created_at, updated_at
             FROM unmatched_mbc_names
             WHERE is_resolved = 0
               AND (?1 IS NULL OR occurrence_count >= ?1)
               AND (?2 IS NULL OR instr(lower(raw_name), ?2) > 0)
             ORDER BY occurrence_count DESC, raw_name",
        )?;
        let rows = stmt.query_map(
            params![filter.min_occurrences, pattern],
            Self::map_unmatched_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Get one unmatched-name row by its raw string key.
    pub fn get_unmatched_name(&self, raw_name: &str) -> Result<Option<DbUnmatchedName>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT raw_name, occurrence_count, potential_matches, is_resolved,
                    notes, created_at, updated_at
             FROM unmatched_mbc_names WHERE raw_name = ?1",
        )?;
        let mut rows = stmt.query_map(params![raw_name], Self::map_unmatched_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    fn map_unmatched_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DbUnmatchedName> {
        let cached: String = row.get(2)?;
        Ok(DbUnmatchedName {
            raw_name: row.get(0)?,
            occurrence_count: row.get(1)?,
            // The cache is advisory; a corrupt payload degrades to "no
            // cached candidates" instead of failing the whole queue read.
            potential_matches: serde_json::from_str(&cached).unwrap_or_default(),
            is_resolved: row.get::<_, i64>(3)? != 0,
            notes: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_db;
    use super::*;
    use crate::scorer::MatchTier;

    fn candidate(adult_id: i64, confidence: f64) -> MatchCandidate {
        MatchCandidate {
            adult_id,
            name: format!("Adult {adult_id}"),
            confidence,
            tier: MatchTier::Fuzzy,
        }
    }

    #[test]
    fn test_sighting_count_accumulates() {
        let db = test_db();
        for _ in 0..5 {
            db.record_sighting("J. Smyth").expect("sighting");
        }

        let row = db.get_unmatched_name("J. Smyth").expect("get").expect("exists");
        assert_eq!(row.occurrence_count, 5);
        assert!(!row.is_resolved);

        // Exactly one row despite repeat sightings.
        let all = db.get_unresolved(&UnresolvedFilter::default()).expect("queue");
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_refresh_candidates_roundtrip() {
        let db = test_db();
        db.record_sighting("Jon Smith").expect("sighting");
        db.refresh_candidates("Jon Smith", &[candidate(3, 0.95), candidate(7, 0.62)])
            .expect("refresh");

        let row = db.get_unmatched_name("Jon Smith").expect("get").expect("exists");
        assert_eq!(row.potential_matches.len(), 2);
        assert_eq!(row.potential_matches[0].adult_id, 3);

        // Overwrite, not append.
        db.refresh_candidates("Jon Smith", &[candidate(12, 0.80)]).expect("refresh");
        let row = db.get_unmatched_name("Jon Smith").expect("get").expect("exists");
        assert_eq!(row.potential_matches.len(), 1);
        assert_eq!(row.potential_matches[0].adult_id, 12);
    }

    #[test]
    fn test_unresolved_ordering_by_occurrence() {
        let db = test_db();
        db.record_sighting("Rare Name").expect("sighting");
        for _ in 0..3 {
            db.record_sighting("Common Name").expect("sighting");
        }

        let queue = db.get_unresolved(&UnresolvedFilter::default()).expect("queue");
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].raw_name, "Common Name");
        assert_eq!(queue[1].raw_name, "Rare Name");
    }

    #[test]
    fn test_unresolved_filters() {
        let db = test_db();
        db.record_sighting("Al Borland").expect("sighting");
        for _ in 0..4 {
            db.record_sighting("Wilson Wilson").expect("sighting");
        }

        let frequent = db
            .get_unresolved(&UnresolvedFilter {
                min_occurrences: Some(2),
                name_contains: None,
            })
            .expect("queue");
        assert_eq!(frequent.len(), 1);
        assert_eq!(frequent[0].raw_name, "Wilson Wilson");

        let by_substring = db
            .get_unresolved(&UnresolvedFilter {
                min_occurrences: None,
                name_contains: Some("borland".to_string()),
            })
            .expect("queue");
        assert_eq!(by_substring.len(), 1);
        assert_eq!(by_substring[0].raw_name, "Al Borland");
    }

    #[test]
    fn test_refresh_for_unknown_name_is_noop() {
        let db = test_db();
        db.refresh_candidates("never seen", &[candidate(1, 0.5)]).expect("refresh");
        assert!(db.get_unmatched_name("never seen").expect("get").is_none());
    }
}
