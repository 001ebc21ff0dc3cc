//! Review-progress statistics for the queue header.

use super::*;

impl MatchDb {
    /// Count every recorded unmatched name by its current ledger standing.
    ///
    /// Status is derived from the ledger per name rather than read from the
    /// `is_resolved` flag, so the counts stay honest even if the flag and
    /// ledger ever disagree. The queue is at most a few hundred names, so
    /// the per-name ledger read is not worth a join.
    pub fn get_match_statistics(&self) -> Result<MatchStatistics, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT raw_name, occurrence_count FROM unmatched_mbc_names")?;
        let names: Vec<(String, i64)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stats = MatchStatistics {
            total_unmatched: names.len() as i64,
            unresolved: 0,
            matched: 0,
            skipped: 0,
            marked_invalid: 0,
            create_new: 0,
            total_sightings: 0,
        };

        for (raw_name, occurrences) in &names {
            stats.total_sightings += occurrences;
            match self.current_decision(raw_name)?.map(|d| d.action) {
                None => stats.unresolved += 1,
                Some(MatchAction::Matched) => stats.matched += 1,
                Some(MatchAction::Skipped) => stats.skipped += 1,
                Some(MatchAction::MarkedInvalid) => stats.marked_invalid += 1,
                Some(MatchAction::CreateNew) => stats.create_new += 1,
                // current_decision never returns an undo marker.
                Some(MatchAction::Undone) => stats.unresolved += 1,
            }
        }

        Ok(stats)
    }
}
