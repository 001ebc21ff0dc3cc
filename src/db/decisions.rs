//! Append-only ledger of reviewer decisions about unmatched names.
//!
//! Rows are never updated or deleted. A correction is a new `undone` row
//! pointing at the entry it reverses, optionally followed by a fresh
//! decision. The current resolution of a name is always derived by reading
//! the ledger — there is no stored "current" pointer to go stale. The
//! `is_resolved` display flag on `unmatched_mbc_names` is recomputed from
//! the ledger inside the same transaction as every append.

use chrono::Utc;
use rusqlite::params;

use super::*;

impl MatchDb {
    /// Append a reviewer decision to the ledger.
    ///
    /// Validation, all checked before anything is written:
    /// - `matched` requires an adult id; every other action forbids one;
    /// - `undone` requires a reference to a prior decision for the same
    ///   name; every other action forbids one;
    /// - the referenced decision must exist (`DecisionNotFound` otherwise),
    ///   must not itself be an undo marker, and must not already have been
    ///   undone.
    ///
    /// Returns the new ledger entry's id.
    pub fn append_decision(&self, decision: &NewDecision) -> Result<i64, DbError> {
        match decision.action {
            MatchAction::Matched => {
                if decision.adult_id.is_none() {
                    return Err(DbError::Validation(
                        "a 'matched' decision requires a target adult id".to_string(),
                    ));
                }
                if decision.undoes_decision_id.is_some() {
                    return Err(DbError::Validation(
                        "a 'matched' decision cannot reference a prior decision".to_string(),
                    ));
                }
            }
            MatchAction::Skipped | MatchAction::MarkedInvalid | MatchAction::CreateNew => {
                if decision.adult_id.is_some() {
                    return Err(DbError::Validation(format!(
                        "a '{}' decision cannot carry a target adult id",
                        decision.action.as_str()
                    )));
                }
                if decision.undoes_decision_id.is_some() {
                    return Err(DbError::Validation(format!(
                        "a '{}' decision cannot reference a prior decision",
                        decision.action.as_str()
                    )));
                }
            }
            MatchAction::Undone => {
                if decision.undoes_decision_id.is_none() {
                    return Err(DbError::Validation(
                        "an 'undone' decision must reference the decision it reverses".to_string(),
                    ));
                }
                if decision.adult_id.is_some() {
                    return Err(DbError::Validation(
                        "an 'undone' decision cannot carry a target adult id".to_string(),
                    ));
                }
            }
        }

        self.with_transaction(|tx| {
            if let Some(target_id) = decision.undoes_decision_id {
                tx.validate_undo_target(&decision.raw_name, target_id)?;
            }

            tx.conn.execute(
                "INSERT INTO mbc_manual_decisions
                    (raw_name, action, adult_id, confidence, decided_by, notes,
                     undoes_decision_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    decision.raw_name,
                    decision.action.as_str(),
                    decision.adult_id,
                    decision.confidence,
                    decision.decided_by,
                    decision.notes,
                    decision.undoes_decision_id,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            let id = tx.conn.last_insert_rowid();

            tx.sync_resolution_flag(&decision.raw_name)?;

            log::info!(
                "Ledger: {} appended '{}' for '{}' (id {})",
                decision.decided_by,
                decision.action.as_str(),
                decision.raw_name,
                id
            );
            Ok(id)
        })
    }

    /// Check that an undo target exists for this name, is a real decision
    /// rather than an undo marker, and has not already been undone.
    fn validate_undo_target(&self, raw_name: &str, target_id: i64) -> Result<(), DbError> {
        let target_action: Option<String> = self
            .conn
            .query_row(
                "SELECT action FROM mbc_manual_decisions
                 WHERE id = ?1 AND raw_name = ?2",
                params![target_id, raw_name],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        let Some(action) = target_action else {
            return Err(DbError::DecisionNotFound {
                raw_name: raw_name.to_string(),
                decision_id: target_id,
            });
        };

        if action == "undone" {
            return Err(DbError::Validation(format!(
                "decision {target_id} is an undo marker and cannot itself be undone"
            )));
        }

        let already_undone: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM mbc_manual_decisions WHERE undoes_decision_id = ?1)",
            params![target_id],
            |row| row.get(0),
        )?;
        if already_undone {
            return Err(DbError::Validation(format!(
                "decision {target_id} has already been undone"
            )));
        }

        Ok(())
    }

    /// Full chronological decision history for a name, for audit display.
    pub fn decision_history(&self, raw_name: &str) -> Result<Vec<DbManualDecision>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, raw_name, action, adult_id, confidence, decided_by,
                    notes, undoes_decision_id, created_at
             FROM mbc_manual_decisions
             WHERE raw_name = ?1
             ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map(params![raw_name], Self::map_decision_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The decision currently in effect for a name, if any.
    ///
    /// Derived read: the latest entry (timestamp order, rowid tie-break)
    /// that is not an undo marker and has not been referenced by a later
    /// `undone` entry. Recomputed from the ledger on every call.
    pub fn current_decision(&self, raw_name: &str) -> Result<Option<DbManualDecision>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT d.id, d.raw_name, d.action, d.adult_id, d.confidence, d.decided_by,
                    d.notes, d.undoes_decision_id, d.created_at
             FROM mbc_manual_decisions d
             WHERE d.raw_name = ?1
               AND d.action != 'undone'
               AND NOT EXISTS (
                   SELECT 1 FROM mbc_manual_decisions u
                   WHERE u.undoes_decision_id = d.id
               )
             ORDER BY d.created_at DESC, d.id DESC
             LIMIT 1",
        )?;
        let mut rows = stmt.query_map(params![raw_name], Self::map_decision_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Recompute the advisory `is_resolved` flag from the ledger. No-op
    /// when the name was never recorded as unmatched.
    fn sync_resolution_flag(&self, raw_name: &str) -> Result<(), DbError> {
        let resolved = self.current_decision(raw_name)?.is_some();
        self.conn.execute(
            "UPDATE unmatched_mbc_names
             SET is_resolved = ?1, updated_at = ?2
             WHERE raw_name = ?3",
            params![resolved as i64, Utc::now().to_rfc3339(), raw_name],
        )?;
        Ok(())
    }

    fn map_decision_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DbManualDecision> {
        let action: String = row.get(2)?;
        Ok(DbManualDecision {
            id: row.get(0)?,
            raw_name: row.get(1)?,
            action: MatchAction::from_str_lossy(&action),
            adult_id: row.get(3)?,
            confidence: row.get(4)?,
            decided_by: row.get(5)?,
            notes: row.get(6)?,
            undoes_decision_id: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}
