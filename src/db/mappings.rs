//! Durable record of automatic matches made during import.
//!
//! When the engine scores a candidate above the auto-match threshold, the
//! importer records the link here so repeat imports reuse it instead of
//! re-running the engine. Audit trail and cache only: the decision ledger
//! always wins when a reviewer has weighed in on the same name.

use chrono::Utc;
use rusqlite::params;

use super::*;

impl MatchDb {
    /// Record (or replace) the automatic mapping for a raw name.
    pub fn store_mapping(&self, mapping: &DbNameMapping) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO mbc_name_mappings
                (raw_name, adult_id, confidence, match_tier, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(raw_name) DO UPDATE SET
                adult_id = excluded.adult_id,
                confidence = excluded.confidence,
                match_tier = excluded.match_tier,
                created_by = excluded.created_by,
                created_at = excluded.created_at",
            params![
                mapping.raw_name,
                mapping.adult_id,
                mapping.confidence,
                mapping.match_tier,
                mapping.created_by,
                mapping.created_at,
            ],
        )?;
        Ok(())
    }

    /// Look up the stored automatic mapping for a raw name, if any.
    pub fn get_mapping(&self, raw_name: &str) -> Result<Option<DbNameMapping>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT raw_name, adult_id, confidence, match_tier, created_by, created_at
             FROM mbc_name_mappings WHERE raw_name = ?1",
        )?;
        let mut rows = stmt.query_map(params![raw_name], |row| {
            Ok(DbNameMapping {
                raw_name: row.get(0)?,
                adult_id: row.get(1)?,
                confidence: row.get(2)?,
                match_tier: row.get(3)?,
                created_by: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_db;
    use super::*;

    fn mapping(raw_name: &str, adult_id: i64, confidence: f64) -> DbNameMapping {
        DbNameMapping {
            raw_name: raw_name.to_string(),
            adult_id,
            confidence,
            match_tier: "exact".to_string(),
            created_by: "system".to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_store_and_get_mapping() {
        let db = test_db();
        db.store_mapping(&mapping("John Smith", 7, 1.0)).expect("store");

        let stored = db.get_mapping("John Smith").expect("get").expect("exists");
        assert_eq!(stored.adult_id, 7);
        assert_eq!(stored.confidence, 1.0);
        assert_eq!(stored.match_tier, "exact");

        assert!(db.get_mapping("unknown").expect("get").is_none());
    }

    #[test]
    fn test_store_replaces_existing_mapping() {
        let db = test_db();
        db.store_mapping(&mapping("John Smith", 7, 0.95)).expect("store");
        db.store_mapping(&mapping("John Smith", 12, 1.0)).expect("replace");

        let stored = db.get_mapping("John Smith").expect("get").expect("exists");
        assert_eq!(stored.adult_id, 12);
        assert_eq!(stored.confidence, 1.0);
    }
}
