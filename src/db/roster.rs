//! Read-only candidate roster view, plus the upserts the roster importer
//! uses to seed it.

use rusqlite::params;

use super::*;

impl MatchDb {
    /// Insert or update an adult roster entry. Contact fields are only
    /// overwritten when the incoming data provides them.
    pub fn upsert_adult(&self, adult: &DbAdult) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO adults (id, first_name, last_name, email, bsa_number)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                email = COALESCE(excluded.email, adults.email),
                bsa_number = COALESCE(excluded.bsa_number, adults.bsa_number)",
            params![
                adult.id,
                adult.first_name,
                adult.last_name,
                adult.email,
                adult.bsa_number,
            ],
        )?;
        Ok(())
    }

    /// All adults usable as match candidates, ordered by last then first
    /// name. Rows with a blank name never make useful candidates and are
    /// excluded here rather than special-cased in the scorer.
    pub fn get_adults(&self) -> Result<Vec<DbAdult>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, email, bsa_number
             FROM adults
             WHERE trim(first_name) != '' AND trim(last_name) != ''
             ORDER BY last_name, first_name",
        )?;
        let rows = stmt.query_map([], Self::map_adult_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Get a single adult by id.
    pub fn get_adult(&self, id: i64) -> Result<Option<DbAdult>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, first_name, last_name, email, bsa_number
             FROM adults WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], Self::map_adult_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Record a merit badge an adult is qualified to counsel. Idempotent.
    pub fn add_adult_merit_badge(&self, adult_id: i64, badge: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO adult_merit_badges (adult_id, merit_badge_name)
             VALUES (?1, ?2)",
            params![adult_id, badge],
        )?;
        Ok(())
    }

    /// Merit badges an adult counsels, alphabetical.
    pub fn get_adult_merit_badges(&self, adult_id: i64) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT merit_badge_name FROM adult_merit_badges
             WHERE adult_id = ?1 ORDER BY merit_badge_name",
        )?;
        let rows = stmt.query_map(params![adult_id], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn map_adult_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DbAdult> {
        Ok(DbAdult {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            bsa_number: row.get(4)?,
        })
    }
}
