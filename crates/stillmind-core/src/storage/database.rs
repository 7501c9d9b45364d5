//! SQLite-based storage.
//!
//! Provides persistence for:
//! - Completed breathing/meditation sessions and their statistics
//! - The mood journal
//! - Key-value store for application state (persisted timer, activity
//!   checklist)

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::mood::{Mood, MoodEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Breathing,
    Meditation,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Breathing => "breathing",
            SessionKind::Meditation => "meditation",
        }
    }
}

/// One completed (or interrupted) timed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub kind: String,
    pub duration_secs: u64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionStats {
    pub total_sessions: u64,
    pub total_breathing_secs: u64,
    pub total_meditation_secs: u64,
    pub completed_sessions: u64,
    pub today_sessions: u64,
    pub today_secs: u64,
}

/// SQLite database at `~/.config/stillmind/stillmind.db`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database, creating the file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("stillmind.db");
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        // Concurrent CLI invocations share the file; wait out short locks.
        conn.busy_timeout(std::time::Duration::from_secs(5))
            .map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                kind          TEXT NOT NULL,
                duration_secs INTEGER NOT NULL,
                started_at    TEXT NOT NULL,
                ended_at      TEXT NOT NULL,
                completed     INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS mood_entries (
                id   TEXT PRIMARY KEY,
                mood TEXT NOT NULL,
                note TEXT,
                at   TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_ended_at ON sessions(ended_at);
            CREATE INDEX IF NOT EXISTS idx_sessions_kind ON sessions(kind);
            CREATE INDEX IF NOT EXISTS idx_mood_entries_at ON mood_entries(at);",
        )?;
        Ok(())
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Record a finished run.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        kind: SessionKind,
        duration_secs: u64,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        completed: bool,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sessions (kind, duration_secs, started_at, ended_at, completed)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                kind.as_str(),
                duration_secs,
                started_at.to_rfc3339(),
                ended_at.to_rfc3339(),
                completed,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, duration_secs, started_at, ended_at, completed
             FROM sessions ORDER BY ended_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(SessionRecord {
                id: row.get(0)?,
                kind: row.get(1)?,
                duration_secs: row.get(2)?,
                started_at: parse_timestamp(3, row.get(3)?)?,
                ended_at: parse_timestamp(4, row.get(4)?)?,
                completed: row.get(5)?,
            })
        })?;
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row.map_err(StorageError::from)?);
        }
        Ok(sessions)
    }

    pub fn stats_today(&self) -> Result<SessionStats> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let floor = format!("{today}T00:00:00+00:00");
        self.stats_since(Some(floor.as_str()))
    }

    pub fn stats_all(&self) -> Result<SessionStats> {
        self.stats_since(None)
    }

    fn stats_since(&self, since: Option<&str>) -> Result<SessionStats> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let today_floor = format!("{today}T00:00:00+00:00");

        let mut stmt = self.conn.prepare(
            "SELECT kind,
                    COUNT(*),
                    COALESCE(SUM(duration_secs), 0),
                    COALESCE(SUM(completed), 0),
                    COALESCE(SUM(CASE WHEN ended_at >= ?1 THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN ended_at >= ?1 THEN duration_secs ELSE 0 END), 0)
             FROM sessions
             WHERE ended_at >= COALESCE(?2, '')
             GROUP BY kind",
        )?;

        let mut stats = SessionStats::default();
        let rows = stmt.query_map(params![today_floor, since], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, u64>(3)?,
                row.get::<_, u64>(4)?,
                row.get::<_, u64>(5)?,
            ))
        })?;

        for row in rows {
            let (kind, count, secs, completed, today_count, today_secs) =
                row.map_err(StorageError::from)?;
            stats.total_sessions += count;
            stats.completed_sessions += completed;
            stats.today_sessions += today_count;
            stats.today_secs += today_secs;
            match kind.as_str() {
                "breathing" => stats.total_breathing_secs += secs,
                "meditation" => stats.total_meditation_secs += secs,
                _ => {}
            }
        }
        Ok(stats)
    }

    // ── Mood journal ─────────────────────────────────────────────────

    pub fn insert_mood(&self, entry: &MoodEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO mood_entries (id, mood, note, at) VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.id.to_string(),
                entry.mood.to_string(),
                entry.note,
                entry.at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Most recent entries first.
    pub fn recent_moods(&self, limit: usize) -> Result<Vec<MoodEntry>> {
        self.query_moods(
            "SELECT id, mood, note, at FROM mood_entries ORDER BY at DESC LIMIT ?1",
            params![limit as i64],
        )
    }

    pub fn all_moods(&self) -> Result<Vec<MoodEntry>> {
        self.query_moods(
            "SELECT id, mood, note, at FROM mood_entries ORDER BY at DESC",
            params![],
        )
    }

    fn query_moods(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<MoodEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |row| {
            let id: String = row.get(0)?;
            let mood: String = row.get(1)?;
            Ok(MoodEntry {
                id: Uuid::parse_str(&id).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
                })?,
                mood: Mood::from_str(&mood).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                })?,
                note: row.get(2)?,
                at: parse_timestamp(3, row.get(3)?)?,
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(StorageError::from)?);
        }
        Ok(entries)
    }
}

fn parse_timestamp(col: usize, value: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("missing").unwrap().is_none());

        db.kv_set("engine", "{}").unwrap();
        assert_eq!(db.kv_get("engine").unwrap().as_deref(), Some("{}"));

        db.kv_set("engine", "{\"a\":1}").unwrap();
        assert_eq!(db.kv_get("engine").unwrap().as_deref(), Some("{\"a\":1}"));

        db.kv_delete("engine").unwrap();
        assert!(db.kv_get("engine").unwrap().is_none());
    }

    #[test]
    fn session_stats_aggregate_by_kind() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_session(SessionKind::Breathing, 42, now - Duration::seconds(42), now, false)
            .unwrap();
        db.record_session(SessionKind::Meditation, 300, now - Duration::seconds(300), now, true)
            .unwrap();

        let stats = db.stats_all().unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_breathing_secs, 42);
        assert_eq!(stats.total_meditation_secs, 300);
        assert_eq!(stats.completed_sessions, 1);
        assert_eq!(stats.today_sessions, 2);

        let today = db.stats_today().unwrap();
        assert_eq!(today.total_sessions, 2);
    }

    #[test]
    fn recent_sessions_newest_first() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_session(
            SessionKind::Breathing,
            10,
            now - Duration::minutes(10),
            now - Duration::minutes(9),
            false,
        )
        .unwrap();
        db.record_session(SessionKind::Meditation, 300, now - Duration::minutes(5), now, true)
            .unwrap();

        let sessions = db.recent_sessions(10).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].kind, "meditation");
        assert!(sessions[0].completed);
    }

    #[test]
    fn mood_roundtrip_newest_first() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        let older = MoodEntry::new_at(Mood::Sad, None, now - Duration::days(1));
        let newer = MoodEntry::new_at(Mood::Happy, Some("a wonderful day".into()), now);
        db.insert_mood(&older).unwrap();
        db.insert_mood(&newer).unwrap();

        let recent = db.recent_moods(1).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].mood, Mood::Happy);
        assert_eq!(recent[0].note.as_deref(), Some("a wonderful day"));
        assert_eq!(recent[0].id, newer.id);

        let all = db.all_moods().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].mood, Mood::Sad);
    }
}
