//! SQLite-backed ledger.
//!
//! # Schema
//!
//! `scores(username PRIMARY KEY, high_score, wins, updated_at)` and
//! `users(user_id PRIMARY KEY, username UNIQUE NOCASE, email, created_at)`.
//! Timestamps are stored as RFC 3339 text.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mathdash_common::{new_id, LedgerError};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::info;

use crate::record::{ScoreRecord, UserRecord};
use crate::ScoreLedger;

/// Durable ledger backed by a single SQLite connection.
///
/// Queries run on the blocking pool so the async runtime never waits on disk.
#[derive(Debug, Clone)]
pub struct SqliteLedger {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteLedger {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Storage(format!(
                    "failed to create ledger directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        let conn = Connection::open(path).map_err(storage_err)?;
        Self::init_schema(&conn).map_err(storage_err)?;
        info!(path = %path.display(), "Opened score ledger");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, LedgerError> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        Self::init_schema(&conn).map_err(storage_err)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Initializes the database schema.
    pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS scores (
                username TEXT PRIMARY KEY,
                high_score INTEGER NOT NULL,
                wins INTEGER NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_scores_rank ON scores(high_score DESC, wins DESC)",
            [],
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                user_id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE COLLATE NOCASE,
                email TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, LedgerError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, LedgerError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| LedgerError::Storage("connection lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| LedgerError::Task(e.to_string()))?
    }
}

#[async_trait]
impl ScoreLedger for SqliteLedger {
    async fn record_win(&self, username: &str, points: u32) -> Result<ScoreRecord, LedgerError> {
        let username = username.to_string();
        self.with_conn(move |conn| {
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "INSERT INTO scores (username, high_score, wins, updated_at)
                 VALUES (?1, ?2, 1, ?3)
                 ON CONFLICT(username) DO UPDATE SET
                    high_score = high_score + excluded.high_score,
                    wins = wins + 1,
                    updated_at = excluded.updated_at",
                params![username, i64::from(points), now],
            )
            .map_err(storage_err)?;

            conn.query_row(
                "SELECT username, high_score, wins, updated_at FROM scores WHERE username = ?1",
                params![username],
                row_to_score,
            )
            .map_err(storage_err)?
        })
        .await
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<ScoreRecord>, LedgerError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT username, high_score, wins, updated_at FROM scores
                     ORDER BY high_score DESC, wins DESC, username ASC
                     LIMIT ?1",
                )
                .map_err(storage_err)?;
            let rows = stmt
                .query_map(params![limit], row_to_score)
                .map_err(storage_err)?;

            let mut records = Vec::new();
            for row in rows {
                records.push(row.map_err(storage_err)??);
            }
            Ok(records)
        })
        .await
    }

    async fn register_user(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> Result<UserRecord, LedgerError> {
        let user = UserRecord {
            user_id: new_id(),
            username: username.to_string(),
            email: email.map(str::to_string),
            created_at: Utc::now(),
        };
        self.with_conn(move |conn| {
            let existing: Option<String> = conn
                .query_row(
                    "SELECT user_id FROM users WHERE username = ?1",
                    params![user.username],
                    |row| row.get(0),
                )
                .optional()
                .map_err(storage_err)?;
            if existing.is_some() {
                return Err(LedgerError::Conflict(user.username.clone()));
            }

            conn.execute(
                "INSERT INTO users (user_id, username, email, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    user.user_id,
                    user.username,
                    user.email,
                    user.created_at.to_rfc3339()
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(ref f, _)
                    if f.code == ErrorCode::ConstraintViolation =>
                {
                    LedgerError::Conflict(user.username.clone())
                }
                other => storage_err(other),
            })?;
            Ok(user)
        })
        .await
    }
}

fn storage_err(e: rusqlite::Error) -> LedgerError {
    LedgerError::Storage(e.to_string())
}

/// Map a `scores` row. The timestamp parse error is surfaced as the inner result.
fn row_to_score(row: &rusqlite::Row<'_>) -> rusqlite::Result<Result<ScoreRecord, LedgerError>> {
    let username: String = row.get(0)?;
    let high_score: i64 = row.get(1)?;
    let wins: i64 = row.get(2)?;
    let updated_at: String = row.get(3)?;
    Ok(parse_timestamp(&updated_at).map(|updated_at| ScoreRecord {
        username,
        high_score: high_score.max(0) as u64,
        wins: wins.max(0) as u64,
        updated_at,
    }))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, LedgerError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| LedgerError::Storage(format!("bad timestamp {value:?}: {e}")))
}
