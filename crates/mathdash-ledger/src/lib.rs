//! Durable per-username score storage.
//!
//! The session engine only ever calls [`ScoreLedger::record_win`]; the HTTP
//! layer reads the leaderboard and registers identities. Two backends ship:
//! an in-memory map for tests and ephemeral servers, and SQLite.

mod memory;
mod record;
mod sqlite;

pub use memory::MemoryLedger;
pub use record::{clamp_limit, ScoreRecord, UserRecord, DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT};
pub use sqlite::SqliteLedger;

use async_trait::async_trait;
use mathdash_common::LedgerError;

/// Upsert-by-username score store.
#[async_trait]
pub trait ScoreLedger: Send + Sync {
    /// Record a win: creates the record on first win, otherwise adds
    /// `points` to the high score and one to the win count.
    async fn record_win(&self, username: &str, points: u32) -> Result<ScoreRecord, LedgerError>;

    /// Top `limit` records by high score, then wins, both descending.
    async fn leaderboard(&self, limit: usize) -> Result<Vec<ScoreRecord>, LedgerError>;

    /// Register a new identity. Usernames are unique, case-insensitively.
    async fn register_user(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> Result<UserRecord, LedgerError>;
}
