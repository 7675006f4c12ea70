//! In-memory ledger. State is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use mathdash_common::{new_id, LedgerError};
use tokio::sync::RwLock;

use crate::record::{ScoreRecord, UserRecord};
use crate::ScoreLedger;

#[derive(Default)]
pub struct MemoryLedger {
    scores: RwLock<HashMap<String, ScoreRecord>>,
    /// Keyed by lowercased username.
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a single score record.
    pub async fn score(&self, username: &str) -> Option<ScoreRecord> {
        self.scores.read().await.get(username).cloned()
    }
}

#[async_trait]
impl ScoreLedger for MemoryLedger {
    async fn record_win(&self, username: &str, points: u32) -> Result<ScoreRecord, LedgerError> {
        let mut scores = self.scores.write().await;
        let now = Utc::now();
        let record = scores
            .entry(username.to_string())
            .and_modify(|r| {
                r.high_score += u64::from(points);
                r.wins += 1;
                r.updated_at = now;
            })
            .or_insert_with(|| ScoreRecord {
                username: username.to_string(),
                high_score: u64::from(points),
                wins: 1,
                updated_at: now,
            });
        Ok(record.clone())
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<ScoreRecord>, LedgerError> {
        let mut records: Vec<ScoreRecord> = self.scores.read().await.values().cloned().collect();
        records.sort_by(ScoreRecord::leaderboard_cmp);
        records.truncate(limit);
        Ok(records)
    }

    async fn register_user(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> Result<UserRecord, LedgerError> {
        let mut users = self.users.write().await;
        let key = username.to_lowercase();
        if users.contains_key(&key) {
            return Err(LedgerError::Conflict(username.to_string()));
        }
        let user = UserRecord {
            user_id: new_id(),
            username: username.to_string(),
            email: email.map(str::to_string),
            created_at: Utc::now(),
        };
        users.insert(key, user.clone());
        Ok(user)
    }
}
