use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
pub const MAX_LEADERBOARD_LIMIT: usize = 50;

/// Cumulative score for one username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub username: String,
    pub high_score: u64,
    pub wins: u64,
    pub updated_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Leaderboard order: high score desc, wins desc, username asc.
    pub fn leaderboard_cmp(&self, other: &Self) -> Ordering {
        other
            .high_score
            .cmp(&self.high_score)
            .then_with(|| other.wins.cmp(&self.wins))
            .then_with(|| self.username.cmp(&other.username))
    }
}

/// A registered identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Apply the leaderboard default and upper bound to a requested limit.
pub fn clamp_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT)
}
