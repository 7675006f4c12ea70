use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use mathdash_common::{RoundInfo, WinnerInfo};
use tokio::time::Instant;

use crate::question::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// No question has been asked yet.
    NoRound,
    Active,
    /// Won, or reset without a winner.
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub user_id: String,
    pub username: String,
    pub submitted_at: DateTime<Utc>,
    pub time_taken: Duration,
}

impl Winner {
    pub fn to_info(&self) -> WinnerInfo {
        WinnerInfo {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            time_taken: self.time_taken.as_millis() as u64,
        }
    }
}

/// The one live round. Replaced wholesale when the next question starts.
#[derive(Debug)]
pub(super) struct Round {
    pub question: Option<Question>,
    pub active: bool,
    pub started: Instant,
    pub started_at: DateTime<Utc>,
    pub winner: Option<Winner>,
    pub participants: BTreeSet<String>,
}

impl Round {
    pub fn empty() -> Self {
        Self {
            question: None,
            active: false,
            started: Instant::now(),
            started_at: Utc::now(),
            winner: None,
            participants: BTreeSet::new(),
        }
    }

    pub fn start(question: Question, participants: BTreeSet<String>) -> Self {
        Self {
            question: Some(question),
            active: true,
            started: Instant::now(),
            started_at: Utc::now(),
            winner: None,
            participants,
        }
    }

    pub fn state(&self) -> RoundState {
        match (&self.question, self.active) {
            (None, _) => RoundState::NoRound,
            (Some(_), true) => RoundState::Active,
            (Some(_), false) => RoundState::Closed,
        }
    }

    /// The active question, if submissions are being accepted.
    pub fn live_question(&self) -> Option<&Question> {
        self.question.as_ref().filter(|_| self.active)
    }

    /// The question submissions are judged against: the live one, or the one
    /// just won, so late correct answers still come back as correct.
    pub fn judged_question(&self) -> Option<&Question> {
        self.question
            .as_ref()
            .filter(|_| self.active || self.winner.is_some())
    }

    pub fn info(&self, participant_count: usize) -> RoundInfo {
        RoundInfo {
            is_active: self.active,
            participant_count,
            winner: self.winner.as_ref().map(Winner::to_info),
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            state: self.state(),
            question: self.question.clone(),
            winner: self.winner.clone(),
            participant_ids: self.participants.clone(),
            started_at: self.started_at,
        }
    }
}

/// Read-only copy of the round for callers outside the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub state: RoundState,
    pub question: Option<Question>,
    pub winner: Option<Winner>,
    pub participant_ids: BTreeSet<String>,
    pub started_at: DateTime<Utc>,
}

impl RoundSnapshot {
    pub fn is_active(&self) -> bool {
        self.state == RoundState::Active
    }
}
