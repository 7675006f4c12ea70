//! Round pacing, answer tolerance, difficulty ladder and scoring.

use mathdash_common::Difficulty;
use serde::{Deserialize, Serialize};

/// One rung of the difficulty ladder: rooms with at most
/// `max_participants` players get `difficulty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyStep {
    pub max_participants: usize,
    pub difficulty: Difficulty,
}

/// Points awarded per win, by question difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            easy: 1,
            medium: 2,
            hard: 3,
        }
    }
}

impl PointsConfig {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Game session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Delay between a win and the next question (valid range: 0-60000).
    pub advance_delay_ms: u64,
    /// Delay before the first question after a join (valid range: 0-10000).
    pub join_debounce_ms: u64,
    /// Submissions strictly closer than this to the answer are correct.
    pub answer_tolerance: f64,
    /// Ladder rungs in ascending `max_participants` order. Counts above
    /// the last rung use `overflow_difficulty`.
    pub difficulty_steps: Vec<DifficultyStep>,
    pub overflow_difficulty: Difficulty,
    pub points: PointsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: 3000,
            join_debounce_ms: 500,
            answer_tolerance: 0.01,
            difficulty_steps: vec![
                DifficultyStep {
                    max_participants: 2,
                    difficulty: Difficulty::Easy,
                },
                DifficultyStep {
                    max_participants: 5,
                    difficulty: Difficulty::Medium,
                },
            ],
            overflow_difficulty: Difficulty::Hard,
            points: PointsConfig::default(),
        }
    }
}
