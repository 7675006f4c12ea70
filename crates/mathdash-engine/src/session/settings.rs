use std::time::Duration;

use mathdash_config::schema::{GameConfig, PointsConfig};

use super::ladder::DifficultyLadder;

/// Runtime knobs for a [`SessionController`](super::SessionController),
/// resolved from `[game]` config.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub advance_delay: Duration,
    pub join_debounce: Duration,
    pub answer_tolerance: f64,
    pub ladder: DifficultyLadder,
    pub points: PointsConfig,
}

impl SessionSettings {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            advance_delay: Duration::from_millis(config.advance_delay_ms),
            join_debounce: Duration::from_millis(config.join_debounce_ms),
            answer_tolerance: config.answer_tolerance,
            ladder: DifficultyLadder::from_config(config),
            points: config.points.clone(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
