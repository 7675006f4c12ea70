use serde::{Deserialize, Serialize};

/// Question generator limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Attempts before falling back to a plain two-term question.
    pub max_attempts: u32,
    /// Size of the recent-question set at which all candidates are accepted.
    pub dedupe_soft_cap: usize,
    /// Size at which the recent-question set is trimmed back to the soft cap.
    pub dedupe_hard_cap: usize,
    /// Answers with a magnitude at or above this are rejected.
    pub max_answer_magnitude: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            dedupe_soft_cap: 100,
            dedupe_hard_cap: 150,
            max_answer_magnitude: 1_000_000.0,
        }
    }
}
