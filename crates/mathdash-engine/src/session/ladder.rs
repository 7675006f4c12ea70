use mathdash_common::Difficulty;
use mathdash_config::schema::{DifficultyStep, GameConfig};

/// Maps a participant count to a difficulty. Rungs are checked in order;
/// the first whose `max_participants` covers the count wins, and counts past
/// the last rung get the overflow difficulty.
#[derive(Debug, Clone)]
pub struct DifficultyLadder {
    steps: Vec<DifficultyStep>,
    overflow: Difficulty,
}

impl DifficultyLadder {
    pub fn new(mut steps: Vec<DifficultyStep>, overflow: Difficulty) -> Self {
        steps.sort_by_key(|s| s.max_participants);
        Self { steps, overflow }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.difficulty_steps.clone(), config.overflow_difficulty)
    }

    pub fn select(&self, participants: usize) -> Difficulty {
        self.steps
            .iter()
            .find(|s| participants <= s.max_participants)
            .map(|s| s.difficulty)
            .unwrap_or(self.overflow)
    }
}

impl Default for DifficultyLadder {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_boundaries() {
        let ladder = DifficultyLadder::default();
        assert_eq!(ladder.select(0), Difficulty::Easy);
        assert_eq!(ladder.select(1), Difficulty::Easy);
        assert_eq!(ladder.select(2), Difficulty::Easy);
        assert_eq!(ladder.select(3), Difficulty::Medium);
        assert_eq!(ladder.select(5), Difficulty::Medium);
        assert_eq!(ladder.select(6), Difficulty::Hard);
        assert_eq!(ladder.select(500), Difficulty::Hard);
    }

    #[test]
    fn monotonic_over_counts() {
        let ladder = DifficultyLadder::default();
        let picks: Vec<_> = (0..20).map(|n| ladder.select(n)).collect();
        assert!(picks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn unordered_steps_are_sorted() {
        let ladder = DifficultyLadder::new(
            vec![
                DifficultyStep {
                    max_participants: 10,
                    difficulty: Difficulty::Medium,
                },
                DifficultyStep {
                    max_participants: 1,
                    difficulty: Difficulty::Easy,
                },
            ],
            Difficulty::Hard,
        );
        assert_eq!(ladder.select(1), Difficulty::Easy);
        assert_eq!(ladder.select(4), Difficulty::Medium);
        assert_eq!(ladder.select(11), Difficulty::Hard);
    }

    #[test]
    fn empty_ladder_is_all_overflow() {
        let ladder = DifficultyLadder::new(Vec::new(), Difficulty::Medium);
        assert_eq!(ladder.select(0), Difficulty::Medium);
    }
}
