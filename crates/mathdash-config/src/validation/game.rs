//! Game pacing, tolerance, scoring and difficulty ladder validation.

use crate::schema::MathdashConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_game(errors: &mut Vec<String>, config: &MathdashConfig) {
    let game = &config.game;
    validate_range(errors, "game.advance_delay_ms", game.advance_delay_ms, 0, 60_000);
    validate_range(errors, "game.join_debounce_ms", game.join_debounce_ms, 0, 10_000);
    if game.answer_tolerance <= 0.0 {
        errors.push(format!(
            "game.answer_tolerance = {} must be positive",
            game.answer_tolerance
        ));
    } else {
        validate_range_f64(errors, "game.answer_tolerance", game.answer_tolerance, 0.0, 1.0);
    }
    validate_range(errors, "game.points.easy", game.points.easy.into(), 1, 1000);
    validate_range(errors, "game.points.medium", game.points.medium.into(), 1, 1000);
    validate_range(errors, "game.points.hard", game.points.hard.into(), 1, 1000);
}

/// Rungs must ascend strictly by participant count and never get easier.
pub(crate) fn validate_ladder(errors: &mut Vec<String>, config: &MathdashConfig) {
    let steps = &config.game.difficulty_steps;
    for (i, pair) in steps.windows(2).enumerate() {
        if pair[1].max_participants <= pair[0].max_participants {
            errors.push(format!(
                "game.difficulty_steps[{}].max_participants = {} must exceed the previous rung ({})",
                i + 1,
                pair[1].max_participants,
                pair[0].max_participants
            ));
        }
        if pair[1].difficulty < pair[0].difficulty {
            errors.push(format!(
                "game.difficulty_steps[{}].difficulty = {} is easier than the previous rung ({})",
                i + 1,
                pair[1].difficulty,
                pair[0].difficulty
            ));
        }
    }
    if let Some(last) = steps.last() {
        if config.game.overflow_difficulty < last.difficulty {
            errors.push(format!(
                "game.overflow_difficulty = {} is easier than the last rung ({})",
                config.game.overflow_difficulty, last.difficulty
            ));
        }
    }
}
