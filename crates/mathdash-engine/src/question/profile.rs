//! Per-difficulty generation parameters.

use mathdash_common::Difficulty;

use super::expr::Op;
use super::types::Archetype;

/// Operand ranges, term counts, operators and eligible archetypes for one
/// difficulty tier.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyProfile {
    pub operand_min: i64,
    pub operand_max: i64,
    pub max_terms: usize,
    pub operators: &'static [Op],
    pub archetypes: &'static [Archetype],
    pub coefficient_max: i64,
    pub max_denominator: i64,
    pub power_base_max: i64,
    pub power_exp_max: u32,
}

const EASY: DifficultyProfile = DifficultyProfile {
    operand_min: 1,
    operand_max: 10,
    max_terms: 2,
    operators: &[Op::Add, Op::Sub],
    archetypes: &[Archetype::Arithmetic, Archetype::LinearEquation],
    coefficient_max: 5,
    max_denominator: 6,
    power_base_max: 5,
    power_exp_max: 2,
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    operand_min: 1,
    operand_max: 25,
    max_terms: 3,
    operators: &[Op::Add, Op::Sub, Op::Mul],
    archetypes: &[
        Archetype::Arithmetic,
        Archetype::LinearEquation,
        Archetype::Fraction,
        Archetype::Percentage,
    ],
    coefficient_max: 9,
    max_denominator: 10,
    power_base_max: 9,
    power_exp_max: 3,
};

const HARD: DifficultyProfile = DifficultyProfile {
    operand_min: 1,
    operand_max: 50,
    max_terms: 4,
    operators: &[Op::Add, Op::Sub, Op::Mul, Op::Div],
    archetypes: &[
        Archetype::Arithmetic,
        Archetype::LinearEquation,
        Archetype::Fraction,
        Archetype::Percentage,
        Archetype::PowerRoot,
        Archetype::Mixed,
    ],
    coefficient_max: 12,
    max_denominator: 12,
    power_base_max: 15,
    power_exp_max: 4,
};

pub fn profile_for(difficulty: Difficulty) -> &'static DifficultyProfile {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}
