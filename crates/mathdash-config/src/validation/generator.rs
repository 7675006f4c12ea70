//! Question generator limit validation.

use crate::schema::MathdashConfig;

use super::helpers::validate_range;

pub(crate) fn validate_generator(errors: &mut Vec<String>, config: &MathdashConfig) {
    let generator = &config.generator;
    validate_range(
        errors,
        "generator.max_attempts",
        generator.max_attempts.into(),
        1,
        1000,
    );
    validate_range(
        errors,
        "generator.dedupe_soft_cap",
        generator.dedupe_soft_cap as u64,
        1,
        10_000,
    );
    if generator.dedupe_hard_cap <= generator.dedupe_soft_cap {
        errors.push(format!(
            "generator.dedupe_hard_cap = {} must exceed generator.dedupe_soft_cap = {}",
            generator.dedupe_hard_cap, generator.dedupe_soft_cap
        ));
    }
    if !generator.max_answer_magnitude.is_finite() || generator.max_answer_magnitude <= 0.0 {
        errors.push(format!(
            "generator.max_answer_magnitude = {} must be a positive finite number",
            generator.max_answer_magnitude
        ));
    }
}
