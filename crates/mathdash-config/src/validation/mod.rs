//! Full configuration validation.
//!
//! Validates numeric ranges, port assignments, the difficulty ladder and
//! dedupe caps. Each section has its own submodule; this orchestrator calls
//! them all and collects errors into a single `ConfigError`.

mod game;
mod generator;
mod helpers;
mod server;


use crate::schema::MathdashConfig;
use mathdash_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MathdashConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    server::validate_server(&mut errors, config);
    game::validate_game(&mut errors, config);
    game::validate_ladder(&mut errors, config);
    generator::validate_generator(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
