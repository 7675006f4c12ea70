//! mathdash configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mathdash_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{MathdashConfig, CONFIG_SCHEMA_VERSION};

use mathdash_common::ConfigError;
use std::path::Path;

/// Load config from an explicit path, or the platform default when `None`.
///
/// The default path is created with a commented template if missing. An
/// explicit path that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<MathdashConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)?
        }
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &MathdashConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&MathdashConfig::default());
        assert!(json.contains("\"server\""));
        assert!(json.contains("\"game\""));
        assert!(json.contains("\"generator\""));
        assert!(json.contains("\"ledger\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&MathdashConfig::default());
        let parsed: MathdashConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.ws_port, 9001);
        assert_eq!(parsed.game.difficulty_steps.len(), 2);
        assert_eq!(parsed.generator.dedupe_hard_cap, 150);
    }

    #[test]
    fn load_config_missing_explicit_path_is_not_found() {
        let err = load_config(Some(Path::new("/tmp/definitely_missing_mathdash.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ledger]\nbackend = \"memory\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.ledger.backend, schema::LedgerBackend::Memory);
    }

    #[test]
    fn logging_directive_covers_crates() {
        let directive = MathdashConfig::default().logging.directive();
        assert!(directive.contains("mathdash_engine=info"));
        assert!(directive.contains("mathdash_server=info"));
    }
}
