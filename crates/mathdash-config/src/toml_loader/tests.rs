//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use mathdash_common::Difficulty;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_mathdash_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, mathdash_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[server]
ws_port = 7001

[game]
advance_delay_ms = 1500
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.server.ws_port, 7001);
    assert_eq!(config.game.advance_delay_ms, 1500);
    // Defaults preserved
    assert_eq!(config.server.http_port, 8080);
    assert_eq!(config.game.join_debounce_ms, 500);
    assert_eq!(config.generator.max_attempts, 50);
}

#[test]
fn load_custom_difficulty_ladder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[game]
overflow_difficulty = "medium"

[[game.difficulty_steps]]
max_participants = 4
difficulty = "easy"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.game.difficulty_steps.len(), 1);
    assert_eq!(config.game.difficulty_steps[0].max_participants, 4);
    assert_eq!(config.game.overflow_difficulty, Difficulty::Medium);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, mathdash_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[generator]
dedupe_soft_cap = 500
dedupe_hard_cap = 150
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.generator.dedupe_soft_cap, 100);
    assert_eq!(config.generator.dedupe_hard_cap, 150);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mathdash").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.server.ws_port, 9001);
    assert_eq!(config.game.points.hard, 3);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::MathdashConfig;

    let config: MathdashConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("mathdash"));
        assert!(path_str.ends_with("config.toml"));
    }
}
