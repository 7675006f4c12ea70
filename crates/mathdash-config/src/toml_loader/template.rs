//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# mathdash configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# host = "0.0.0.0"
# ws_port = 9001
# http_port = 8080
# max_messages_per_second = 20   # 1-1000

[game]
# advance_delay_ms = 3000        # 0-60000, pause after a win
# join_debounce_ms = 500         # 0-10000
# answer_tolerance = 0.01        # strict: |answer - truth| < tolerance
# overflow_difficulty = "hard"

# [[game.difficulty_steps]]
# max_participants = 2
# difficulty = "easy"
#
# [[game.difficulty_steps]]
# max_participants = 5
# difficulty = "medium"

[game.points]
# easy = 1
# medium = 2
# hard = 3

[generator]
# max_attempts = 50
# dedupe_soft_cap = 100
# dedupe_hard_cap = 150
# max_answer_magnitude = 1000000.0

[ledger]
# backend = "sqlite"             # sqlite, memory
# path = "/var/lib/mathdash/scores.db"

[logging]
# level = "info"                 # trace, debug, info, warn, error
"##
    .to_string()
}
