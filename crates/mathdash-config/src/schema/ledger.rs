use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Score ledger storage backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    #[default]
    Sqlite,
    Memory,
}

/// Score ledger configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LedgerConfig {
    pub backend: LedgerBackend,
    /// SQLite database file. Defaults to `<data dir>/mathdash/scores.db`.
    pub path: Option<String>,
}

impl LedgerConfig {
    /// Resolve the database path, falling back to the platform data directory.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(p) => Some(PathBuf::from(p)),
            None => dirs::data_dir().map(|d| d.join("mathdash").join("scores.db")),
        }
    }
}
