//! mathdash-server: WebSocket push channel and HTTP API in front of the
//! session controller.

pub mod connection;
pub mod http;
pub mod protocol;
pub mod rate_limit;
pub mod validation;
pub mod ws;

use std::sync::Arc;

use mathdash_common::MathdashError;
use mathdash_config::schema::{LedgerBackend, LedgerConfig};
use mathdash_ledger::{MemoryLedger, ScoreLedger, SqliteLedger};

/// Open the configured score ledger.
pub fn open_ledger(config: &LedgerConfig) -> Result<Arc<dyn ScoreLedger>, MathdashError> {
    match config.backend {
        LedgerBackend::Memory => {
            tracing::info!("Using in-memory score ledger");
            Ok(Arc::new(MemoryLedger::new()))
        }
        LedgerBackend::Sqlite => {
            let path = config.resolved_path().ok_or_else(|| {
                MathdashError::Other("no data directory for the score database".into())
            })?;
            Ok(Arc::new(SqliteLedger::open(&path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_memory_ledger() {
        let config = LedgerConfig {
            backend: LedgerBackend::Memory,
            path: None,
        };
        let ledger = open_ledger(&config).unwrap();
        assert!(ledger.leaderboard(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn opens_sqlite_ledger_at_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.db");
        let config = LedgerConfig {
            backend: LedgerBackend::Sqlite,
            path: Some(path.to_string_lossy().into_owned()),
        };
        let ledger = open_ledger(&config).unwrap();
        ledger.record_win("alice", 2).await.unwrap();
        assert!(path.exists());
    }
}
