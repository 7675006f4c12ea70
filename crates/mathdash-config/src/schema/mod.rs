//! Configuration schema types for mathdash.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the server ships with.

mod game;
mod generator;
mod ledger;
mod server;
mod system;

pub use game::*;
pub use generator::*;
pub use ledger::*;
pub use server::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for mathdash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct MathdashConfig {
    pub server: ServerConfig,
    pub game: GameConfig,
    pub generator: GeneratorConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
}
