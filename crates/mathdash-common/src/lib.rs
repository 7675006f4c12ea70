pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, LedgerError, MathdashError};
pub use events::{EventBus, GameEvent};
pub use id::{new_id, ConnectionId};
pub use types::{Difficulty, PublicQuestion, RoundInfo, SubmissionResult, WinnerInfo};

pub type Result<T> = std::result::Result<T, MathdashError>;
