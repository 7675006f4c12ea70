//! Game core: question generation, presence and round resolution.
//!
//! The [`SessionController`] owns the single live round. Everything else
//! (transport, HTTP, persistence) talks to it through an `Arc` handed out at
//! startup.

pub mod presence;
pub mod question;
pub mod session;

pub use presence::{Participant, PresenceTracker};
pub use question::{Archetype, Question, QuestionGenerator};
pub use session::{
    DifficultyLadder, RoundSnapshot, RoundState, SessionController, SessionSettings, SessionStats,
    Winner,
};
