//! Math question generation.
//!
//! A question is drawn from one of six archetypes eligible at the requested
//! difficulty. Every archetype renders its literal operands into the problem
//! text and computes the answer from those same operands, so the text alone
//! is enough to re-derive the answer.

mod archetypes;
mod dedupe;
mod expr;
mod generator;
mod profile;
mod types;

pub use archetypes::{round_to, Candidate};
pub use dedupe::RecentQuestions;
pub use expr::{Chain, Op, Term};
pub use generator::QuestionGenerator;
pub use profile::{profile_for, DifficultyProfile};
pub use types::{Archetype, Question};
