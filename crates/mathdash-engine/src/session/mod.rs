//! Round lifecycle and single-winner resolution.

mod controller;
mod gate;
mod ladder;
mod round;
mod settings;


pub use controller::{SessionController, SessionStats};
pub use gate::{GateGuard, WinnerGate};
pub use ladder::DifficultyLadder;
pub use round::{RoundSnapshot, RoundState, Winner};
pub use settings::SessionSettings;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a std mutex, recovering the data if a previous holder panicked.
/// None of the guarded sections leave state half-written.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
