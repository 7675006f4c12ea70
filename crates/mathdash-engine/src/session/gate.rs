use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// Single-writer gate around winner assignment.
///
/// Submissions queue on the gate rather than bouncing off it; whoever gets
/// through decides from the round state alone.
#[derive(Debug, Default)]
pub struct WinnerGate {
    held: Mutex<()>,
}

impl WinnerGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, waiting for the current holder to leave.
    pub fn acquire(&self) -> GateGuard<'_> {
        GateGuard {
            _held: self.held.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    pub fn is_held(&self) -> bool {
        matches!(self.held.try_lock(), Err(TryLockError::WouldBlock))
    }
}

/// Releases the gate on drop, so early returns and panics cannot leave it
/// stuck closed.
pub struct GateGuard<'a> {
    _held: MutexGuard<'a, ()>,
}
