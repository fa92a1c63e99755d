//! Interruption handling.
//!
//! Ctrl+C cancels a shared [`CancellationToken`]. Waits inside a session wake
//! up as soon as the token is cancelled; the session decides afterwards
//! whether to commit or roll back. A second Ctrl+C exits immediately.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::error::PomodoroError;

/// Exit status of a process killed by SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// A one-shot flag that can be waited on.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token and wake every waiter.
    ///
    /// Returns `true` if this call cancelled it, `false` if it already was.
    pub fn cancel(&self) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *cancelled {
            return false;
        }
        *cancelled = true;
        cvar.notify_all();
        true
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for `duration` or until cancelled.
    ///
    /// Returns `true` if the wait ended because of cancellation.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);

        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            cancelled = cvar
                .wait_timeout(cancelled, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }

        true
    }
}

/// Route Ctrl+C to `token`.
///
/// The first interrupt cancels the token. Any later interrupt exits the
/// process immediately with status 130.
///
/// # Errors
///
/// Returns an error if a handler is already installed or cannot be set.
pub fn install_interrupt_handler(token: CancellationToken) -> Result<(), PomodoroError> {
    ctrlc::set_handler(move || {
        if !token.cancel() {
            warn!("second interrupt, exiting without cleanup");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
    .map_err(|e| PomodoroError::Signal(format!("Failed to set Ctrl+C handler: {e}")))
}
