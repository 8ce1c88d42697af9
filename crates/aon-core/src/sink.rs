//! Diagnostics: the last-error sink queried by [`crate::last_error`].
//!
//! The sink is the only state in this crate that outlives a single call.
//! Façade operations clear it on entry and record into it on failure, so a
//! successful call always leaves it empty. Concurrent calls sharing one sink
//! race last-writer-wins with no ordering guarantee; callers that need a
//! reliable per-call message should pass their own sink to the `*_with_sink`
//! operations instead of relying on the process-wide default.

use std::sync::Mutex;

/// Holds the message of the most recent failure routed through it.
#[derive(Debug)]
pub struct ErrorSink {
    slot: Mutex<Option<String>>,
}

static GLOBAL: ErrorSink = ErrorSink::new();

impl ErrorSink {
    /// An empty sink.
    pub const fn new() -> ErrorSink {
        ErrorSink {
            slot: Mutex::new(None),
        }
    }

    /// The process-wide default sink used by the plain façade functions.
    pub fn global() -> &'static ErrorSink {
        &GLOBAL
    }

    /// Overwrite the held message.
    pub fn record(&self, message: impl Into<String>) {
        *self.lock() = Some(message.into());
    }

    /// Drop the held message, if any.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// The most recently recorded message, or `None` if no failure has been
    /// recorded since the last clear.
    pub fn last(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned sink only means another thread panicked mid-record;
        // the slot itself is always a valid Option.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ErrorSink {
    fn default() -> Self {
        ErrorSink::new()
    }
}
