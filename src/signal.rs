//! Ctrl+C handling.
//!
//! While git or gh runs in the foreground, SIGINT reaches the child through
//! the terminal's process group. acp itself only records that the user asked
//! to stop, so the workflow can bail out with [`AcpError::Interrupted`]
//! instead of treating the killed child as an ordinary failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{AcpError, Result};

/// Records SIGINT without terminating the process.
///
/// Cheap to clone; clones share the same flag.
#[derive(Clone, Default)]
pub struct SignalHandler {
    shutdown_flag: Arc<AtomicBool>,
}

impl SignalHandler {
    /// Register the process-wide SIGINT handler.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler is already registered.
    pub fn install() -> Result<Self> {
        let handler = Self::default();
        let flag_clone = Arc::clone(&handler.shutdown_flag);

        ctrlc::set_handler(move || {
            flag_clone.store(true, Ordering::SeqCst);
        })
        .map_err(|e| AcpError::SignalHandler(e.to_string()))?;

        Ok(handler)
    }

    /// A handler that is never triggered by a real signal.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Checks if Ctrl+C has been pressed (non-blocking).
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }

    /// Mark the run as interrupted.
    pub fn request_shutdown(&self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
    }

    /// `Err(Interrupted)` once Ctrl+C has been pressed.
    pub fn check(&self) -> Result<()> {
        if self.is_shutdown_requested() {
            Err(AcpError::Interrupted)
        } else {
            Ok(())
        }
    }
}
