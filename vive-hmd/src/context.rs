//! Driver context shared between the driver and its sessions

use parking_lot::Mutex;

/// Holds the last error message for the host to query
#[derive(Debug, Default)]
pub struct DriverContext {
    last_error: Mutex<Option<String>>,
}

impl DriverContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error message, replacing the previous one
    pub fn set_error(&self, message: impl Into<String>) {
        *self.last_error.lock() = Some(message.into());
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }
}
