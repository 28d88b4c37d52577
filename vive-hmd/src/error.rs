//! Driver error types

use thiserror::Error;
use vive_transport::{ChannelRole, TransportError};

/// Host status codes
pub mod status {
    pub const UNKNOWN_ERROR: i32 = -1;
    pub const INVALID_PARAMETER: i32 = -2;
    pub const UNSUPPORTED: i32 = -3;
    pub const INVALID_OPERATION: i32 = -4;
}

/// Errors from driver and session operations
#[derive(Error, Debug)]
pub enum HmdError {
    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// No interface at the requested position in the listing
    #[error("Could not find {role} interface for device {device}")]
    InterfaceNotFound { role: ChannelRole, device: usize },

    /// The interface was found but could not be opened
    #[error("Failed to open {role}: {source}")]
    OpenFailed {
        role: ChannelRole,
        #[source]
        source: TransportError,
    },

    /// Non-blocking mode could not be set
    #[error("Failed to set non-blocking on {role}: {source}")]
    Configure {
        role: ChannelRole,
        #[source]
        source: TransportError,
    },

    /// Value kind this device does not provide
    #[error("Invalid type given to get_float_value ({0})")]
    InvalidValueKind(u32),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HmdError {
    /// Status code reported to the host
    pub fn status_code(&self) -> i32 {
        match self {
            HmdError::InvalidValueKind(_) => status::UNKNOWN_ERROR,
            HmdError::InvalidParameter(_) => status::INVALID_PARAMETER,
            HmdError::InterfaceNotFound { .. } => status::UNSUPPORTED,
            HmdError::OpenFailed { .. } | HmdError::Configure { .. } => {
                status::INVALID_OPERATION
            }
            HmdError::Transport(_) | HmdError::Internal(_) => status::UNKNOWN_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_kind_code() {
        let err = HmdError::InvalidValueKind(42);
        assert_eq!(err.status_code(), -1);
        assert_eq!(err.to_string(), "Invalid type given to get_float_value (42)");
    }

    #[test]
    fn test_not_found_message_names_role() {
        let err = HmdError::InterfaceNotFound {
            role: ChannelRole::WatchmanDongle,
            device: 1,
        };
        assert_eq!(
            err.to_string(),
            "Could not find watchman dongle interface for device 1"
        );
    }
}
