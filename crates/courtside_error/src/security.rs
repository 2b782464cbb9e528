//! Security error types.

/// Specific security error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SecurityErrorKind {
    /// Actor lacks the privilege required by a command
    #[display("Permission denied for '{}': {}", command, reason)]
    PermissionDenied {
        /// Command that was denied
        command: String,
        /// Reason for denial
        reason: String,
    },

    /// Destructive operation invoked without a confirmed token
    #[display("Confirmation required for '{}'", operation)]
    ConfirmationRequired {
        /// Operation requiring confirmation
        operation: String,
    },

    /// Confirmation was explicitly declined
    #[display("Confirmation declined for '{}'", operation)]
    ConfirmationDenied {
        /// Operation that was declined
        operation: String,
    },

    /// Confirmation token expired before an answer arrived
    #[display("Confirmation expired for '{}' after {}s", operation, timeout_secs)]
    ConfirmationExpired {
        /// Operation whose confirmation timed out
        operation: String,
        /// Timeout that elapsed
        timeout_secs: u64,
    },

    /// Token does not correspond to any pending confirmation
    #[display("Unknown confirmation token: {}", _0)]
    UnknownToken(String),
}

/// Security error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Security Error: {} at line {} in {}", kind, line, file)]
pub struct SecurityError {
    /// The kind of error that occurred
    pub kind: SecurityErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SecurityError {
    /// Create a new SecurityError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SecurityErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;
