//! Configuration error type.

/// Configuration error with source location tracking.
///
/// # Examples
///
/// ```
/// use courtside_error::ConfigError;
///
/// let err = ConfigError::new("Missing field: discord_token");
/// assert!(format!("{}", err).contains("Missing field"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Description of the configuration problem
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
