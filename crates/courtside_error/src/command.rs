//! Command execution error types.

/// Specific command error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CommandErrorKind {
    /// Command not found or not supported.
    #[display("Command not found: {}", _0)]
    CommandNotFound(String),

    /// Missing required argument.
    #[display("Missing required argument '{}' for command '{}'", arg_name, command)]
    MissingArgument {
        /// Command that was invoked
        command: String,
        /// Name of the missing argument
        arg_name: String,
    },

    /// Invalid argument type or value.
    #[display("Invalid argument '{}' for command '{}': {}", arg_name, command, reason)]
    InvalidArgument {
        /// Command that was invoked
        command: String,
        /// Name of the offending argument
        arg_name: String,
        /// Why the argument was rejected
        reason: String,
    },

    /// Downstream API call failed.
    #[display("API call failed for '{}': {}", command, reason)]
    ApiError {
        /// Command that was invoked
        command: String,
        /// Failure description
        reason: String,
    },
}

/// Command error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Command Error: {} at line {} in {}", kind, line, file)]
pub struct CommandError {
    /// The kind of error that occurred
    pub kind: CommandErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CommandError {
    /// Create a new CommandError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CommandErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for command operations.
pub type CommandResult<T> = std::result::Result<T, CommandError>;
