//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{CommandError, ConfigError, DiscordError, LedgerError, SecurityError};

/// Union of every error domain in the Courtside workspace.
///
/// # Examples
///
/// ```
/// use courtside_error::{CourtsideError, LedgerError, LedgerErrorKind};
///
/// let ledger_err = LedgerError::new(LedgerErrorKind::NoChangeRequested);
/// let err: CourtsideError = ledger_err.into();
/// assert!(format!("{}", err).contains("Ledger Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CourtsideErrorKind {
    /// Ledger rule violation or persistence fault
    #[from(LedgerError)]
    Ledger(LedgerError),
    /// Permission or confirmation failure
    #[from(SecurityError)]
    Security(SecurityError),
    /// Command routing or argument failure
    #[from(CommandError)]
    Command(CommandError),
    /// Discord client failure
    #[from(DiscordError)]
    Discord(DiscordError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Courtside error with kind discrimination.
///
/// # Examples
///
/// ```
/// use courtside_error::{ConfigError, CourtsideResult};
///
/// fn might_fail() -> CourtsideResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Courtside Error: {}", _0)]
pub struct CourtsideError(Box<CourtsideErrorKind>);

impl CourtsideError {
    /// Create a new error from a kind.
    pub fn new(kind: CourtsideErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CourtsideErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CourtsideErrorKind
impl<T> From<T> for CourtsideError
where
    T: Into<CourtsideErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Courtside operations.
pub type CourtsideResult<T> = std::result::Result<T, CourtsideError>;
