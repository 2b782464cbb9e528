//! Ledger error types.
//!
//! Every validation failure the profile ledger can produce is a value of
//! [`LedgerErrorKind`], carrying enough context (old values, limits,
//! remainders) for the command layer to build a precise user-facing message.

/// Specific ledger error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum LedgerErrorKind {
    /// A profile already exists for the player.
    #[display("Profile already exists for player {}", player_id)]
    AlreadyExists {
        /// Player that already has a profile
        player_id: i64,
    },

    /// No profile exists for the player.
    #[display("No profile found for player {}", player_id)]
    NotFound {
        /// Player without a profile
        player_id: i64,
    },

    /// The stat token did not resolve to a known statistic.
    #[display("Unknown statistic: '{}'", _0)]
    InvalidStat(String),

    /// A point amount was zero or negative.
    #[display("Invalid point amount: {}", _0)]
    InvalidAmount(i64),

    /// A single allocation exceeded the per-call ceiling.
    #[display("Cannot allocate {} points in one call (limit {})", points, limit)]
    ExceedsBatchLimit {
        /// Points requested
        points: i64,
        /// Per-call ceiling
        limit: i64,
    },

    /// The player does not hold enough available points.
    #[display("Insufficient points: requested {}, available {}", requested, available)]
    InsufficientPoints {
        /// Points requested
        requested: i64,
        /// Points currently available
        available: i64,
    },

    /// Allocation would push a stat past the ceiling.
    ///
    /// `max_addable` is the largest amount still addable to this stat, so
    /// callers can present it directly.
    #[display(
        "Cannot add {} to {} (currently {}); at most {} can be added",
        requested,
        stat,
        current,
        max_addable
    )]
    StatCeilingExceeded {
        /// Display name of the targeted stat
        stat: String,
        /// Current stat value
        current: i64,
        /// Points requested
        requested: i64,
        /// Remaining headroom below the ceiling
        max_addable: i64,
    },

    /// A value fell outside its legal range.
    #[display("{} must be between {} and {}, got {}", field, min, max, value)]
    OutOfRange {
        /// Field that was out of range
        field: String,
        /// Offending value
        value: i64,
        /// Lower bound (inclusive)
        min: i64,
        /// Upper bound (inclusive)
        max: i64,
    },

    /// A physical-attribute override named nothing to change.
    #[display("No change requested: provide a positive height or weight")]
    NoChangeRequested,

    /// The backing store failed in an unexpected way.
    #[display("Persistence failure: {}", _0)]
    Persistence(String),
}

/// Ledger error with source location tracking.
///
/// # Examples
///
/// ```
/// use courtside_error::{LedgerError, LedgerErrorKind};
///
/// let err = LedgerError::new(LedgerErrorKind::InvalidAmount(0));
/// assert!(format!("{}", err).contains("Invalid point amount"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Ledger Error: {} at line {} in {}", kind, line, file)]
pub struct LedgerError {
    /// The kind of error that occurred
    pub kind: LedgerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LedgerError {
    /// Create a new LedgerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LedgerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
