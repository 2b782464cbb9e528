//! Privilege checks and confirmation workflow for Courtside.
//!
//! Two concerns gate the ledger's privileged and destructive operations:
//!
//! 1. **Privilege**: is this actor a moderator-equivalent? An actor
//!    qualifies by owning the guild, holding an administrative capability
//!    flag, or holding a role in a fixed allow-list.
//! 2. **Confirmation**: destructive operations (reset, delete) are only
//!    invoked after an explicit affirmative answer, collected as a
//!    two-phase token exchange with a bounded expiry.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod confirmation;
mod permission;

pub use confirmation::{
    ConfirmationDecision, ConfirmationWorkflow, DEFAULT_TIMEOUT_SECS, PendingConfirmation,
};
pub use permission::{ActorContext, PrivilegeChecker, PrivilegeConfig};

pub use courtside_error::{SecurityError, SecurityErrorKind, SecurityResult};
