//! Two-phase confirmation for destructive operations.
//!
//! The ledger's destructive operations (reset, delete) are only invoked
//! after an explicit affirmative answer. The workflow issues a token when a
//! destructive action is requested; the presentation layer collects the
//! answer however it likes (button, reaction) and reports it back. Tokens
//! expire after a bounded wait, and a consumed token cannot be replayed.

use courtside_error::{SecurityError, SecurityErrorKind, SecurityResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument};

/// Default confirmation expiry in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Confirmation decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfirmationDecision {
    /// Action confirmed
    Confirmed,
    /// Action declined
    Declined,
    /// Awaiting an answer
    Pending,
}

/// Destructive action awaiting confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingConfirmation {
    /// Unique token
    pub token: String,
    /// Operation to confirm (e.g. "admin.delete")
    pub operation: String,
    /// Player the operation targets
    pub target_player: i64,
    /// Actor who requested the operation
    pub requested_by: i64,
    /// Unix seconds when the request was made
    pub created_at: u64,
    /// Unix seconds when the token expires
    pub expires_at: u64,
    /// Current decision
    pub decision: ConfirmationDecision,
    /// Actor who answered, once decided
    pub decided_by: Option<i64>,
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn unix_now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

impl PendingConfirmation {
    fn new(
        token: String,
        operation: impl Into<String>,
        target_player: i64,
        requested_by: i64,
        timeout_secs: u64,
    ) -> Self {
        let now = unix_now_secs();
        Self {
            token,
            operation: operation.into(),
            target_player,
            requested_by,
            created_at: now,
            expires_at: now + timeout_secs,
            decision: ConfirmationDecision::Pending,
            decided_by: None,
        }
    }

    /// Check if the token has expired.
    pub fn is_expired(&self) -> bool {
        unix_now_secs() > self.expires_at
    }
}

/// Manager for pending destructive-action confirmations.
pub struct ConfirmationWorkflow {
    /// Pending confirmations by token
    pending: HashMap<String, PendingConfirmation>,
    /// Expiry applied to new requests
    timeout_secs: u64,
}

impl ConfirmationWorkflow {
    /// Create a workflow with the default 30 s expiry.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Create a workflow with a custom expiry.
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            pending: HashMap::new(),
            timeout_secs,
        }
    }

    /// Register a destructive request and return its token.
    #[instrument(skip(self))]
    pub fn request(
        &mut self,
        operation: impl Into<String> + std::fmt::Debug,
        target_player: i64,
        requested_by: i64,
    ) -> String {
        let operation = operation.into();
        let token = format!("{operation}-{target_player}-{}", unix_now_millis());

        debug!(token = %token, "Registering pending confirmation");
        let pending = PendingConfirmation::new(
            token.clone(),
            operation,
            target_player,
            requested_by,
            self.timeout_secs,
        );
        self.pending.insert(token.clone(), pending);
        token
    }

    /// Look up a pending confirmation by token.
    pub fn get(&self, token: &str) -> Option<&PendingConfirmation> {
        self.pending.get(token)
    }

    /// Record an affirmative answer.
    ///
    /// # Errors
    ///
    /// `UnknownToken` for a token never issued (or already consumed);
    /// `ConfirmationExpired` when the answer arrived too late.
    #[instrument(skip(self))]
    pub fn confirm(&mut self, token: &str, decided_by: i64) -> SecurityResult<()> {
        let timeout = self.timeout_secs;
        let pending = self.pending.get_mut(token).ok_or_else(|| {
            SecurityError::new(SecurityErrorKind::UnknownToken(token.to_string()))
        })?;

        if pending.is_expired() {
            debug!("Confirmation has expired");
            return Err(SecurityError::new(
                SecurityErrorKind::ConfirmationExpired {
                    operation: pending.operation.clone(),
                    timeout_secs: timeout,
                },
            ));
        }

        // A declined token stays declined; an answer cannot be overturned.
        if pending.decision == ConfirmationDecision::Declined {
            return Err(SecurityError::new(SecurityErrorKind::ConfirmationDenied {
                operation: pending.operation.clone(),
            }));
        }

        debug!("Confirmation recorded");
        pending.decision = ConfirmationDecision::Confirmed;
        pending.decided_by = Some(decided_by);
        Ok(())
    }

    /// Record a negative answer.
    ///
    /// # Errors
    ///
    /// `UnknownToken` for a token never issued (or already consumed).
    #[instrument(skip(self))]
    pub fn decline(&mut self, token: &str, decided_by: i64) -> SecurityResult<()> {
        let pending = self.pending.get_mut(token).ok_or_else(|| {
            SecurityError::new(SecurityErrorKind::UnknownToken(token.to_string()))
        })?;

        debug!("Confirmation declined");
        pending.decision = ConfirmationDecision::Declined;
        pending.decided_by = Some(decided_by);
        Ok(())
    }

    /// Consume a confirmed token, returning the request it affirmed.
    ///
    /// The token is removed whatever the outcome, so a destructive
    /// operation can never be replayed from one answer.
    ///
    /// # Errors
    ///
    /// `UnknownToken`, `ConfirmationExpired`, `ConfirmationDenied`, or
    /// `ConfirmationRequired` (still pending).
    #[instrument(skip(self))]
    pub fn take_confirmed(&mut self, token: &str) -> SecurityResult<PendingConfirmation> {
        let pending = self.pending.remove(token).ok_or_else(|| {
            SecurityError::new(SecurityErrorKind::UnknownToken(token.to_string()))
        })?;

        if pending.is_expired() {
            debug!("Confirmation has expired");
            return Err(SecurityError::new(
                SecurityErrorKind::ConfirmationExpired {
                    operation: pending.operation,
                    timeout_secs: self.timeout_secs,
                },
            ));
        }

        match pending.decision {
            ConfirmationDecision::Confirmed => {
                debug!("Confirmation affirmed; token consumed");
                Ok(pending)
            }
            ConfirmationDecision::Declined => {
                debug!("Confirmation was declined");
                Err(SecurityError::new(SecurityErrorKind::ConfirmationDenied {
                    operation: pending.operation,
                }))
            }
            ConfirmationDecision::Pending => {
                debug!("Confirmation still pending");
                Err(SecurityError::new(
                    SecurityErrorKind::ConfirmationRequired {
                        operation: pending.operation,
                    },
                ))
            }
        }
    }

    /// Drop expired tokens; returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, pending| !pending.is_expired());
        let removed = before - self.pending.len();
        if removed > 0 {
            debug!(removed, "Cleaned up expired confirmations");
        }
        removed
    }
}

impl Default for ConfirmationWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_issues_pending_token() {
        let mut workflow = ConfirmationWorkflow::new();
        let token = workflow.request("admin.delete", 42, 777);

        let result = workflow.take_confirmed(&token);
        assert!(matches!(
            result.unwrap_err().kind,
            SecurityErrorKind::ConfirmationRequired { .. }
        ));
    }

    #[test]
    fn confirmed_token_is_consumed_once() {
        let mut workflow = ConfirmationWorkflow::new();
        let token = workflow.request("admin.reset", 42, 777);
        workflow.confirm(&token, 777).unwrap();

        let affirmed = workflow.take_confirmed(&token).unwrap();
        assert_eq!(affirmed.target_player, 42);
        assert_eq!(affirmed.decided_by, Some(777));

        // Replay is impossible: the token is gone.
        let replay = workflow.take_confirmed(&token);
        assert!(matches!(
            replay.unwrap_err().kind,
            SecurityErrorKind::UnknownToken(_)
        ));
    }

    #[test]
    fn declined_token_blocks_the_operation() {
        let mut workflow = ConfirmationWorkflow::new();
        let token = workflow.request("admin.delete", 42, 777);
        workflow.decline(&token, 888).unwrap();

        let result = workflow.take_confirmed(&token);
        assert!(matches!(
            result.unwrap_err().kind,
            SecurityErrorKind::ConfirmationDenied { .. }
        ));
    }

    #[test]
    fn declined_token_cannot_be_overturned() {
        let mut workflow = ConfirmationWorkflow::new();
        let token = workflow.request("admin.delete", 42, 777);
        workflow.decline(&token, 888).unwrap();

        let result = workflow.confirm(&token, 777);
        assert!(matches!(
            result.unwrap_err().kind,
            SecurityErrorKind::ConfirmationDenied { .. }
        ));
    }

    #[test]
    fn expired_token_cannot_be_confirmed() {
        let mut workflow = ConfirmationWorkflow::with_timeout(0);
        let token = workflow.request("admin.delete", 42, 777);

        std::thread::sleep(std::time::Duration::from_millis(1100));
        let result = workflow.confirm(&token, 777);
        assert!(matches!(
            result.unwrap_err().kind,
            SecurityErrorKind::ConfirmationExpired { .. }
        ));
    }

    #[test]
    fn unknown_token_is_rejected() {
        let mut workflow = ConfirmationWorkflow::new();
        assert!(workflow.confirm("nope", 1).is_err());
        assert!(workflow.decline("nope", 1).is_err());
        assert!(workflow.take_confirmed("nope").is_err());
    }

    #[test]
    fn cleanup_removes_only_expired_tokens() {
        let mut workflow = ConfirmationWorkflow::with_timeout(0);
        workflow.request("admin.delete", 1, 777);
        workflow.request("admin.reset", 2, 777);

        std::thread::sleep(std::time::Duration::from_millis(1100));
        let mut fresh = ConfirmationWorkflow::new();
        let keep = fresh.request("admin.delete", 3, 777);

        assert_eq!(workflow.cleanup_expired(), 2);
        assert_eq!(fresh.cleanup_expired(), 0);
        assert!(fresh.confirm(&keep, 777).is_ok());
    }
}
