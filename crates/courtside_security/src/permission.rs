//! Privilege model for privileged commands.

use courtside_error::{SecurityError, SecurityErrorKind, SecurityResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Role names that confer privilege by default.
const DEFAULT_PRIVILEGED_ROLES: [&str; 4] = ["Modérateur", "Administrateur", "Coach", "Staff"];

/// Privilege configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivilegeConfig {
    /// Role names whose holders count as privileged.
    #[serde(default = "default_privileged_roles")]
    pub privileged_roles: HashSet<String>,
}

fn default_privileged_roles() -> HashSet<String> {
    DEFAULT_PRIVILEGED_ROLES
        .iter()
        .map(|r| r.to_string())
        .collect()
}

impl Default for PrivilegeConfig {
    fn default() -> Self {
        Self {
            privileged_roles: default_privileged_roles(),
        }
    }
}

/// Everything the checker needs to know about an acting member.
///
/// Built by the platform layer from whatever the chat platform exposes;
/// the checker itself never talks to the platform.
#[derive(Debug, Clone, Default)]
pub struct ActorContext {
    /// Stable identifier of the actor.
    pub actor_id: i64,
    /// Whether the actor owns the guild/community.
    pub is_owner: bool,
    /// Whether the actor holds an administrator capability flag.
    pub is_administrator: bool,
    /// Whether the actor holds a manage-community capability flag.
    pub can_manage_guild: bool,
    /// Role names the actor holds.
    pub roles: Vec<String>,
}

/// Checker for privileged command access.
pub struct PrivilegeChecker {
    config: PrivilegeConfig,
}

impl PrivilegeChecker {
    /// Create a checker with the given configuration.
    pub fn new(config: PrivilegeConfig) -> Self {
        Self { config }
    }

    /// Whether the actor qualifies as privileged.
    ///
    /// An actor is privileged if they own the community, hold an
    /// administrative capability flag, or hold a role in the allow-list.
    #[instrument(skip(self, actor), fields(actor_id = actor.actor_id))]
    pub fn is_privileged(&self, actor: &ActorContext) -> bool {
        if actor.is_owner {
            debug!("Actor is guild owner");
            return true;
        }
        if actor.is_administrator || actor.can_manage_guild {
            debug!("Actor holds an admin capability flag");
            return true;
        }
        let by_role = actor
            .roles
            .iter()
            .any(|role| self.config.privileged_roles.contains(role));
        if by_role {
            debug!("Actor holds a privileged role");
        }
        by_role
    }

    /// Fail with `PermissionDenied` unless the actor is privileged.
    pub fn require(&self, actor: &ActorContext, command: &str) -> SecurityResult<()> {
        if self.is_privileged(actor) {
            Ok(())
        } else {
            Err(SecurityError::new(SecurityErrorKind::PermissionDenied {
                command: command.to_string(),
                reason: "actor is not owner, admin, or allow-listed".to_string(),
            }))
        }
    }

    /// The privilege configuration.
    pub fn config(&self) -> &PrivilegeConfig {
        &self.config
    }
}

impl Default for PrivilegeChecker {
    fn default() -> Self {
        Self::new(PrivilegeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(roles: &[&str]) -> ActorContext {
        ActorContext {
            actor_id: 1,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..ActorContext::default()
        }
    }

    #[test]
    fn owner_is_always_privileged() {
        let checker = PrivilegeChecker::default();
        let mut ctx = actor(&[]);
        ctx.is_owner = true;
        assert!(checker.is_privileged(&ctx));
    }

    #[test]
    fn capability_flags_grant_privilege() {
        let checker = PrivilegeChecker::default();

        let mut ctx = actor(&[]);
        ctx.is_administrator = true;
        assert!(checker.is_privileged(&ctx));

        let mut ctx = actor(&[]);
        ctx.can_manage_guild = true;
        assert!(checker.is_privileged(&ctx));
    }

    #[test]
    fn allow_listed_role_grants_privilege() {
        let checker = PrivilegeChecker::default();
        assert!(checker.is_privileged(&actor(&["Coach"])));
        assert!(checker.is_privileged(&actor(&["membre", "Modérateur"])));
    }

    #[test]
    fn plain_member_is_denied() {
        let checker = PrivilegeChecker::default();
        let ctx = actor(&["membre", "vétéran"]);
        assert!(!checker.is_privileged(&ctx));

        let result = checker.require(&ctx, "admin.delete");
        assert!(matches!(
            result.unwrap_err().kind,
            SecurityErrorKind::PermissionDenied { .. }
        ));
    }

    #[test]
    fn custom_allow_list_replaces_default() {
        let config = PrivilegeConfig {
            privileged_roles: ["Capitaine".to_string()].into_iter().collect(),
        };
        let checker = PrivilegeChecker::new(config);
        assert!(checker.is_privileged(&actor(&["Capitaine"])));
        assert!(!checker.is_privileged(&actor(&["Coach"])));
    }
}
