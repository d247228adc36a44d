//! Authorization gate.
//!
//! Membership checks over an explicit, immutable [`Actor`] value: the
//! session layer resolves the actor once per authenticated context and
//! every check receives it by value. No ambient lookups.
//!
//! The gate also owns the user-administration policy: role changes are
//! validated against the closed role set, and the blacklist switch
//! demands a human-readable reason on the on-transition.

#![deny(unsafe_code)]

use pact_types::{Actor, PactError, PactResult, Permission, Role, UserProfile};
use tracing::warn;

/// Role/permission membership checks and user-admin policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    pub fn new() -> Self {
        Self
    }

    /// Whether the actor may perform an operation gated by `permission`.
    ///
    /// An absent permission means the operation is public within the
    /// authenticated admin scope. A blacklisted actor is denied
    /// everything regardless of its grants.
    pub fn has_permission(&self, actor: &Actor, permission: Option<&Permission>) -> bool {
        if actor.blacklisted {
            return false;
        }
        match permission {
            None => true,
            Some(permission) => actor.grants(permission),
        }
    }

    /// [`Self::has_permission`] as a typed failure.
    pub fn require_permission(
        &self,
        actor: &Actor,
        permission: Option<&Permission>,
    ) -> PactResult<()> {
        if self.has_permission(actor, permission) {
            return Ok(());
        }

        let required = match permission {
            Some(permission) if !actor.blacklisted => permission.to_string(),
            _ => "active account".to_string(),
        };
        warn!(actor = %actor.id, required = %required, "Permission denied");
        Err(PactError::PermissionDenied {
            actor: actor.id.clone(),
            required,
        })
    }

    /// Validate a role change against the closed role set.
    ///
    /// The target's current role must not already be owner, and
    /// promotion to owner through this path is rejected (ownership
    /// transfer is a separate operation with separate stakes). Returns
    /// the parsed role for the caller to persist.
    pub fn change_role(&self, target: &UserProfile, new_role: &str) -> PactResult<Role> {
        let role = Role::parse(new_role)
            .ok_or_else(|| PactError::InvalidRole(new_role.to_string()))?;

        if target.role == Role::Owner {
            return Err(PactError::InvalidRole(format!(
                "cannot change role of owner {}",
                target.id
            )));
        }
        if role == Role::Owner {
            return Err(PactError::InvalidRole(
                "promotion to owner is not permitted via role change".into(),
            ));
        }

        Ok(role)
    }

    /// Flip the target's blacklist state.
    ///
    /// Blacklisting requires a non-empty reason; lifting the blacklist
    /// requires none and clears the stored reason. Returns the updated
    /// profile for the caller to persist.
    pub fn toggle_blacklist(
        &self,
        target: &UserProfile,
        reason: Option<&str>,
    ) -> PactResult<UserProfile> {
        let mut updated = target.clone();

        if target.blacklisted {
            updated.blacklisted = false;
            updated.blacklist_reason = None;
            return Ok(updated);
        }

        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| {
                PactError::Validation("a reason is required to blacklist a user".into())
            })?;

        warn!(target = %target.id, reason = %reason, "User blacklisted");
        updated.blacklisted = true;
        updated.blacklist_reason = Some(reason.to_string());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> Actor {
        Actor::new("u-admin", Role::Admin).with_permission("contracts.manage")
    }

    #[test]
    fn test_absent_permission_is_public_within_scope() {
        let gate = AuthorizationGate::new();
        assert!(gate.has_permission(&actor(), None));
        assert!(gate.require_permission(&actor(), None).is_ok());
    }

    #[test]
    fn test_permission_membership() {
        let gate = AuthorizationGate::new();
        assert!(gate.has_permission(&actor(), Some(&Permission::new("contracts.manage"))));
        assert!(!gate.has_permission(&actor(), Some(&Permission::new("users.manage"))));

        let err = gate
            .require_permission(&actor(), Some(&Permission::new("users.manage")))
            .unwrap_err();
        assert!(matches!(
            err,
            PactError::PermissionDenied { required, .. } if required == "users.manage"
        ));
    }

    #[test]
    fn test_blacklisted_actor_is_denied_everything() {
        let gate = AuthorizationGate::new();
        let blocked = actor().blacklist();
        assert!(!gate.has_permission(&blocked, None));
        assert!(!gate.has_permission(&blocked, Some(&Permission::new("contracts.manage"))));
    }

    #[test]
    fn test_change_role_rejects_unknown_tag() {
        let gate = AuthorizationGate::new();
        let target = UserProfile::new("u-1", "Avery", Role::Viewer);
        let err = gate.change_role(&target, "superuser").unwrap_err();
        assert!(matches!(err, PactError::InvalidRole(tag) if tag == "superuser"));
    }

    #[test]
    fn test_change_role_rejects_owner_target() {
        let gate = AuthorizationGate::new();
        let target = UserProfile::new("u-1", "Avery", Role::Owner);
        assert!(matches!(
            gate.change_role(&target, "editor"),
            Err(PactError::InvalidRole(_))
        ));
    }

    #[test]
    fn test_change_role_rejects_promotion_to_owner() {
        let gate = AuthorizationGate::new();
        let target = UserProfile::new("u-1", "Avery", Role::Editor);
        assert!(matches!(
            gate.change_role(&target, "owner"),
            Err(PactError::InvalidRole(_))
        ));
    }

    #[test]
    fn test_change_role_valid() {
        let gate = AuthorizationGate::new();
        let target = UserProfile::new("u-1", "Avery", Role::Viewer);
        assert_eq!(gate.change_role(&target, "editor").unwrap(), Role::Editor);
    }

    #[test]
    fn test_blacklist_on_requires_reason() {
        let gate = AuthorizationGate::new();
        let target = UserProfile::new("u-1", "Avery", Role::Editor);

        assert!(matches!(
            gate.toggle_blacklist(&target, None),
            Err(PactError::Validation(_))
        ));
        assert!(matches!(
            gate.toggle_blacklist(&target, Some("   ")),
            Err(PactError::Validation(_))
        ));

        let blocked = gate
            .toggle_blacklist(&target, Some("repeated spam"))
            .unwrap();
        assert!(blocked.blacklisted);
        assert_eq!(blocked.blacklist_reason.as_deref(), Some("repeated spam"));
    }

    #[test]
    fn test_blacklist_off_needs_no_reason_and_clears_it() {
        let gate = AuthorizationGate::new();
        let mut target = UserProfile::new("u-1", "Avery", Role::Editor);
        target.blacklisted = true;
        target.blacklist_reason = Some("repeated spam".into());

        let cleared = gate.toggle_blacklist(&target, None).unwrap();
        assert!(!cleared.blacklisted);
        assert!(cleared.blacklist_reason.is_none());
    }
}
