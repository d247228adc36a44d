//! Actors, roles, permissions, and directory profiles.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Platform user identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform roles, a closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Admin,
    Editor,
    Viewer,
    Consultant,
}

impl Role {
    /// Parse a raw role tag. Anything outside the closed set is `None`.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "owner" => Some(Role::Owner),
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            "consultant" => Some(Role::Consultant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
            Role::Consultant => "consultant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named grant such as `contracts.manage`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission(pub String);

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authenticated identity performing an operation.
///
/// Actors are immutable values: the session layer resolves one per
/// authenticated context and passes it into every check by value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
    pub blacklisted: bool,
    pub permissions: HashSet<Permission>,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(id),
            role,
            blacklisted: false,
            permissions: HashSet::new(),
        }
    }

    /// Attach a permission grant (builder-style, for session assembly and tests).
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(Permission::new(permission));
        self
    }

    pub fn blacklist(mut self) -> Self {
        self.blacklisted = true;
        self
    }

    /// Whether this actor's permission set contains the grant.
    pub fn grants(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

/// Directory record behind the user/profile lookup.
///
/// Role changes and blacklist toggles persist here; the `Actor` handed to
/// a check is a snapshot of this record joined with the session's grants.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
    pub blacklisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklist_reason: Option<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(id),
            display_name: display_name.into(),
            role,
            blacklisted: false,
            blacklist_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_closed_set() {
        assert_eq!(Role::parse("owner"), Some(Role::Owner));
        assert_eq!(Role::parse("consultant"), Some(Role::Consultant));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Owner"), None);
    }

    #[test]
    fn test_role_parse_round_trips_as_str() {
        for role in [
            Role::Owner,
            Role::Admin,
            Role::Editor,
            Role::Viewer,
            Role::Consultant,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_actor_grants() {
        let actor = Actor::new("u-1", Role::Admin).with_permission("contracts.manage");
        assert!(actor.grants(&Permission::new("contracts.manage")));
        assert!(!actor.grants(&Permission::new("users.manage")));
    }
}
