use pact_types::Permission;
use serde::{Deserialize, Serialize};

/// Configuration for the service surface.
///
/// Deployments may rename the permission grants without code changes;
/// the defaults match the platform's seeded permission catalogue.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Grant required to create and submit contracts (default: `contracts.manage`)
    pub contracts_permission: Permission,
    /// Grant required to decide moderation submissions (default: `moderation.review`)
    pub moderation_permission: Permission,
    /// Grant required for role changes and blacklisting (default: `users.manage`)
    pub users_permission: Permission,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            contracts_permission: Permission::new("contracts.manage"),
            moderation_permission: Permission::new("moderation.review"),
            users_permission: Permission::new("users.manage"),
        }
    }
}
