//! Provisioned Azure resources.

use serde::{Deserialize, Serialize};

/// Identifiers Terraform Cloud needs to authenticate against Azure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedResources {
    pub application_id: String,
    pub subscription_id: String,
    pub tenant_id: String,
    /// Subject of the first workspace's plan credential.
    pub subject: String,
}

/// A role granted at a fully resolved scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleBinding {
    pub role: String,
    pub scope: String,
}

impl RoleBinding {
    /// Resolve an optional scope, falling back to the subscription root.
    pub fn new(role: impl Into<String>, scope: &str, subscription_id: &str) -> Self {
        let scope = if scope.is_empty() {
            subscription_scope(subscription_id)
        } else {
            scope.to_string()
        };
        Self {
            role: role.into(),
            scope,
        }
    }
}

/// ARM scope of a whole subscription.
pub fn subscription_scope(subscription_id: &str) -> String {
    format!("/subscriptions/{}", subscription_id)
}
