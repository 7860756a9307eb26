//! Provisioning configuration.
//!
//! These types represent the user-authored YAML or JSON configuration file.

use crate::resources::RoleBinding;
use crate::subject::ALL_WORKSPACES;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Audience Azure AD expects on federated tokens.
pub const DEFAULT_AUDIENCE: &str = "api://AzureADTokenExchange";

/// Role granted when the configuration names none.
pub const DEFAULT_ROLE: &str = "Contributor";

/// Prefix of the application display name derived from the organization.
pub const DEFAULT_APPLICATION_PREFIX: &str = "terraform-cloud";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub terraform_cloud: TerraformCloudConfig,
    #[serde(default)]
    pub azure: AzureConfig,
    #[serde(default)]
    pub application: ApplicationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerraformCloudConfig {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub workspace: String,
    /// Takes precedence over `workspace` when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workspaces: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AzureConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subscription_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
    /// Takes precedence over `role` and `scope` when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleAssignment>,
}

/// A role to grant, optionally narrowed to a scope below the subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scope: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub audience: String,
}

fn looks_like_json(content: &str) -> bool {
    matches!(content.trim_start().chars().next(), Some('{') | Some('['))
}

/// Display name used for the application when none is configured.
pub fn default_application_name(organization: &str) -> String {
    format!("{}-{}", DEFAULT_APPLICATION_PREFIX, organization)
}

impl Config {
    /// Load configuration from a YAML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::ConfigRead)?;
        Self::parse(&content)
    }

    /// Parse configuration text, trying YAML first and JSON second.
    ///
    /// On failure the error of the format the text looks like is reported.
    pub fn parse(content: &str) -> Result<Self> {
        let yaml_err = match serde_yaml::from_str(content) {
            Ok(config) => return Ok(config),
            Err(e) => e,
        };

        match serde_json::from_str(content) {
            Ok(config) => Ok(config),
            Err(json_err) if looks_like_json(content) => {
                Err(Error::ConfigParse(json_err.to_string()))
            }
            Err(_) => Err(Error::ConfigParse(yaml_err.to_string())),
        }
    }

    /// Check required fields and fill in defaults.
    pub fn validate(&mut self) -> Result<()> {
        self.terraform_cloud.organization = self.terraform_cloud.organization.trim().to_string();
        if self.terraform_cloud.organization.is_empty() {
            return Err(Error::MissingField("terraform_cloud.organization"));
        }

        if self.terraform_cloud.workspace.is_empty() {
            self.terraform_cloud.workspace = ALL_WORKSPACES.to_string();
        }

        if self.application.audience.is_empty() {
            self.application.audience = DEFAULT_AUDIENCE.to_string();
        }

        if self.application.name.is_empty() {
            self.application.name = default_application_name(&self.terraform_cloud.organization);
        }

        if self.azure.role.is_empty() && self.azure.roles.is_empty() {
            self.azure.role = DEFAULT_ROLE.to_string();
        }

        if self.azure.roles.iter().any(|role| role.name.trim().is_empty()) {
            return Err(Error::MissingField("azure.roles[].name"));
        }

        Ok(())
    }

    /// Workspaces to federate, in the order credentials are numbered.
    pub fn workspaces(&self) -> Vec<String> {
        if !self.terraform_cloud.workspaces.is_empty() {
            return self.terraform_cloud.workspaces.clone();
        }
        if !self.terraform_cloud.workspace.is_empty() {
            return vec![self.terraform_cloud.workspace.clone()];
        }
        vec![ALL_WORKSPACES.to_string()]
    }

    /// Role assignments to ensure, with empty scopes resolved to the subscription.
    pub fn role_bindings(&self, subscription_id: &str) -> Vec<RoleBinding> {
        let roles = if self.azure.roles.is_empty() && !self.azure.role.is_empty() {
            vec![RoleAssignment {
                name: self.azure.role.clone(),
                scope: self.azure.scope.clone(),
            }]
        } else {
            self.azure.roles.clone()
        };

        roles
            .into_iter()
            .map(|role| RoleBinding::new(role.name, &role.scope, subscription_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(organization: &str) -> Config {
        let mut config = Config::default();
        config.terraform_cloud.organization = organization.to_string();
        config
    }

    #[test]
    fn test_validate_fills_defaults() {
        let mut config = config_for("acme");
        config.validate().unwrap();

        assert_eq!(config.terraform_cloud.workspace, "*");
        assert_eq!(config.application.audience, DEFAULT_AUDIENCE);
        assert_eq!(config.application.name, "terraform-cloud-acme");
        assert_eq!(config.azure.role, DEFAULT_ROLE);
    }

    #[test]
    fn test_validate_keeps_role_empty_when_roles_listed() {
        let mut config = config_for("acme");
        config.azure.roles = vec![RoleAssignment {
            name: "Reader".to_string(),
            scope: String::new(),
        }];
        config.validate().unwrap();

        assert!(config.azure.role.is_empty());
        assert_eq!(config.role_bindings("sub").len(), 1);
    }

    #[test]
    fn test_validate_rejects_blank_organization() {
        let mut config = config_for("   ");
        assert!(matches!(
            config.validate(),
            Err(Error::MissingField("terraform_cloud.organization"))
        ));
    }

    #[test]
    fn test_validate_rejects_unnamed_role() {
        let mut config = config_for("acme");
        config.azure.roles = vec![RoleAssignment {
            name: " ".to_string(),
            scope: "/subscriptions/sub/resourceGroups/rg".to_string(),
        }];
        assert!(matches!(
            config.validate(),
            Err(Error::MissingField("azure.roles[].name"))
        ));
    }

    #[test]
    fn test_looks_like_json() {
        assert!(looks_like_json("  {\"a\": 1}"));
        assert!(looks_like_json("\n[1]"));
        assert!(!looks_like_json("terraform_cloud:\n  organization: acme"));
    }

    #[test]
    fn test_workspaces_prefers_list() {
        let mut config = config_for("acme");
        config.terraform_cloud.workspace = "ignored".to_string();
        config.terraform_cloud.workspaces = vec!["a".to_string(), "b".to_string()];
        assert_eq!(config.workspaces(), vec!["a", "b"]);
    }

    #[test]
    fn test_workspaces_defaults_to_all() {
        assert_eq!(config_for("acme").workspaces(), vec!["*"]);
    }
}
