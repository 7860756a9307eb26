//! Federated identity credentials.

use crate::config::Config;
use crate::subject::build_subject_claim;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issuer of Terraform Cloud workload identity tokens.
pub const TFC_ISSUER: &str = "https://app.terraform.io";

/// Name prefix shared by every credential this tool manages.
pub const CREDENTIAL_NAME_PREFIX: &str = "terraform-cloud-federated-credential";

/// Terraform Cloud run stage a token is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    Plan,
    Apply,
}

impl RunPhase {
    pub const ALL: [RunPhase; 2] = [RunPhase::Plan, RunPhase::Apply];

    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Plan => "plan",
            RunPhase::Apply => "apply",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload accepted by `az ad app federated-credential create --parameters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedCredential {
    pub name: String,
    pub issuer: String,
    pub subject: String,
    pub audiences: Vec<String>,
    pub description: String,
}

/// Deterministic credential name.
///
/// The index suffix is only added when more than one workspace is federated,
/// so single-workspace setups keep stable names across re-runs.
pub fn credential_name(index: usize, total: usize, phase: RunPhase) -> String {
    if total == 1 {
        format!("{}-{}", CREDENTIAL_NAME_PREFIX, phase)
    } else {
        format!("{}-{}-{}", CREDENTIAL_NAME_PREFIX, phase, index)
    }
}

/// Whether a credential name was produced by [`credential_name`].
pub fn is_managed_credential(name: &str) -> bool {
    name.starts_with(CREDENTIAL_NAME_PREFIX)
}

/// Credentials for every (workspace, run phase) pair, plan before apply.
pub fn plan_credentials(config: &Config) -> Vec<FederatedCredential> {
    let workspaces = config.workspaces();
    let total = workspaces.len();

    workspaces
        .iter()
        .enumerate()
        .flat_map(|(index, workspace)| {
            RunPhase::ALL.into_iter().map(move |phase| FederatedCredential {
                name: credential_name(index, total, phase),
                issuer: TFC_ISSUER.to_string(),
                subject: build_subject_claim(
                    &config.terraform_cloud.organization,
                    &config.terraform_cloud.project,
                    workspace,
                    phase,
                ),
                audiences: vec![config.application.audience.clone()],
                description: format!(
                    "Federated credential for TFC workspace: {} ({})",
                    workspace, phase
                ),
            })
        })
        .collect()
}
