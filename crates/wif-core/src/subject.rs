//! Terraform Cloud OIDC subject claims.
//!
//! Terraform Cloud presents its run identity in the `sub` claim of the
//! workload identity token. Azure only accepts the token when a federated
//! credential's subject matches that string exactly.

use crate::credential::RunPhase;

/// Workspace value that matches every workspace in an organization or project.
pub const ALL_WORKSPACES: &str = "*";

/// Build the subject claim Terraform Cloud emits for a run.
///
/// An empty `project` selects the organization-level format. An empty
/// `workspace` is treated the same as `*`. Names are inserted verbatim; a
/// literal `:` in any of them produces a claim Terraform Cloud never emits.
pub fn build_subject_claim(
    organization: &str,
    project: &str,
    workspace: &str,
    run_phase: RunPhase,
) -> String {
    let workspace = if workspace.is_empty() {
        ALL_WORKSPACES
    } else {
        workspace
    };

    if project.is_empty() {
        format!(
            "organization:{}:workspace:{}:run_phase:{}",
            organization,
            workspace,
            run_phase.as_str()
        )
    } else {
        format!(
            "organization:{}:project:{}:workspace:{}:run_phase:{}",
            organization,
            project,
            workspace,
            run_phase.as_str()
        )
    }
}
