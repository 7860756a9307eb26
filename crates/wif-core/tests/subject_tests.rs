//! Subject claim and credential planning tests for wif-core.

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use wif_core::credential::plan_credentials;
use wif_core::{Config, RunPhase, build_subject_claim};

#[test]
fn test_specific_workspace_without_project() {
    assert_eq!(
        build_subject_claim("acme", "", "prod", RunPhase::Plan),
        "organization:acme:workspace:prod:run_phase:plan"
    );
    assert_eq!(
        build_subject_claim("acme", "", "prod", RunPhase::Apply),
        "organization:acme:workspace:prod:run_phase:apply"
    );
}

#[test]
fn test_all_workspaces_without_project() {
    assert_eq!(
        build_subject_claim("acme", "", "*", RunPhase::Plan),
        "organization:acme:workspace:*:run_phase:plan"
    );
}

#[test]
fn test_specific_workspace_with_project() {
    assert_eq!(
        build_subject_claim("acme", "infrastructure", "prod", RunPhase::Plan),
        "organization:acme:project:infrastructure:workspace:prod:run_phase:plan"
    );
    assert_eq!(
        build_subject_claim("acme", "infrastructure", "prod", RunPhase::Apply),
        "organization:acme:project:infrastructure:workspace:prod:run_phase:apply"
    );
}

#[test]
fn test_all_workspaces_with_project() {
    assert_eq!(
        build_subject_claim("acme", "Default Project", "*", RunPhase::Plan),
        "organization:acme:project:Default Project:workspace:*:run_phase:plan"
    );
}

#[test]
fn test_project_with_empty_workspace_defaults_to_all() {
    assert_eq!(
        build_subject_claim("acme", "Default Project", "", RunPhase::Apply),
        "organization:acme:project:Default Project:workspace:*:run_phase:apply"
    );
}

#[test]
fn test_subject_claim_is_deterministic() {
    let inputs = [
        ("acme", "", "prod"),
        ("acme", "infra", "*"),
        ("contoso", "Default Project", ""),
    ];
    for (org, project, workspace) in inputs {
        for phase in RunPhase::ALL {
            assert_eq!(
                build_subject_claim(org, project, workspace, phase),
                build_subject_claim(org, project, workspace, phase)
            );
        }
    }
}

#[test]
fn test_plan_credentials_two_per_workspace_with_unique_names() {
    let mut config = Config::default();
    config.terraform_cloud.organization = "acme".to_string();
    config.terraform_cloud.workspaces = vec![
        "network".to_string(),
        "compute".to_string(),
        "data".to_string(),
    ];
    config.validate().unwrap();

    let credentials = plan_credentials(&config);
    assert_eq!(credentials.len(), 6);

    let names: HashSet<_> = credentials.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names.len(), 6);

    let subjects: HashSet<_> = credentials.iter().map(|c| c.subject.as_str()).collect();
    assert_eq!(subjects.len(), 6);

    assert_eq!(credentials[0].name, "terraform-cloud-federated-credential-plan-0");
    assert_eq!(credentials[1].name, "terraform-cloud-federated-credential-apply-0");
    assert_eq!(
        credentials[5].subject,
        "organization:acme:workspace:data:run_phase:apply"
    );
}

#[test]
fn test_plan_credentials_single_workspace() {
    let mut config = Config::default();
    config.terraform_cloud.organization = "acme".to_string();
    config.terraform_cloud.project = "infrastructure".to_string();
    config.terraform_cloud.workspace = "prod".to_string();
    config.validate().unwrap();

    let credentials = plan_credentials(&config);
    let names: Vec<_> = credentials.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "terraform-cloud-federated-credential-plan",
            "terraform-cloud-federated-credential-apply",
        ]
    );
    assert_eq!(credentials[0].audiences, vec!["api://AzureADTokenExchange"]);
    assert_eq!(
        credentials[0].description,
        "Federated credential for TFC workspace: prod (plan)"
    );
}
