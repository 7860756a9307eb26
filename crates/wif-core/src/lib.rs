//! Workload Identity Core
//!
//! Core domain types for federating Terraform Cloud run identities with
//! Azure AD. This crate has minimal dependencies and defines the shared
//! vocabulary used by the provisioner and the command-line interface.

pub mod config;
pub mod credential;
pub mod error;
pub mod ports;
pub mod resources;
pub mod subject;

pub use config::{ApplicationConfig, AzureConfig, Config, RoleAssignment, TerraformCloudConfig};
pub use credential::{FederatedCredential, RunPhase};
pub use error::{Error, Result};
pub use resources::{ProvisionedResources, RoleBinding};
pub use subject::build_subject_claim;
