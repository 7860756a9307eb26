//! Idempotent Azure AD provisioning for Terraform Cloud workload identity.
//!
//! Every Azure mutation goes through the `az` command-line tool. Each step
//! looks up the current state first and only creates what is missing, so the
//! provisioner can be re-run against an existing setup.

pub mod az;
pub mod ensure;
pub mod executor;
pub mod provisioner;


pub use az::AzCli;
pub use ensure::{Ensured, Resource, ensure};
pub use executor::TokioCommandExecute;
pub use provisioner::{PROPAGATION_DELAY, Provisioner};
