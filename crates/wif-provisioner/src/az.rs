//! Azure CLI wrapper.

use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use wif_core::ports::CommandExecute;
use wif_core::{Error, Result};

const AZ: &str = "az";

/// Thin wrapper over the `az` tool, run through a [`CommandExecute`] port.
#[derive(Clone)]
pub struct AzCli {
    executor: Arc<dyn CommandExecute>,
}

impl AzCli {
    pub fn new(executor: Arc<dyn CommandExecute>) -> Self {
        Self { executor }
    }

    /// Verify the `az` tool can be started.
    pub async fn check(&self) -> Result<()> {
        match self.executor.command_execute(AZ, &["--version"]).await {
            Ok(output) if output.success() => Ok(()),
            _ => Err(Error::CliNotFound),
        }
    }

    /// Run an `az` command and return its trimmed stdout.
    ///
    /// A non-zero exit becomes [`Error::CommandFailed`] carrying both output streams.
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        debug!(command = %command_line(args), "Running Azure CLI");

        let output = self.executor.command_execute(AZ, args).await?;
        if !output.success() {
            return Err(Error::CommandFailed {
                command: command_line(args),
                status: output.status(),
                output: output.combined(),
            });
        }
        Ok(output.stdout.trim().to_string())
    }

    /// Run a query command; empty output means nothing matched.
    pub async fn query(&self, args: &[&str]) -> Result<Option<String>> {
        let value = self.run(args).await?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    /// Read a field of the signed-in account, e.g. `id` or `tenantId`.
    pub async fn account_field(&self, field: &str) -> Result<String> {
        self.run(&["account", "show", "--query", field, "-o", "tsv"])
            .await
    }

    /// Names of the federated credentials attached to an application.
    pub async fn list_federated_credentials(&self, app_id: &str) -> Result<Vec<String>> {
        let names = self
            .run(&[
                "ad",
                "app",
                "federated-credential",
                "list",
                "--id",
                app_id,
                "--query",
                "[].name",
                "-o",
                "tsv",
            ])
            .await?;

        Ok(names
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub async fn delete_federated_credential(&self, app_id: &str, name: &str) -> Result<()> {
        self.run(&[
            "ad",
            "app",
            "federated-credential",
            "delete",
            "--id",
            app_id,
            "--federated-credential-id",
            name,
        ])
        .await
        .map(|_| ())
    }

    /// Create a federated credential from a JSON parameters file.
    pub async fn create_federated_credential(&self, app_id: &str, parameters: &Path) -> Result<()> {
        let parameters = format!("@{}", parameters.display());
        self.run(&[
            "ad",
            "app",
            "federated-credential",
            "create",
            "--id",
            app_id,
            "--parameters",
            &parameters,
        ])
        .await
        .map(|_| ())
    }
}

fn command_line(args: &[&str]) -> String {
    let mut line = AZ.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
