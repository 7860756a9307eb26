//! Sequential provisioning of the federated identity.

use crate::az::AzCli;
use crate::ensure::{Application, Ensured, RoleAssignment, ServicePrincipal, ensure};
use std::io::Write;
use tokio::time::{Duration, sleep};
use tracing::{info, warn};
use wif_core::credential::{FederatedCredential, is_managed_credential, plan_credentials};
use wif_core::{Config, Error, ProvisionedResources, Result};

/// Wait after the service principal step so Azure AD replicates the new
/// objects before credentials are attached.
pub const PROPAGATION_DELAY: Duration = Duration::from_secs(5);

/// Provisions an application, its service principal, federated credentials
/// and role assignments for a validated [`Config`].
pub struct Provisioner {
    az: AzCli,
}

impl Provisioner {
    pub fn new(az: AzCli) -> Self {
        Self { az }
    }

    /// Run every step in order. Only role assignment failures are tolerated.
    pub async fn provision(&self, config: &Config) -> Result<ProvisionedResources> {
        info!("Checking Azure CLI");
        self.az.check().await?;

        let subscription_id = self.subscription_id(config).await?;
        let tenant_id = self.tenant_id(config).await?;

        info!(
            organization = %config.terraform_cloud.organization,
            project = %config.terraform_cloud.project,
            workspace = %config.terraform_cloud.workspace,
            subscription = %subscription_id,
            tenant = %tenant_id,
            application = %config.application.name,
            "Resolved configuration"
        );

        let application_id = self.ensure_application(config).await?;
        self.ensure_service_principal(&application_id).await?;

        info!(
            seconds = PROPAGATION_DELAY.as_secs(),
            "Waiting for directory propagation"
        );
        sleep(PROPAGATION_DELAY).await;

        self.remove_managed_credentials(&application_id).await;
        let subject = self.create_credentials(config, &application_id).await?;

        self.assign_roles(config, &application_id, &subscription_id)
            .await;

        Ok(ProvisionedResources {
            application_id,
            subscription_id,
            tenant_id,
            subject,
        })
    }

    async fn subscription_id(&self, config: &Config) -> Result<String> {
        if !config.azure.subscription_id.is_empty() {
            return Ok(config.azure.subscription_id.clone());
        }

        info!("Getting current subscription");
        let id = self
            .az
            .account_field("id")
            .await
            .map_err(|e| Error::step("get subscription", e))?;
        info!(subscription = %id, "Using subscription");
        Ok(id)
    }

    async fn tenant_id(&self, config: &Config) -> Result<String> {
        if !config.azure.tenant_id.is_empty() {
            return Ok(config.azure.tenant_id.clone());
        }

        self.az
            .account_field("tenantId")
            .await
            .map_err(|e| Error::step("get tenant", e))
    }

    async fn ensure_application(&self, config: &Config) -> Result<String> {
        info!(name = %config.application.name, "Checking for existing Azure AD application");
        let application = Application {
            display_name: &config.application.name,
        };

        let ensured = ensure(&self.az, &application).await?;
        match &ensured {
            Ensured::Found(id) => info!(app_id = %id, "Found existing application"),
            Ensured::Created(id) => info!(app_id = %id, "Application created"),
        }
        Ok(ensured.into_id())
    }

    async fn ensure_service_principal(&self, app_id: &str) -> Result<()> {
        info!("Checking for existing service principal");
        let ensured = ensure(&self.az, &ServicePrincipal { app_id }).await?;
        if ensured.was_created() {
            info!(object_id = %ensured.id(), "Service principal created");
        } else {
            info!(object_id = %ensured.id(), "Service principal already exists");
        }
        Ok(())
    }

    /// Delete credentials left by earlier runs. Failures are ignored.
    async fn remove_managed_credentials(&self, app_id: &str) {
        info!("Cleaning up old credentials");
        let Ok(names) = self.az.list_federated_credentials(app_id).await else {
            return;
        };

        for name in names.iter().filter(|name| is_managed_credential(name)) {
            info!(credential = %name, "Deleting credential");
            let _ = self.az.delete_federated_credential(app_id, name).await;
        }
    }

    /// Create one credential per (workspace, run phase) and return the first subject.
    async fn create_credentials(&self, config: &Config, app_id: &str) -> Result<String> {
        let credentials = plan_credentials(config);
        info!(
            workspaces = credentials.len() / 2,
            credentials = credentials.len(),
            "Creating federated credentials"
        );

        for credential in &credentials {
            info!(
                credential = %credential.name,
                subject = %credential.subject,
                "Creating federated credential"
            );
            self.create_credential(app_id, credential)
                .await
                .map_err(|e| {
                    Error::step(
                        format!("create federated credential {}", credential.name),
                        e,
                    )
                })?;
        }

        Ok(credentials
            .into_iter()
            .next()
            .map(|credential| credential.subject)
            .unwrap_or_default())
    }

    async fn create_credential(&self, app_id: &str, credential: &FederatedCredential) -> Result<()> {
        // The payload goes through a file so `az` never sees it as shell-escaped arguments.
        let mut parameters = tempfile::Builder::new()
            .prefix("federated-cred-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(parameters.as_file_mut(), credential)?;
        parameters.flush()?;

        self.az
            .create_federated_credential(app_id, parameters.path())
            .await
    }

    async fn assign_roles(&self, config: &Config, app_id: &str, subscription_id: &str) {
        info!("Assigning roles");
        for binding in config.role_bindings(subscription_id) {
            let assignment = RoleAssignment {
                assignee: app_id,
                binding: &binding,
            };

            match ensure(&self.az, &assignment).await {
                Ok(Ensured::Found(_)) => {
                    info!(role = %binding.role, scope = %binding.scope, "Role already assigned")
                }
                Ok(Ensured::Created(_)) => {
                    info!(role = %binding.role, scope = %binding.scope, "Assigned role")
                }
                // Assignment can race with directory replication and fail even
                // though it already exists.
                Err(e) => warn!(
                    role = %binding.role,
                    scope = %binding.scope,
                    error = %e,
                    "Could not assign role"
                ),
            }
        }
    }
}
