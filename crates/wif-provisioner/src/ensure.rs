//! Check-then-create for Azure resources.

use crate::az::AzCli;
use async_trait::async_trait;
use wif_core::{Error, Result, RoleBinding};

/// A resource that can be looked up and, when missing, created.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Resource kind for messages, e.g. `application`.
    fn kind(&self) -> &'static str;

    /// Identifier of the existing resource, if any.
    async fn lookup(&self, az: &AzCli) -> Result<Option<String>>;

    /// Create the resource and return its identifier.
    async fn create(&self, az: &AzCli) -> Result<String>;
}

/// Outcome of [`ensure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ensured {
    Found(String),
    Created(String),
}

impl Ensured {
    pub fn id(&self) -> &str {
        match self {
            Ensured::Found(id) | Ensured::Created(id) => id,
        }
    }

    pub fn into_id(self) -> String {
        match self {
            Ensured::Found(id) | Ensured::Created(id) => id,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Ensured::Created(_))
    }
}

/// Make sure `resource` exists, creating it only when the lookup finds nothing.
///
/// A failed lookup is returned as an error rather than treated as "not found".
pub async fn ensure<R: Resource + ?Sized>(az: &AzCli, resource: &R) -> Result<Ensured> {
    let existing = resource
        .lookup(az)
        .await
        .map_err(|e| Error::step(format!("look up {}", resource.kind()), e))?;

    if let Some(id) = existing {
        return Ok(Ensured::Found(id));
    }

    let id = resource
        .create(az)
        .await
        .map_err(|e| Error::step(format!("create {}", resource.kind()), e))?;
    Ok(Ensured::Created(id))
}

/// Azure AD application, keyed by display name.
///
/// When several applications share the name, the first one listed wins.
pub struct Application<'a> {
    pub display_name: &'a str,
}

#[async_trait]
impl Resource for Application<'_> {
    fn kind(&self) -> &'static str {
        "application"
    }

    async fn lookup(&self, az: &AzCli) -> Result<Option<String>> {
        az.query(&[
            "ad",
            "app",
            "list",
            "--display-name",
            self.display_name,
            "--query",
            "[0].appId",
            "-o",
            "tsv",
        ])
        .await
    }

    async fn create(&self, az: &AzCli) -> Result<String> {
        az.run(&[
            "ad",
            "app",
            "create",
            "--display-name",
            self.display_name,
            "--query",
            "appId",
            "-o",
            "tsv",
        ])
        .await
    }
}

/// Service principal backing an application.
pub struct ServicePrincipal<'a> {
    pub app_id: &'a str,
}

#[async_trait]
impl Resource for ServicePrincipal<'_> {
    fn kind(&self) -> &'static str {
        "service principal"
    }

    async fn lookup(&self, az: &AzCli) -> Result<Option<String>> {
        let filter = format!("appId eq '{}'", self.app_id);
        az.query(&[
            "ad", "sp", "list", "--filter", &filter, "--query", "[0].id", "-o", "tsv",
        ])
        .await
    }

    async fn create(&self, az: &AzCli) -> Result<String> {
        az.run(&[
            "ad", "sp", "create", "--id", self.app_id, "--query", "id", "-o", "tsv",
        ])
        .await
    }
}

/// Role granted to a principal at a scope.
pub struct RoleAssignment<'a> {
    pub assignee: &'a str,
    pub binding: &'a RoleBinding,
}

#[async_trait]
impl Resource for RoleAssignment<'_> {
    fn kind(&self) -> &'static str {
        "role assignment"
    }

    async fn lookup(&self, az: &AzCli) -> Result<Option<String>> {
        az.query(&[
            "role",
            "assignment",
            "list",
            "--assignee",
            self.assignee,
            "--role",
            &self.binding.role,
            "--scope",
            &self.binding.scope,
            "--query",
            "[0].id",
            "-o",
            "tsv",
        ])
        .await
    }

    async fn create(&self, az: &AzCli) -> Result<String> {
        az.run(&[
            "role",
            "assignment",
            "create",
            "--assignee",
            self.assignee,
            "--role",
            &self.binding.role,
            "--scope",
            &self.binding.scope,
            "--query",
            "id",
            "-o",
            "tsv",
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wif_core::ports::{CommandExecute, CommandOutput};

    struct Widget {
        existing: Option<String>,
        lookup_fails: bool,
        creates: AtomicUsize,
    }

    #[async_trait]
    impl Resource for Widget {
        fn kind(&self) -> &'static str {
            "widget"
        }

        async fn lookup(&self, _az: &AzCli) -> Result<Option<String>> {
            if self.lookup_fails {
                return Err(Error::CliNotFound);
            }
            Ok(self.existing.clone())
        }

        async fn create(&self, _az: &AzCli) -> Result<String> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            Ok("new-widget".to_string())
        }
    }

    struct Unused;

    #[async_trait]
    impl CommandExecute for Unused {
        async fn command_execute(&self, _program: &str, _args: &[&str]) -> Result<CommandOutput> {
            unreachable!("widgets never shell out")
        }
    }

    fn widget(existing: Option<&str>, lookup_fails: bool) -> Widget {
        Widget {
            existing: existing.map(str::to_string),
            lookup_fails,
            creates: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_existing_resource_is_reused() {
        let az = AzCli::new(Arc::new(Unused));
        let resource = widget(Some("old-widget"), false);

        let ensured = ensure(&az, &resource).await.unwrap();

        assert_eq!(ensured, Ensured::Found("old-widget".to_string()));
        assert_eq!(resource.creates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_resource_is_created() {
        let az = AzCli::new(Arc::new(Unused));
        let resource = widget(None, false);

        let ensured = ensure(&az, &resource).await.unwrap();

        assert!(ensured.was_created());
        assert_eq!(ensured.id(), "new-widget");
        assert_eq!(resource.creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_does_not_create() {
        let az = AzCli::new(Arc::new(Unused));
        let resource = widget(None, true);

        let err = ensure(&az, &resource).await.unwrap_err();

        assert!(err.to_string().starts_with("failed to look up widget"));
        assert_eq!(resource.creates.load(Ordering::SeqCst), 0);
    }
}
