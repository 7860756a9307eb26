//! Command handlers.

use crate::Cli;
use crate::output::render;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use wif_core::Config;
use wif_provisioner::{AzCli, Provisioner, TokioCommandExecute};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Error in interactive setup: {0}")]
    Interactive(#[from] dialoguer::Error),
    #[error("Error loading config: {0}")]
    Load(#[source] wif_core::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[source] wif_core::Error),
    #[error("Error setting up Azure workload identity: {0}")]
    Provision(#[source] wif_core::Error),
    #[error("Error rendering output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Collect the configuration, provision Azure and render the result.
pub async fn setup(cli: &Cli) -> Result<String, SetupError> {
    let config = if cli.interactive {
        validated(crate::config::interactive()?)?
    } else {
        debug!(path = %cli.config.display(), "Loading configuration");
        load_validated(&cli.config)?
    };

    let az = AzCli::new(Arc::new(TokioCommandExecute));
    let resources = Provisioner::new(az)
        .provision(&config)
        .await
        .map_err(SetupError::Provision)?;

    Ok(render(&resources, cli.output)?)
}

/// Load a configuration file and apply defaults.
pub fn load_validated(path: &Path) -> Result<Config, SetupError> {
    let config = Config::load(path).map_err(SetupError::Load)?;
    validated(config)
}

fn validated(mut config: Config) -> Result<Config, SetupError> {
    config.validate().map_err(SetupError::Invalid)?;
    Ok(config)
}
