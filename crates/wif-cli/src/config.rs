//! Configuration collection.

use console::style;
use dialoguer::Input;
use wif_core::config::{DEFAULT_AUDIENCE, DEFAULT_ROLE, default_application_name};
use wif_core::subject::ALL_WORKSPACES;
use wif_core::Config;

/// Prompt for the configuration on the terminal.
pub fn interactive() -> Result<Config, dialoguer::Error> {
    eprintln!("{}", style("====================================================").dim());
    eprintln!("{}", style("Azure Workload Identity Federation Setup").bold());
    eprintln!("for Terraform Cloud");
    eprintln!("{}", style("====================================================").dim());
    eprintln!();

    let mut config = Config::default();

    config.terraform_cloud.organization = Input::<String>::new()
        .with_prompt("Terraform Cloud organization")
        .interact_text()?
        .trim()
        .to_string();

    config.terraform_cloud.project = Input::<String>::new()
        .with_prompt("Terraform Cloud project (leave empty for none)")
        .allow_empty(true)
        .interact_text()?
        .trim()
        .to_string();

    config.terraform_cloud.workspace = Input::<String>::new()
        .with_prompt("Terraform Cloud workspace (* for all)")
        .default(ALL_WORKSPACES.to_string())
        .interact_text()?
        .trim()
        .to_string();

    config.azure.subscription_id = Input::<String>::new()
        .with_prompt("Azure subscription ID (leave empty for current)")
        .allow_empty(true)
        .interact_text()?
        .trim()
        .to_string();

    config.application.name = Input::<String>::new()
        .with_prompt("Application name")
        .default(default_application_name(&config.terraform_cloud.organization))
        .interact_text()?
        .trim()
        .to_string();

    config.application.audience = DEFAULT_AUDIENCE.to_string();
    config.azure.role = DEFAULT_ROLE.to_string();

    Ok(config)
}
