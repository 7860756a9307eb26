//! Result rendering.

use clap::ValueEnum;
use std::fmt::Write;
use wif_core::ProvisionedResources;

const RULE: &str = "======================================================";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Setup instructions for a human
    #[default]
    Text,
    /// The provisioned resources as JSON
    Json,
    /// Environment variable assignments
    Env,
}

/// Render the provisioned resources for stdout.
pub fn render(
    resources: &ProvisionedResources,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    let rendered = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(resources)?;
            json.push('\n');
            json
        }
        OutputFormat::Env => render_env(resources),
        OutputFormat::Text => render_text(resources),
    };
    Ok(rendered)
}

fn render_env(resources: &ProvisionedResources) -> String {
    format!(
        "# Environment Variables for Terraform Cloud\n\
         TFC_AZURE_PROVIDER_AUTH=true\n\
         TFC_AZURE_RUN_CLIENT_ID={}\n\
         ARM_SUBSCRIPTION_ID={}\n\
         ARM_TENANT_ID={}\n",
        resources.application_id, resources.subscription_id, resources.tenant_id
    )
}

// Writing to a String cannot fail.
fn render_text(resources: &ProvisionedResources) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", RULE);
    let _ = writeln!(out, "✅ Setup Complete!");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "\nAdd these variables to your Terraform Cloud workspace:");
    let _ = writeln!(out, "\nEnvironment Variables:");
    let _ = writeln!(out, "  TFC_AZURE_PROVIDER_AUTH = true");
    let _ = writeln!(out, "  TFC_AZURE_RUN_CLIENT_ID = {}", resources.application_id);
    let _ = writeln!(out, "  ARM_SUBSCRIPTION_ID     = {}", resources.subscription_id);
    let _ = writeln!(out, "  ARM_TENANT_ID           = {}", resources.tenant_id);
    let _ = writeln!(
        out,
        "\nThese should be marked as 'Environment Variables' (not Terraform variables)"
    );
    let _ = writeln!(out, "\nFederated subject (first workspace, plan):");
    let _ = writeln!(out, "  {}", resources.subject);
    let _ = writeln!(out, "\nYour Terraform provider configuration should include:");
    let _ = writeln!(out, "  provider \"azurerm\" {{");
    let _ = writeln!(out, "    features {{}}");
    let _ = writeln!(out, "    use_oidc = true");
    let _ = writeln!(out, "  }}");
    let _ = writeln!(out, "\n{}", RULE);
    out
}
