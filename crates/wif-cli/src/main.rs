//! Azure workload identity setup for Terraform Cloud.

use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod config;
mod handlers;
mod output;


use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "setup-azure-workload-identity")]
#[command(
    author,
    about = "Set up Azure AD workload identity federation for Terraform Cloud",
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// Path to configuration file (YAML or JSON)
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Prompt for configuration instead of reading a file
    #[arg(long)]
    pub interactive: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Show version
    #[arg(long)]
    pub version: bool,
}

fn version_banner() -> String {
    format!("Azure Workload Identity Setup v{}", env!("CARGO_PKG_VERSION"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if cli.version {
        println!("{}", version_banner());
        return ExitCode::SUCCESS;
    }

    match handlers::setup(&cli).await {
        Ok(rendered) => {
            print!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            ExitCode::FAILURE
        }
    }
}
