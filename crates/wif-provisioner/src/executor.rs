//! Tokio-based command execution.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;
use wif_core::ports::{CommandExecute, CommandOutput};
use wif_core::{Error, Result};

/// Runs external programs with `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandExecute;

#[async_trait]
impl CommandExecute for TokioCommandExecute {
    async fn command_execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(program = %program, args = ?args, "Executing command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(Error::Io)?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
