//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the core domain and external adapters.

use crate::Result;
use async_trait::async_trait;

/// Captured result of an external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr, as a terminal would show them.
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&self.stderr);
        }
        combined
    }

    /// Human-readable exit status.
    pub fn status(&self) -> String {
        match self.code {
            Some(code) => format!("exit status: {}", code),
            None => "termination by signal".to_string(),
        }
    }
}

/// Executes external programs.
#[async_trait]
pub trait CommandExecute: Send + Sync {
    /// Run `program` with `args` to completion.
    ///
    /// Returns `Err` only when the program could not be started; a non-zero
    /// exit is reported through [`CommandOutput::code`].
    async fn command_execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}
