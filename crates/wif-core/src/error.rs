//! Error types for workload identity provisioning.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Configuration errors
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("failed to read config file: {0}")]
    ConfigRead(#[source] std::io::Error),

    #[error("failed to parse config (tried YAML and JSON): {0}")]
    ConfigParse(String),

    // External tool errors
    #[error("Azure CLI not found. Please install from https://aka.ms/azure-cli")]
    CliNotFound,

    #[error("command `{command}` failed with {status}\nOutput: {output}")]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },

    // Provisioning errors
    #[error("failed to {action}: {source}")]
    Step {
        action: String,
        #[source]
        source: Box<Error>,
    },

    // Infrastructure errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an error with the provisioning action that produced it.
    pub fn step(action: impl Into<String>, source: Error) -> Self {
        Error::Step {
            action: action.into(),
            source: Box::new(source),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_error_message_includes_action_and_cause() {
        let err = Error::step("create application", Error::CliNotFound);
        let message = err.to_string();
        assert!(message.starts_with("failed to create application: "));
        assert!(message.contains("Azure CLI not found"));
    }

    #[test]
    fn test_command_failure_folds_output() {
        let err = Error::CommandFailed {
            command: "az ad app create".to_string(),
            status: "exit status: 1".to_string(),
            output: "ERROR: Insufficient privileges".to_string(),
        };
        assert!(err.to_string().contains("Insufficient privileges"));
    }
}
