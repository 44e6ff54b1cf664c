//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Slack API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("empty command")]
    Empty,

    #[error("command not allowed: {0}")]
    NotAllowed(String),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} {status}")]
    Exited {
        program: String,
        status: String,
        output: String,
    },
}

impl ExecError {
    /// Output captured before the failure, if any
    pub fn output(&self) -> &str {
        match self {
            ExecError::Exited { output, .. } => output,
            _ => "",
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
