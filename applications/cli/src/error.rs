/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Radio(#[from] sonora_core::RadioError),

    #[error(transparent)]
    Client(#[from] sonora_server_client::ServerClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid rules file: {0}")]
    RulesFile(#[from] serde_json::Error),
}
