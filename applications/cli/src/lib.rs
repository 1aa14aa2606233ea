//! Sonora CLI
//!
//! Command line front end over [`sonora_core::RadioWorkflow`] and the
//! [`sonora_server_client`] backend client.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod rules;

pub use cli::Cli;
pub use commands::run;
pub use config::CliConfig;
pub use error::{CliError, Result};
