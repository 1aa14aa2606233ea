/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sonora_core::Difficulty;
use sonora_server_client::{ServerConfig, DEFAULT_TIMEOUT_SECS};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "sonora.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub radio: RadioSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// API root of the backend
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthSettings {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RadioSettings {
    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub advanced: bool,
}

impl CliConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (e.g. SONORA_SERVER__URL)
        settings = settings.add_source(
            config::Environment::with_prefix("SONORA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(CliError::Config(
                "server URL is required (set server.url or SONORA_SERVER__URL)".to_string(),
            ));
        }

        if self.auth.username.is_some() != self.auth.password.is_some() {
            return Err(CliError::Config(
                "auth.username and auth.password must be set together".to_string(),
            ));
        }

        Ok(())
    }

    /// Client configuration for the backend
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.server.url.clone()).with_timeout(self.server.timeout_secs)
    }

    /// Login credentials, if configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.auth.username, &self.auth.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        url: String::new(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            auth: AuthSettings::default(),
            radio: RadioSettings::default(),
        }
    }
}
