/*
[INPUT]:  YAML configuration file, AGRISYNC__* environment variables, CLI overrides
[OUTPUT]: Parsed application configuration, HTTP client and session user
[POS]:    Configuration layer - application setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use agrisync_adapter::{AgrisyncClient, ClientConfig, Credentials, DEFAULT_BASE_URL, Role, User};
use anyhow::Context;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Prefix of environment overrides, e.g. `AGRISYNC__API__TOKEN`
pub const ENV_PREFIX: &str = "AGRISYNC";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    /// The signed-in user the task screens act as
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Authorization scheme sent with the token
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            auth_scheme: default_auth_scheme(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub user_id: u64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `agrisync_tasks=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also append logs to this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_auth_scheme() -> String {
    "Bearer".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `<config_dir>/agrisync/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("agrisync").join("config.yaml"))
}

impl AppConfig {
    /// Load from `path` (required) or the default location (optional), then
    /// apply environment overrides
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
            }
            None => {
                if let Some(default) = default_config_path() {
                    builder = builder
                        .add_source(File::from(default.as_path()).format(FileFormat::Yaml).required(false));
                }
            }
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;
        settings
            .try_deserialize()
            .context("Invalid configuration; run `agrisync-tasks init` to create one")
    }

    /// Write as YAML, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let yaml = serde_yaml::to_string(self).context("Failed to serialize configuration")?;
        std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Command-line flags win over file and environment
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        token: Option<String>,
        log_level: Option<String>,
    ) {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(token) = token {
            self.api.token = Some(token);
        }
        if let Some(level) = log_level {
            self.logging.level = level;
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    /// Build the HTTP client, attaching credentials when a token is set
    pub fn build_client(&self) -> anyhow::Result<AgrisyncClient> {
        let mut client = AgrisyncClient::with_config(self.client_config(), &self.api.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.api.base_url))?;
        if let Some(token) = self.api.token.as_deref().filter(|token| !token.is_empty()) {
            client.set_credentials(Credentials {
                token: token.to_string(),
                scheme: self.api.auth_scheme.clone(),
            });
        }
        Ok(client)
    }

    pub fn session_user(&self) -> User {
        User {
            id: self.session.user_id,
            username: self.session.username.clone(),
            email: None,
            role: self.session.role,
        }
    }
}
