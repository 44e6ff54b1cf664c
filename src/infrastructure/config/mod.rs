//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::application::errors::ConfigError;

/// Default config file name, looked up in the home directory
pub const CONFIG_FILE_NAME: &str = ".robot.yaml";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub slack: SlackConfig,
    pub dispatcher: DispatcherConfig,
    pub executor: ExecutorConfig,
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub listen: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SlackConfig {
    pub token: Option<String>,
    pub signing_secret: Option<String>,
    pub api_base: String,
    /// Skip discovering the bot's user id from mentions
    pub bot_user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DispatcherConfig {
    pub interval_secs: u64,
    pub wake_on_enqueue: bool,
}

/// Which programs may be run. Empty allows everything.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExecutorConfig {
    pub allowed_commands: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "slack-robot".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            path: "/events-endpoint".to_string(),
        }
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            token: None,
            signing_secret: None,
            api_base: "https://slack.com/api".to_string(),
            bot_user_id: None,
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            wake_on_enqueue: false,
        }
    }
}

impl DispatcherConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// `~/.robot.yaml`, if a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| Path::new(&home).join(CONFIG_FILE_NAME))
    }

    /// Load `path` if it exists (defaults otherwise), then apply environment overrides
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::load(path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(token) = var("SLACK_BOT_USER_OAUTH_ACCESS_TOKEN") {
            self.slack.token = Some(token);
        }

        if let Some(secret) = var("SLACK_SIGNING_SECRET") {
            self.slack.signing_secret = Some(secret);
        }

        if let Some(api_base) = var("SLACK_API_BASE") {
            self.slack.api_base = api_base;
        }

        if let Some(debug) = var("SLACK_BOT_DEBUG") {
            self.debug = matches!(
                debug.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Check the settings the server cannot start without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slack.token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField(
                "slack.token (SLACK_BOT_USER_OAUTH_ACCESS_TOKEN)".to_string(),
            ));
        }
        if self.slack.signing_secret.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField(
                "slack.signing-secret (SLACK_SIGNING_SECRET)".to_string(),
            ));
        }
        if !self.server.path.starts_with('/') {
            return Err(ConfigError::InvalidValue(format!(
                "server.path must start with '/': {}",
                self.server.path
            )));
        }
        if self.dispatcher.interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "dispatcher.interval-secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
