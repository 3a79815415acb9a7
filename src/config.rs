use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use freshkeep_inventory::SessionOptions;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// Nominal pantry capacity used for the stock overview counters.
    #[serde(default = "default_total_capacity")]
    pub total_capacity: u32,
    /// Days covered by the recent-activity view.
    #[serde(default = "default_recent_window_days")]
    pub recent_window_days: i64,
    /// Rows shown in the collapsed recent-activity view.
    #[serde(default = "default_recent_visible")]
    pub recent_visible: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            total_capacity: default_total_capacity(),
            recent_window_days: default_recent_window_days(),
            recent_visible: default_recent_visible(),
        }
    }
}

fn default_total_capacity() -> u32 {
    100
}

fn default_recent_window_days() -> i64 {
    7
}

fn default_recent_visible() -> usize {
    4
}

impl InventoryConfig {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            total_capacity: self.total_capacity,
            recent_window_days: self.recent_window_days,
            recent_visible: self.recent_visible,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// DeepSeek API key. Empty means the assistant is unavailable and
    /// every recommendation is served from the canned fallback.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_model() -> String {
    freshkeep_assistant::DEFAULT_MODEL.to_string()
}

fn default_timeout_ms() -> u64 {
    freshkeep_assistant::DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Layered load: hardcoded defaults, then the config file, then
    /// `FRESHKEEP__`-prefixed environment variables on top.
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Explicit path beats CONFIG_PATH beats the conventional location.
        let file = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // A missing file is not an error; the defaults carry.
        if std::path::Path::new(&file).exists() {
            builder = builder.add_source(File::with_name(&file));
        }

        builder = builder.add_source(
            Environment::with_prefix("FRESHKEEP")
                .separator("__")
                .try_parsing(true),
        );

        // Unprefixed variables existing deployments already rely on.
        if let Ok(api_key) = env::var("DEEPSEEK_API_KEY") {
            builder = builder.set_override("assistant.api_key", api_key)?;
        }
        if let Ok(model) = env::var("DEEPSEEK_MODEL") {
            builder = builder.set_override("assistant.model", model)?;
        }
        if let Ok(raw) = env::var("AI_TIMEOUT_MS") {
            let timeout_ms: u64 = raw.parse().map_err(|_| {
                ConfigError::Message(format!("AI_TIMEOUT_MS must be an integer, got {raw:?}"))
            })?;
            builder = builder.set_override("assistant.timeout_ms", timeout_ms)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Reject values the session and assistant cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.inventory.total_capacity == 0 {
            return Err("Inventory total_capacity must be greater than 0".to_string());
        }
        if self.inventory.recent_window_days < 1 {
            return Err("Inventory recent_window_days must be at least 1".to_string());
        }
        if self.assistant.timeout_ms == 0 {
            return Err("Assistant timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.inventory.total_capacity, 100);
        assert_eq!(config.inventory.recent_window_days, 7);
        assert_eq!(config.inventory.recent_visible, 4);
        assert_eq!(config.assistant.api_key, "");
        assert_eq!(config.assistant.model, "deepseek-chat");
        assert_eq!(config.assistant.timeout_ms, 15_000);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_session_options_follow_inventory_section() {
        let inventory = InventoryConfig {
            total_capacity: 30,
            recent_window_days: 14,
            recent_visible: 6,
        };

        let options = inventory.session_options();
        assert_eq!(options.total_capacity, 30);
        assert_eq!(options.recent_window_days, 14);
        assert_eq!(options.recent_visible, 6);
    }

    #[test]
    fn test_validation_zero_capacity() {
        let mut config = Config::default();
        config.inventory.total_capacity = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_window() {
        let mut config = Config::default();
        config.inventory.recent_window_days = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = Config::default();
        config.assistant.timeout_ms = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = Config::default();

        assert!(config.validate().is_ok());
    }
}
