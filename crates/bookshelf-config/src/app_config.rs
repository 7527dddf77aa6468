//! Application configuration
//!
//! Configuration loaded from .bookshelf.toml.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from .bookshelf.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Production mode disables development-only store checks
    #[serde(default = "default_production")]
    pub production: bool,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// Store wiring options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct StoreConfig {
    /// Log every dispatched action and the state it was applied to.
    /// Falls back to `!production` when unset.
    #[serde(default)]
    pub log_actions: Option<bool>,

    /// Install the immutability guard around the root reducer.
    /// Falls back to `!production` when unset.
    #[serde(default)]
    pub runtime_checks: Option<bool>,
}

/// Settings for the demo authentication service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    /// The only username the demo service accepts
    #[serde(default = "default_username")]
    pub username: String,

    /// Display name of the user returned on a successful login
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Simulated network latency of a login call, in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_production() -> bool {
    !cfg!(debug_assertions)
}

fn default_username() -> String {
    "test".to_string()
}

fn default_display_name() -> String {
    "User".to_string()
}

fn default_latency_ms() -> u64 {
    500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            production: default_production(),
            store: StoreConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            display_name: default_display_name(),
            latency_ms: default_latency_ms(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Whether dispatched actions should be logged
    pub fn log_actions(&self) -> bool {
        self.store.log_actions.unwrap_or(!self.production)
    }

    /// Whether the immutability guard should wrap the root reducer
    pub fn runtime_checks(&self) -> bool {
        self.store.runtime_checks.unwrap_or(!self.production)
    }
}
