//! # dangchat-config
//!
//! YAML configuration for the embedding app: identity of the app, oracle
//! backend settings, and the fetch-failure recovery policy. Loaded once at
//! startup and validated before use.

pub mod loader;

use serde::{Deserialize, Serialize};

use dangchat_core::RecoveryScreen;

pub use loader::{load_config, parse_config, ConfigError};

/// Top-level configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Schema version; must be > 0.
    pub version: u32,
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub oracle: OracleSection,
    /// Screen a failed fetch recovers to.
    #[serde(default)]
    pub recovery: RecoveryScreen,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            app: AppSection::default(),
            oracle: OracleSection::default(),
            recovery: RecoveryScreen::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    pub name: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "dangchat".to_string(),
        }
    }
}

/// Oracle backend settings. The API key itself never lives in the file;
/// only the name of the environment variable that carries it does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OracleSection {
    pub model: String,
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for OracleSection {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            temperature: 0.8,
            timeout_secs: 30,
        }
    }
}

impl OracleSection {
    /// Resolve the API key from the configured environment variable.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::EnvNotFound(self.api_key_env.clone())),
        }
    }
}
