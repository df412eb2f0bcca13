//! Configuration loading and validation.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::AppConfig;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("environment variable '{0}' not found")]
    EnvNotFound(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Load and validate configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse and validate configuration from a YAML string.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_yaml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.version == 0 {
        return Err(ConfigError::Invalid(
            "version must be greater than 0".to_string(),
        ));
    }

    if config.app.name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "app.name must not be empty".to_string(),
        ));
    }

    if config.oracle.model.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "oracle.model must not be empty".to_string(),
        ));
    }

    if config.oracle.endpoint.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "oracle.endpoint must not be empty".to_string(),
        ));
    }

    if config.oracle.api_key_env.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "oracle.api_key_env must not be empty".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.oracle.temperature) {
        return Err(ConfigError::Invalid(
            "oracle.temperature must be within 0.0..=2.0".to_string(),
        ));
    }

    if config.oracle.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "oracle.timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dangchat_core::RecoveryScreen;

    const SAMPLE: &str = r#"
version: 1
app:
  name: dangchat
oracle:
  model: gemini-2.5-flash
  endpoint: https://generativelanguage.googleapis.com/v1beta
  api_key_env: GEMINI_API_KEY
  temperature: 0.8
  timeout_secs: 30
recovery: hub
"#;

    #[test]
    fn test_parse_sample_config() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.app.name, "dangchat");
        assert_eq!(config.oracle.model, "gemini-2.5-flash");
        assert_eq!(config.recovery, RecoveryScreen::Hub);
    }

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_recovery_policy_can_select_input() {
        let config = parse_config(&SAMPLE.replace("recovery: hub", "recovery: input")).unwrap();
        assert_eq!(config.recovery, RecoveryScreen::Input);
    }

    #[test]
    fn test_rejects_zero_version_and_blank_model() {
        let zero_version = SAMPLE.replace("version: 1", "version: 0");
        assert!(matches!(
            parse_config(&zero_version),
            Err(ConfigError::Invalid(_))
        ));

        let blank_model = SAMPLE.replace("model: gemini-2.5-flash", "model: \"  \"");
        assert!(matches!(
            parse_config(&blank_model),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let hot = SAMPLE.replace("temperature: 0.8", "temperature: 3.5");
        assert!(matches!(parse_config(&hot), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let extra = format!("{}\nunknown_field: true\n", SAMPLE.trim_end());
        assert!(matches!(parse_config(&extra), Err(ConfigError::Parse(_))));
    }
}
