//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{Config, SamplingConfig};
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "tbforge.toml";

/// Loads the configuration from `<dir>/tbforge.toml`.
///
/// A missing file yields the default configuration; any other read error,
/// parse error or validation failure is returned.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(Config::default());
    }
    load_config_file(&config_path)
}

/// Loads the configuration from an explicit file path, which must exist.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are usable.
///
/// Applied on every load; callers that change a loaded configuration should
/// run it again.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.generator.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "generator.model must not be empty".to_string(),
        ));
    }
    if config.generator.endpoint.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "generator.endpoint must not be empty".to_string(),
        ));
    }
    validate_sampling("generator.testbench", &config.generator.testbench)?;
    validate_sampling("generator.reference", &config.generator.reference)?;

    if config.pipeline.output_dir.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "pipeline.output_dir must not be empty".to_string(),
        ));
    }
    let name = &config.pipeline.default_module_name;
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::ValidationError(format!(
            "pipeline.default_module_name '{name}' is not a plain identifier"
        )));
    }
    if config.pipeline.testbench_extension.is_empty()
        || config.pipeline.testbench_extension.contains(['.', '/', '\\'])
    {
        return Err(ConfigError::ValidationError(format!(
            "pipeline.testbench_extension '{}' must be a bare extension such as \"v\"",
            config.pipeline.testbench_extension
        )));
    }
    if config.rewrite.settle_delay == 0 {
        return Err(ConfigError::ValidationError(
            "rewrite.settle_delay must be positive".to_string(),
        ));
    }
    if config.sandbox.max_call_levels == 0 {
        return Err(ConfigError::ValidationError(
            "sandbox.max_call_levels must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_sampling(section: &str, sampling: &SamplingConfig) -> Result<(), ConfigError> {
    if !(0.0..=2.0).contains(&sampling.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "{section}.temperature must be between 0 and 2, got {}",
            sampling.temperature
        )));
    }
    if sampling.max_tokens == 0 {
        return Err(ConfigError::ValidationError(format!(
            "{section}.max_tokens must be positive"
        )));
    }
    Ok(())
}
