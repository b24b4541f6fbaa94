//! Configuration loading from disk.
//!
//! A config file is layered over a base config (the chosen preset's), so a
//! file only needs the keys it changes.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::PipelineConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Base config could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file over the defaults.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    load_config_over(path, &PipelineConfig::default())
}

/// Load a TOML file and layer it over `base`.
pub fn load_config_over(path: &Path, base: &PipelineConfig) -> Result<PipelineConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config_over(&content, base)
}

/// Parse and validate configuration from TOML text over the defaults.
pub fn parse_config(content: &str) -> Result<PipelineConfig, ConfigError> {
    parse_config_over(content, &PipelineConfig::default())
}

/// Parse TOML text, overlay it on `base` key by key, then validate.
pub fn parse_config_over(content: &str, base: &PipelineConfig) -> Result<PipelineConfig, ConfigError> {
    let overlay: toml::Table = content.parse()?;
    let mut merged: toml::Table = toml::to_string(base)?.parse()?;
    merge_tables(&mut merged, overlay);

    let config: PipelineConfig = toml::Value::Table(merged).try_into()?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        space_id = %config.space.space_id,
        network = %config.space.network,
        "Configuration parsed"
    );

    Ok(config)
}

/// Nested tables merge; any other value in `overlay` replaces the base value.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
