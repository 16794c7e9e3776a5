use super::types::Config;
use super::{expand_env_vars, expand_tilde};
use crate::schedule::Schedule;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML in '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("validation failed:\n{}", .0.join("\n"))]
    ValidationList(Vec<String>),

    #[error("validation failed: {0}")]
    Validation(String),
}

/// Loads, expands and validates the configuration. Any failure here is fatal:
/// the process must not start scheduling with a partial config.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let yaml_string = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read config file '{}': {}", path.display(), e),
        ))
    })?;

    // Expand environment variables before parsing so secrets can live
    // outside the file.
    let yaml_string = expand_env_vars(&yaml_string);
    check_unexpanded_vars(&yaml_string)?;

    let mut config: Config = serde_yaml::from_str(&yaml_string).map_err(|source| {
        ConfigError::YamlParse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    config.output.directory = expand_tilde(&config.output.directory);

    validate_config(&config)?;

    Ok(config)
}

/// Reports environment variables that were referenced but not set.
fn check_unexpanded_vars(yaml_string: &str) -> Result<(), ConfigError> {
    let re = Regex::new(r"\$env\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex");
    let mut unexpanded: Vec<String> = re
        .captures_iter(yaml_string)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect();

    if unexpanded.is_empty() {
        return Ok(());
    }

    unexpanded.sort();
    unexpanded.dedup();

    Err(ConfigError::Validation(format!(
        "environment variables referenced in the config are not set: {}\n\
         Either export them or replace the $env{{...}} references with literal values.",
        unexpanded.join(", ")
    )))
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.cmx.host.is_empty() {
        errors.push("cmx.host cannot be empty".to_string());
    }
    if config.cmx.scheme != "http" && config.cmx.scheme != "https" {
        errors.push(format!(
            "cmx.scheme must be 'http' or 'https', got '{}'",
            config.cmx.scheme
        ));
    }
    if config.cmx.username.is_empty() {
        errors.push("cmx.username cannot be empty".to_string());
    }
    if config.cmx.password.is_empty() {
        errors.push("cmx.password cannot be empty".to_string());
    }
    if config.cmx.max_attempts < 1 {
        errors.push("cmx.max_attempts must be at least 1".to_string());
    }
    if config.cmx.clients_path.is_empty() {
        errors.push("cmx.clients_path cannot be empty".to_string());
    }
    if config.cmx.aps_path.is_empty() {
        errors.push("cmx.aps_path cannot be empty".to_string());
    }

    if config.schedule.days < 1 {
        errors.push("schedule.days must be at least 1".to_string());
    }
    if let Err(e) = Schedule::parse(config.schedule.days, &config.schedule.times) {
        errors.push(format!("schedule.times: {}", e));
    }

    if config.privacy.salt.is_empty() {
        errors.push("privacy.salt cannot be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationList(errors))
    }
}
