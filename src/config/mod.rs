pub mod init;
mod schema;

pub use init::{write_default_config, DEFAULT_CONFIG_TEMPLATE};
pub use schema::{Config, CounterConfig, CountersConfig, ThemeMode, DEFAULT_TICK_RATE_MS};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/business-mri/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("business-mri")
}

/// Get the default config file path (~/.config/business-mri/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory at {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate everything in the config that serde cannot.
/// Returns all validation errors at once.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Err(scoring_errors) =
        crate::scoring::validate_scoring(&config.scoring(), &config.benchmark_table())
    {
        errors.extend(scoring_errors);
    }

    if let Err(e) = config.exit_intent_delay() {
        errors.push(format!("exit_intent_delay: {}", e));
    }

    if let Err(e) = config.hero_counters() {
        errors.push(format!("counters: {}", e));
    }

    if config.tick_rate_ms == Some(0) {
        errors.push("tick_rate_ms: must be greater than 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let path = env::temp_dir().join("business_mri_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let path = env::temp_dir().join("business_mri_test_load_config.yaml");
        fs::write(&path, "theme: dark\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.theme(), ThemeMode::Dark);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = env::temp_dir().join("business_mri_test_invalid_config.yaml");
        fs::write(&path, "theme: [unclosed\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_collects_errors() {
        let config = Config {
            exit_intent_delay: Some("later".to_string()),
            tick_rate_ms: Some(0),
            counters: Some(CountersConfig {
                execution: Some(CounterConfig {
                    end: 87,
                    duration: "fast".to_string(),
                }),
                industry: None,
                roi: None,
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("exit_intent_delay"));
    }
}
