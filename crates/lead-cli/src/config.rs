//! Translator settings file and API key lookup.
//!
//! Settings live in a TOML file whose keys mirror [`TranslatorConfig`]; all
//! keys are optional:
//!
//! ```toml
//! endpoint = "https://api.deepseek.com/v1/chat/completions"
//! model = "deepseek-chat"
//! temperature = 0.3
//! timeout_secs = 30
//! api_key_env = "LEAD_INSIGHT_API_KEY"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use lead_query::TranslatorConfig;
use tracing::{debug, info};

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "LEAD_INSIGHT_CONFIG";

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lead-insight.toml";

/// Picks the settings file: `--config`, then `$LEAD_INSIGHT_CONFIG`, then
/// `./lead-insight.toml` if it exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.is_file().then_some(default)
}

/// Loads translator settings, falling back to defaults when no file is found.
///
/// A named file that is missing or unparseable is an error.
pub fn load_translator_config(explicit: Option<&Path>) -> Result<TranslatorConfig> {
    let Some(path) = resolve_config_path(explicit) else {
        debug!("no settings file found, using defaults");
        return Ok(TranslatorConfig::default());
    };
    let content = fs::read_to_string(&path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    let config = parse_translator_config(&content)
        .with_context(|| format!("parse settings file {}", path.display()))?;
    info!(path = %path.display(), model = %config.model, "loaded translator settings");
    Ok(config)
}

pub fn parse_translator_config(content: &str) -> Result<TranslatorConfig> {
    let config: TranslatorConfig = toml::from_str(content)?;
    if !(0.0..=2.0).contains(&config.temperature) {
        bail!("temperature must be between 0 and 2, got {}", config.temperature);
    }
    if config.timeout_secs == 0 {
        bail!("timeout_secs must be at least 1");
    }
    Ok(config)
}

/// Reads the API key from the environment variable the settings name.
pub fn api_key(config: &TranslatorConfig) -> Result<String> {
    match std::env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => bail!(
            "missing API key: set the {} environment variable",
            config.api_key_env
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_translator_config("").unwrap();
        assert_eq!(config, TranslatorConfig::default());
    }

    #[test]
    fn test_partial_file_overrides() {
        let config = parse_translator_config(
            "model = \"gpt-4o-mini\"\ntimeout_secs = 10\napi_key_env = \"OPENAI_API_KEY\"\n",
        )
        .unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.endpoint, TranslatorConfig::default().endpoint);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(parse_translator_config("temperature = 5.0").is_err());
        assert!(parse_translator_config("timeout_secs = 0").is_err());
        assert!(parse_translator_config("model = 3").is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("custom.toml");
        assert_eq!(resolve_config_path(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_translator_config(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let config = TranslatorConfig {
            api_key_env: "LEAD_INSIGHT_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..TranslatorConfig::default()
        };
        let err = api_key(&config).unwrap_err();
        assert!(err.to_string().contains("LEAD_INSIGHT_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
