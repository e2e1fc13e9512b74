// Configuration loading and parsing (config/scout.toml, config/credentials.toml).
//
// Both files are optional: every setting has a built-in default, so the tool
// runs with no configuration at all. The live-feed API key can also come from
// the SHIPP_API_KEY environment variable, which wins over the credentials
// file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable consulted for the live-feed credential.
pub const LIVE_API_KEY_ENV: &str = "SHIPP_API_KEY";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub live: LiveConfig,
    #[serde(skip)]
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "ProviderEndpoint::nba_default")]
    pub nba: ProviderEndpoint,
    #[serde(default = "ProviderEndpoint::mlb_default")]
    pub mlb: ProviderEndpoint,
}

/// One stat provider's endpoint and self-throttling interval.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEndpoint {
    pub base_url: String,
    /// Minimum milliseconds between requests to this provider.
    pub min_interval_ms: u64,
}

impl ProviderEndpoint {
    /// balldontlie allows 30 requests/minute; 2.1 s spacing stays under it.
    fn nba_default() -> Self {
        ProviderEndpoint {
            base_url: "https://api.balldontlie.io/v1".to_string(),
            min_interval_ms: 2100,
        }
    }

    /// The MLB Stats API has no strict limit; 0.5 s spacing is polite.
    fn mlb_default() -> Self {
        ProviderEndpoint {
            base_url: "https://statsapi.mlb.com/api/v1".to_string(),
            min_interval_ms: 500,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            nba: ProviderEndpoint::nba_default(),
            mlb: ProviderEndpoint::mlb_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveConfig {
    pub base_url: String,
}

impl Default for LiveConfig {
    fn default() -> Self {
        LiveConfig {
            base_url: "https://api.shipp.ai/api/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub live_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `config/scout.toml` and `config/credentials.toml`
/// under `base_dir`, falling back to built-in defaults for anything missing.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- scout.toml (optional) ---
    let scout_path = config_dir.join("scout.toml");
    let mut config = if scout_path.exists() {
        let text = read_file(&scout_path)?;
        toml::from_str::<Config>(&text).map_err(|e| ConfigError::ParseError {
            path: scout_path.clone(),
            source: e,
        })?
    } else {
        Config::default()
    };

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    if credentials_path.exists() {
        let text = read_file(&credentials_path)?;
        config.credentials = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?;
    }

    // Environment wins over the credentials file.
    config.credentials.live_api_key = resolve_live_api_key(
        config.credentials.live_api_key,
        std::env::var(LIVE_API_KEY_ENV).ok(),
    );

    validate(&config)?;
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: PathBuf::from("."),
        source: e,
    })?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Pick the effective live-feed key: a non-empty environment value overrides
/// the file; empty strings count as unset.
fn resolve_live_api_key(from_file: Option<String>, from_env: Option<String>) -> Option<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or(from_file.filter(|k| !k.trim().is_empty()))
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    for (field, url) in [
        ("providers.nba.base_url", &config.providers.nba.base_url),
        ("providers.mlb.base_url", &config.providers.mlb.base_url),
        ("live.base_url", &config.live.base_url),
    ] {
        if url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_everything() {
        let config = Config::default();
        assert_eq!(config.providers.nba.min_interval_ms, 2100);
        assert_eq!(config.providers.mlb.min_interval_ms, 500);
        assert!(config.providers.nba.base_url.contains("balldontlie"));
        assert!(config.live.base_url.contains("shipp"));
        assert!(config.credentials.live_api_key.is_none());
    }

    #[test]
    fn partial_toml_overrides_only_named_sections() {
        let text = r#"
            [providers.mlb]
            base_url = "http://localhost:9090/api/v1"
            min_interval_ms = 0
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.providers.mlb.base_url, "http://localhost:9090/api/v1");
        assert_eq!(config.providers.mlb.min_interval_ms, 0);
        // Untouched sections keep their defaults.
        assert_eq!(config.providers.nba.min_interval_ms, 2100);
        assert!(config.live.base_url.contains("shipp"));
    }

    #[test]
    fn env_key_wins_over_file_key() {
        let effective =
            resolve_live_api_key(Some("file-key".to_string()), Some("env-key".to_string()));
        assert_eq!(effective.as_deref(), Some("env-key"));
    }

    #[test]
    fn blank_env_key_falls_back_to_file() {
        let effective = resolve_live_api_key(Some("file-key".to_string()), Some("  ".to_string()));
        assert_eq!(effective.as_deref(), Some("file-key"));

        let effective = resolve_live_api_key(None, None);
        assert!(effective.is_none());
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let mut config = Config::default();
        config.providers.nba.base_url = String::new();
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}
