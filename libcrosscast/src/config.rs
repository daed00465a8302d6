//! Configuration management for Crosscast

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the publishing backend, e.g. "https://api.example.com/api/v1/".
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// File holding the backend session token. `CROSSCAST_TOKEN` overrides it.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Platforms targeted when the caller does not name any.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,
    /// Pause between posts in a batch, to stay clear of platform rate limits.
    #[serde(default = "default_inter_post_delay_ms")]
    pub inter_post_delay_ms: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
            inter_post_delay_ms: default_inter_post_delay_ms(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_token_file() -> String {
    "~/.config/crosscast/session.token".to_string()
}

fn default_platforms() -> Vec<String> {
    vec![
        "facebook".to_string(),
        "linkedin".to_string(),
        "youtube".to_string(),
        "tiktok".to_string(),
    ]
}

fn default_inter_post_delay_ms() -> u64 {
    1000
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://api.crosscast.dev/api/v1/".to_string(),
                timeout_secs: default_timeout_secs(),
            },
            auth: AuthConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CROSSCAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("crosscast").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_minimal_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://backend.test/api/v1/\"").unwrap();

        let config = Config::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.api.base_url, "https://backend.test/api/v1/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.auth.token_file, "~/.config/crosscast/session.token");
        assert_eq!(config.defaults.inter_post_delay_ms, 1000);
        assert!(config.defaults.platforms.contains(&"facebook".to_string()));
    }

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://backend.test/api/v1/"
timeout_secs = 5

[auth]
token_file = "/tmp/session.token"

[defaults]
platforms = ["linkedin"]
inter_post_delay_ms = 0
"#
        )
        .unwrap();

        let config = Config::load_from_path(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.auth.token_file, "/tmp/session.token");
        assert_eq!(config.defaults.platforms, vec!["linkedin"]);
        assert_eq!(config.defaults.inter_post_delay_ms, 0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load_from_path(&PathBuf::from("/nonexistent/crosscast.toml"));
        assert!(matches!(
            result,
            Err(crate::error::CrosscastError::Config(ConfigError::ReadError(_)))
        ));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = broken").unwrap();

        let result = Config::load_from_path(&file.path().to_path_buf());
        assert!(matches!(
            result,
            Err(crate::error::CrosscastError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_default_config_is_complete() {
        let config = Config::default_config();
        assert!(config.api.base_url.starts_with("https://"));
        assert!(!config.defaults.platforms.is_empty());
    }
}
