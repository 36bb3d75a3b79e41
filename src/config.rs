//! Runtime configuration: an optional JSON file plus environment overrides.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DietError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "diet_buddy.json";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_CACHE_DIR: &str = "cache";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "DIET_BUDDY_MODEL";
pub const BASE_URL_ENV: &str = "DIET_BUDDY_BASE_URL";

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Request timeout. `None` leaves the HTTP client default in place.
    pub timeout_secs: Option<u64>,
    pub cache_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `diet_buddy.json` in the
    /// working directory is read if present. Environment variables win over
    /// file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DietError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Override fields from environment-style lookups. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(model) = get(MODEL_ENV) {
            self.model = model;
        }
        if let Some(url) = get(BASE_URL_ENV) {
            self.base_url = url;
        }
    }

    /// The API key, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        require_api_key(self.api_key.as_deref())
    }

    /// Create the configured cache directory. Called once at startup.
    pub fn ensure_cache_dir(&self) -> Result<PathBuf> {
        crate::state::ensure_cache_dir(&self.cache_dir)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Full `generateContent` URL without the key.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// A blank or missing key is a configuration error naming the variable to set.
pub fn require_api_key(key: Option<&str>) -> Result<&str> {
    key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
        DietError::Config(format!("no API key configured (set {})", API_KEY_ENV))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.endpoint_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert!(config.require_api_key().is_err());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_blank_key_names_the_variable() {
        let err = require_api_key(Some("  ")).unwrap_err().to_string();
        assert!(err.contains(API_KEY_ENV), "{}", err);
        assert_eq!(require_api_key(Some("k")).unwrap(), "k");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"model": "gemini-1.5-flash", "timeout_secs": 30}"#)
            .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (API_KEY_ENV, "secret"),
            (MODEL_ENV, ""),
            (BASE_URL_ENV, "http://localhost:9000/"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.require_api_key().unwrap(), "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(
            config.endpoint_url(),
            "http://localhost:9000/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AppConfig {
            api_key: Some("secret".to_string()),
            ..AppConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_cache_dir_from_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("nested").join("cache");
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::json!({ "cache_dir": cache })).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        let created = config.ensure_cache_dir().unwrap();
        assert_eq!(created, cache);
        assert!(cache.is_dir());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/diet_buddy.json"))).is_err());
    }
}
