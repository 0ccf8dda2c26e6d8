// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local store location (`sqlite:` URL or path)
    pub database_url: String,
    /// Server port
    pub port: u16,
    /// Origin of the UI shell, allowed by CORS
    pub frontend_url: String,
    /// GCP project ID; the remote store runs offline without one
    pub gcp_project_id: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 8080,
            frontend_url: "http://localhost:8081".to_string(),
            gcp_project_id: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from `lookup`, which returns a variable's value.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            None => 8080,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:dekast.db".to_string()),
            port,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:8081".to_string()),
            gcp_project_id: lookup("GCP_PROJECT_ID")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("Config should load");
        assert_eq!(config.database_url, "sqlite:dekast.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.frontend_url, "http://localhost:8081");
        assert_eq!(config.gcp_project_id, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[("PORT", "9090"), ("GCP_PROJECT_ID", " dekast ")])
            .expect("Config should load");
        assert_eq!(config.port, 9090);
        assert_eq!(config.gcp_project_id.as_deref(), Some("dekast"));
    }

    #[test]
    fn test_blank_project_is_offline() {
        let config = config_from(&[("GCP_PROJECT_ID", "  ")]).expect("Config should load");
        assert_eq!(config.gcp_project_id, None);
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(
            config_from(&[("PORT", "not-a-port")]),
            Err(ConfigError::Invalid("PORT", _))
        ));
    }
}
