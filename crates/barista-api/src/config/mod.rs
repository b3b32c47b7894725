//! Configuration module for the Barista API

mod environment;
mod server;

pub use environment::{AuthProviderSettings, Environment};
pub use server::ServerConfig;

use barista_common::config::ConfigLoader;
use barista_common::ConfigurationError as ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (e.g. "sqlite:barista.db")
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Drop and recreate the schema at startup
    pub reset_on_start: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:barista.db".to_string(),
            max_connections: 5,
            reset_on_start: false,
        }
    }
}

/// Main configuration structure for the Barista API
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Environment configuration record
    pub environment: Environment,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => <Config as ConfigLoader<Config>>::load_from_file(path),
            None => <Config as ConfigLoader<Config>>::load(None),
        }
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, ConfigError> {
        let config = Self::default();
        toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.environment.validate()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout)
    }
}

impl ConfigLoader<Config> for Config {
    fn load(path: Option<PathBuf>) -> Result<Config, ConfigError> {
        let figment = match path {
            Some(p) => Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(p))
                .merge(Env::prefixed("BARISTA_API_").split("__")),
            None => Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file("barista-api.toml"))
                .merge(Env::prefixed("BARISTA_API_").split("__")),
        };

        figment.extract().map_err(|e| ConfigError::ParseError {
            details: e.to_string(),
        })
    }

    fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("BARISTA_API_").split("__"));

        figment.extract().map_err(|e| ConfigError::ParseError {
            details: e.to_string(),
        })
    }

    fn apply_env_overrides(config: &mut Config, prefix: &str) -> Result<(), ConfigError> {
        let figment = Figment::from(Serialized::defaults(config.clone()))
            .merge(Env::prefixed(prefix).split("__"));

        *config = figment.extract().map_err(|e| ConfigError::ParseError {
            details: e.to_string(),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_address.port(), 5000);
        assert_eq!(config.database.max_connections, 5);
        assert!(!config.database.reset_on_start);
        assert!(!config.environment.production);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.server.bind_address, deserialized.server.bind_address);
        assert_eq!(config.environment, deserialized.environment);
    }

    #[test]
    fn test_duration_conversions() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_generate_example_parses_back() {
        let example = Config::generate_example().unwrap();
        let config: Config = toml::from_str(&example).unwrap();
        assert_eq!(
            config.environment.auth.client_id,
            "y6j3GsADmb2rOmBXaEN1ElwNbl35uayf"
        );
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "barista-api.toml",
                r#"
                    [server]
                    bind_address = "0.0.0.0:8080"
                    request_timeout = 10

                    [environment]
                    production = true
                "#,
            )?;

            let config = Config::load(None).expect("load should succeed");
            assert_eq!(config.server.bind_address.port(), 8080);
            assert_eq!(config.server.request_timeout, 10);
            assert!(config.environment.production);
            // Untouched sections keep their defaults
            assert_eq!(config.environment.auth.audience, "homepage");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "barista-api.toml",
                r#"
                    [server]
                    request_timeout = 10
                "#,
            )?;
            jail.set_env("BARISTA_API_SERVER__REQUEST_TIMEOUT", "45");
            jail.set_env("BARISTA_API_ENVIRONMENT__PRODUCTION", "true");

            let config = Config::load(None).expect("load should succeed");
            assert_eq!(config.server.request_timeout, 45);
            assert!(config.environment.production);
            Ok(())
        });
    }
}
