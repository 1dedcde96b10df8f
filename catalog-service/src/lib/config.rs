use std::env;

use auth::AuthSettings;
use auth::ConfigurationError;
use auth::TokenService;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// * `ConfigError` - A source failed to parse or a required key is missing
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // AUTH__SECRET=... overrides auth.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Check the settings that need no database or network.
    ///
    /// # Errors
    /// * `ConfigurationError` - Auth secret, algorithm or token expiry is unusable
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        TokenService::new(&self.auth).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(auth: AuthSettings) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://unreachable:5432/catalog".to_string(),
            },
            server: ServerConfig { http_port: 8000 },
            auth,
        }
    }

    #[test]
    fn test_validate_accepts_sane_auth() {
        let config = config(AuthSettings::new("secret", "HS256", 30));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_auth() {
        assert_eq!(
            config(AuthSettings::new("", "HS256", 30)).validate(),
            Err(ConfigurationError::MissingSecret)
        );
        assert_eq!(
            config(AuthSettings::new("secret", "none", 30)).validate(),
            Err(ConfigurationError::UnsupportedAlgorithm("none".to_string()))
        );
        assert_eq!(
            config(AuthSettings::new("secret", "HS256", i64::MAX)).validate(),
            Err(ConfigurationError::InvalidExpiry(i64::MAX))
        );
    }
}
