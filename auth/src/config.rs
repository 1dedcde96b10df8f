use std::fmt;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use serde::Deserialize;
use thiserror::Error;

/// Token signing settings.
///
/// Deserialized once at startup (usually as the `auth` section of the service
/// configuration) and handed to [`crate::TokenService::new`]. Every field is
/// mandatory: a missing key fails deserialization, an unusable value fails
/// construction with [`ConfigurationError`].
#[derive(Clone, Deserialize)]
pub struct AuthSettings {
    /// Symmetric secret used to sign and verify tokens
    pub secret: String,

    /// Signing algorithm name (`HS256`, `HS384` or `HS512`)
    pub algorithm: String,

    /// Lifetime of access tokens issued at login, in minutes
    pub access_token_expire_minutes: i64,
}

/// Fatal configuration errors, raised once while building the auth core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Signing secret is not set")]
    MissingSecret,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Access token expiry must be between 1 minute and one year, got {0} minutes")]
    InvalidExpiry(i64),
}

impl AuthSettings {
    /// Build settings from raw values.
    pub fn new(
        secret: impl Into<String>,
        algorithm: impl Into<String>,
        access_token_expire_minutes: i64,
    ) -> Self {
        Self {
            secret: secret.into(),
            algorithm: algorithm.into(),
            access_token_expire_minutes,
        }
    }

    /// Signing secret as bytes.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty or whitespace
    pub fn secret_bytes(&self) -> Result<&[u8], ConfigurationError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }
        Ok(self.secret.as_bytes())
    }

    /// Parse the configured algorithm name.
    ///
    /// Only HMAC algorithms are accepted since the secret is symmetric.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Unknown or asymmetric algorithm
    pub fn signing_algorithm(&self) -> Result<Algorithm, ConfigurationError> {
        match self.algorithm.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(ConfigurationError::UnsupportedAlgorithm(
                self.algorithm.clone(),
            )),
        }
    }

    /// Upper bound for `access_token_expire_minutes`: one year.
    pub const MAX_EXPIRE_MINUTES: i64 = 366 * 24 * 60;

    /// Default lifetime of issued tokens.
    ///
    /// # Errors
    /// * `InvalidExpiry` - Configured minutes are not in `1..=MAX_EXPIRE_MINUTES`
    pub fn access_token_ttl(&self) -> Result<Duration, ConfigurationError> {
        let minutes = self.access_token_expire_minutes;
        if !(1..=Self::MAX_EXPIRE_MINUTES).contains(&minutes) {
            return Err(ConfigurationError::InvalidExpiry(minutes));
        }
        Duration::try_minutes(minutes).ok_or(ConfigurationError::InvalidExpiry(minutes))
    }
}

// Keeps the secret out of startup logs.
impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_settings() {
        let settings = AuthSettings::new("a_secret_key_at_least_32_bytes_long!", "hs384", 30);

        assert!(settings.secret_bytes().is_ok());
        assert_eq!(settings.signing_algorithm(), Ok(Algorithm::HS384));
        assert_eq!(settings.access_token_ttl(), Ok(Duration::minutes(30)));
    }

    #[test]
    fn test_missing_secret() {
        let settings = AuthSettings::new("   ", "HS256", 30);
        assert_eq!(
            settings.secret_bytes(),
            Err(ConfigurationError::MissingSecret)
        );
    }

    #[test]
    fn test_asymmetric_algorithm_rejected() {
        let settings = AuthSettings::new("secret", "RS256", 30);
        assert_eq!(
            settings.signing_algorithm(),
            Err(ConfigurationError::UnsupportedAlgorithm("RS256".to_string()))
        );
    }

    #[test]
    fn test_non_positive_expiry_rejected() {
        let settings = AuthSettings::new("secret", "HS256", 0);
        assert_eq!(
            settings.access_token_ttl(),
            Err(ConfigurationError::InvalidExpiry(0))
        );
    }

    #[test]
    fn test_oversized_expiry_rejected() {
        for minutes in [AuthSettings::MAX_EXPIRE_MINUTES + 1, 200_000_000_000, i64::MAX] {
            let settings = AuthSettings::new("secret", "HS256", minutes);
            assert_eq!(
                settings.access_token_ttl(),
                Err(ConfigurationError::InvalidExpiry(minutes))
            );
        }

        let settings = AuthSettings::new("secret", "HS256", AuthSettings::MAX_EXPIRE_MINUTES);
        assert!(settings.access_token_ttl().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let settings = AuthSettings::new("super-secret-value", "HS256", 30);
        let rendered = format!("{:?}", settings);

        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("HS256"));
    }
}
