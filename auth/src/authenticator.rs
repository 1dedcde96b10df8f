use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::config::AuthSettings;
use crate::config::ConfigurationError;
use crate::credentials::Credential;
use crate::credentials::CredentialStore;
use crate::credentials::CredentialVerifier;
use crate::errors::AuthError;
use crate::password::PasswordError;
use crate::scopes::ScopeSet;
use crate::token::TokenClaims;
use crate::token::TokenService;

/// Authentication coordinator combining credential verification and tokens.
///
/// Built once at startup and shared behind an `Arc`. Holds no mutable state.
/// There is no logout: tokens cannot be invalidated before they expire.
pub struct Authenticator<S: CredentialStore> {
    store: Arc<S>,
    credential_verifier: CredentialVerifier,
    token_service: TokenService,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

/// User resolved from a bearer token, together with the token's claims.
#[derive(Debug, Clone)]
pub struct CurrentUser<U> {
    pub user: U,
    pub claims: TokenClaims,
}

impl<S: CredentialStore> Authenticator<S> {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `settings` - Signing secret, algorithm and token lifetime
    /// * `store` - User lookup collaborator
    ///
    /// # Errors
    /// * `ConfigurationError` - Settings are unusable; the process should not start
    pub fn new(settings: &AuthSettings, store: Arc<S>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            store,
            credential_verifier: CredentialVerifier::new(),
            token_service: TokenService::new(settings)?,
        })
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.credential_verifier.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        self.credential_verifier.verify(password, hash)
    }

    /// Verify credentials and issue an access token carrying `scopes`.
    ///
    /// # Arguments
    /// * `username` - Login name
    /// * `password` - Plaintext password
    /// * `scopes` - Scopes requested by the client, granted as requested
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `Password` - Stored hash is malformed
    /// * `ExpirationOutOfRange` - Token expiry overflows the date range
    /// * `Jwt` - Token generation failed
    /// * `Store` - User lookup failed
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        scopes: ScopeSet,
    ) -> Result<AccessToken, AuthError> {
        let user = self
            .credential_verifier
            .authenticate(self.store.as_ref(), username, password)
            .await?;

        let now = Utc::now();
        let claims = self
            .token_service
            .claims_at(user.username(), &scopes, None, now)?;
        let access_token = self.token_service.sign(&claims, now)?;

        tracing::info!(
            subject = %claims.subject,
            scopes = %claims.scopes,
            expires_at = %claims.expiration,
            "Access token issued"
        );

        Ok(AccessToken {
            access_token,
            token_type: "bearer".to_string(),
            expires_at: claims.expiration,
        })
    }

    /// Resolve the user behind a bearer token and check required scopes.
    ///
    /// # Errors
    /// * `InvalidToken` - Token does not verify or its subject is gone
    /// * `Forbidden` - Token lacks one of `required_scopes`
    /// * `Store` - User lookup failed
    pub async fn current_user(
        &self,
        token: &str,
        required_scopes: &[&str],
    ) -> Result<CurrentUser<S::User>, AuthError> {
        let (claims, user) = self
            .token_service
            .resolve(self.store.as_ref(), token, Utc::now())
            .await?;

        self.token_service
            .enforce_scopes(&claims, required_scopes)
            .map_err(|e| {
                tracing::warn!(subject = %claims.subject, error = %e, "Insufficient scope");
                e
            })?;

        Ok(CurrentUser { user, claims })
    }
}
