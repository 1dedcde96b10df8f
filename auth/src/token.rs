use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::config::AuthSettings;
use crate::config::ConfigurationError;
use crate::credentials::CredentialStore;
use crate::errors::AuthError;
use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::scopes::ScopeSet;

/// Decoded, verified content of an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Username the token was issued to
    pub subject: String,
    /// Instant after which the token is no longer valid (second precision)
    pub expiration: DateTime<Utc>,
    pub scopes: ScopeSet,
}

impl TokenClaims {
    /// A token is valid while `now <= expiration`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiration
    }

    fn to_wire(&self, issued_at: DateTime<Utc>) -> Claims {
        Claims::new(self.expiration.timestamp())
            .with_subject(&self.subject)
            .with_issued_at(issued_at.timestamp())
            .with_scopes(self.scopes.iter())
    }
}

/// Issues and verifies signed, time-limited bearer tokens.
///
/// Stateless: validity depends only on the signing secret and the clock.
/// There is no revocation; a token stays valid until its expiration passes.
pub struct TokenService {
    jwt_handler: JwtHandler,
    default_ttl: Duration,
}

impl TokenService {
    /// Build the token service from startup settings.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    /// * `UnsupportedAlgorithm` - Algorithm is not an HMAC algorithm
    /// * `InvalidExpiry` - Expiry is not positive
    pub fn new(settings: &AuthSettings) -> Result<Self, ConfigurationError> {
        let secret = settings.secret_bytes()?;
        let algorithm = settings.signing_algorithm()?;
        let default_ttl = settings.access_token_ttl()?;

        Ok(Self {
            jwt_handler: JwtHandler::with_algorithm(secret, algorithm),
            default_ttl,
        })
    }

    /// Lifetime applied when `issue` is called without an explicit TTL.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Build the claims a token issued at `now` would carry.
    ///
    /// # Errors
    /// * `ExpirationOutOfRange` - `now + ttl` overflows the supported date range
    pub fn claims_at(
        &self,
        subject: &str,
        scopes: &ScopeSet,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, AuthError> {
        let expires_at = now
            .checked_add_signed(ttl.unwrap_or(self.default_ttl))
            .ok_or(AuthError::ExpirationOutOfRange)?;
        // JWT NumericDate has whole seconds.
        let expiration =
            DateTime::from_timestamp(expires_at.timestamp(), 0).unwrap_or(expires_at);

        Ok(TokenClaims {
            subject: subject.to_string(),
            expiration,
            scopes: scopes.clone(),
        })
    }

    /// Issue a token for `subject`, valid for `ttl` (or the default TTL).
    ///
    /// # Errors
    /// * `ExpirationOutOfRange` - `ttl` is too large
    /// * `Jwt` - Signing failed
    pub fn issue(
        &self,
        subject: &str,
        scopes: &ScopeSet,
        ttl: Option<Duration>,
    ) -> Result<String, AuthError> {
        self.issue_at(subject, scopes, ttl, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// Deterministic: identical arguments and secret give identical tokens.
    pub fn issue_at(
        &self,
        subject: &str,
        scopes: &ScopeSet,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = self.claims_at(subject, scopes, ttl, now)?;
        self.sign(&claims, now)
    }

    pub(crate) fn sign(&self, claims: &TokenClaims, now: DateTime<Utc>) -> Result<String, AuthError> {
        Ok(self.jwt_handler.encode(&claims.to_wire(now))?)
    }

    /// Verify a token's signature and expiry and decode its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, wrong algorithm, unparsable payload,
    ///   missing subject or expiration, or expired
    pub fn verify_and_decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.verify_and_decode_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    pub fn verify_and_decode_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, AuthError> {
        let claims: Claims = self.jwt_handler.decode(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        let subject = claims.subject().ok_or_else(|| {
            tracing::debug!("Token rejected: missing subject");
            AuthError::InvalidToken
        })?;

        let expiration = DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| {
            tracing::debug!(exp = claims.exp, "Token rejected: expiration out of range");
            AuthError::InvalidToken
        })?;

        let token_claims = TokenClaims {
            subject: subject.to_string(),
            expiration,
            scopes: claims.scopes.iter().cloned().collect(),
        };

        if token_claims.is_expired_at(now) {
            tracing::debug!(subject = %token_claims.subject, "Token rejected: expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(token_claims)
    }

    /// Resolve the user a token was issued to.
    ///
    /// A subject that no longer exists is reported as `InvalidToken`, so callers
    /// cannot tell a deleted user from a bad token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token does not verify, or its subject is unknown
    /// * `Store` - Lookup failed
    pub async fn resolve_current_user<S: CredentialStore>(
        &self,
        store: &S,
        token: &str,
    ) -> Result<S::User, AuthError> {
        let (_, user) = self.resolve(store, token, Utc::now()).await?;
        Ok(user)
    }

    pub(crate) async fn resolve<S: CredentialStore>(
        &self,
        store: &S,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<(TokenClaims, S::User), AuthError> {
        let claims = self.verify_and_decode_at(token, now)?;

        let user = store.lookup_user(&claims.subject).await?.ok_or_else(|| {
            tracing::debug!(subject = %claims.subject, "Token rejected: subject no longer exists");
            AuthError::InvalidToken
        })?;

        Ok((claims, user))
    }

    /// Check that the token grants every required scope.
    ///
    /// # Errors
    /// * `Forbidden` - At least one required scope is missing
    pub fn enforce_scopes<I, S>(&self, claims: &TokenClaims, required: I) -> Result<(), AuthError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        enforce_scopes(claims, required)
    }
}

/// Succeeds iff `required` is a subset of the granted scopes.
///
/// # Errors
/// * `Forbidden` - Lists the missing scopes
pub fn enforce_scopes<I, S>(claims: &TokenClaims, required: I) -> Result<(), AuthError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let missing = claims.scopes.missing(required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Forbidden { missing })
    }
}
