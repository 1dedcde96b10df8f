use thiserror::Error;

use crate::jwt::JwtError;
use crate::password::PasswordError;

/// Failure reported by a [`crate::CredentialStore`] implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Credential store error: {0}")]
pub struct CredentialStoreError(pub String);

/// Authentication and authorization errors.
///
/// `InvalidCredentials`, `InvalidToken` and `Forbidden` reject the current
/// request only. The remaining variants are internal failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password, deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Malformed, badly signed or expired token, or a subject that no longer exists
    #[error("Could not validate credentials")]
    InvalidToken,

    /// Valid token lacking required scopes
    #[error("Not enough permissions, missing scopes: {}", .missing.join(" "))]
    Forbidden { missing: Vec<String> },

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Requested lifetime puts the expiration outside the representable range
    #[error("Token expiration out of range")]
    ExpirationOutOfRange,

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error(transparent)]
    Store(#[from] CredentialStoreError),
}
