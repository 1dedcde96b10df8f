//! Authentication core for the catalog service
//!
//! Provides:
//! - Credential verification (Argon2id, constant-time comparison)
//! - Signed, time-limited bearer tokens with scopes (HMAC JWT)
//! - Scope checks for protected operations
//!
//! The core keeps no session state. Services plug their user records in
//! through [`CredentialStore`] and pass [`AuthSettings`] in at startup.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{AuthSettings, ScopeSet, TokenService};
//!
//! let settings = AuthSettings::new("secret_key_at_least_32_bytes_long!", "HS256", 30);
//! let tokens = TokenService::new(&settings).unwrap();
//!
//! let scopes = ScopeSet::from_space_delimited("me");
//! let token = tokens.issue("alice", &scopes, None).unwrap();
//! let claims = tokens.verify_and_decode(&token).unwrap();
//!
//! assert_eq!(claims.subject, "alice");
//! assert!(tokens.enforce_scopes(&claims, ["me"]).is_ok());
//! assert!(tokens.enforce_scopes(&claims, ["admin"]).is_err());
//! ```

pub mod authenticator;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod jwt;
pub mod password;
pub mod scopes;
pub mod token;

pub use authenticator::AccessToken;
pub use authenticator::Authenticator;
pub use authenticator::CurrentUser;
pub use config::AuthSettings;
pub use config::ConfigurationError;
pub use credentials::Credential;
pub use credentials::CredentialStore;
pub use credentials::CredentialVerifier;
pub use errors::AuthError;
pub use errors::CredentialStoreError;
pub use jwt::JwtError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use scopes::ScopeSet;
pub use token::enforce_scopes;
pub use token::TokenClaims;
pub use token::TokenService;
