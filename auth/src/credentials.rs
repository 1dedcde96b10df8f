use async_trait::async_trait;

use crate::errors::AuthError;
use crate::errors::CredentialStoreError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// A stored user record the auth core can check a password against.
pub trait Credential {
    fn username(&self) -> &str;

    /// Password hash in PHC string format
    fn password_hash(&self) -> &str;
}

/// User lookup collaborator.
///
/// Implemented by the service owning the user records. The auth core only ever
/// reads through this port and places no locking or ordering requirements on it.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    type User: Credential + Send + Sync;

    /// Exact-match lookup by username.
    ///
    /// # Returns
    /// The user record, or `None` when no user has this username
    ///
    /// # Errors
    /// * `CredentialStoreError` - Backing store failed
    async fn lookup_user(&self, username: &str)
        -> Result<Option<Self::User>, CredentialStoreError>;
}

/// Checks plaintext passwords against stored hashes.
pub struct CredentialVerifier {
    password_hasher: PasswordHasher,
}

impl CredentialVerifier {
    pub fn new() -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Hash a password for storage.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Returns
    /// `true` on match, `false` on mismatch
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed or uses another scheme
    pub fn verify(&self, plain_password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(plain_password, stored_hash)
    }

    /// Authenticate a username/password pair against the store.
    ///
    /// Unknown usernames and wrong passwords both yield `InvalidCredentials`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such user, or password mismatch
    /// * `Password` - Stored hash is malformed
    /// * `Store` - Lookup failed
    pub async fn authenticate<S: CredentialStore>(
        &self,
        store: &S,
        username: &str,
        password: &str,
    ) -> Result<S::User, AuthError> {
        let Some(user) = store.lookup_user(username).await? else {
            // Spend one Argon2 evaluation so unknown usernames cost the same as wrong passwords.
            let _ = self.password_hasher.hash(password);
            tracing::debug!("Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        let is_valid = self
            .verify(password, user.password_hash())
            .map_err(|e| {
                tracing::error!(error = %e, "Stored password hash could not be verified");
                e
            })?;

        if !is_valid {
            tracing::debug!("Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

impl Default for CredentialVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct TestUser {
        pub username: String,
        pub password_hash: String,
    }

    impl Credential for TestUser {
        fn username(&self) -> &str {
            &self.username
        }

        fn password_hash(&self) -> &str {
            &self.password_hash
        }
    }

    /// In-memory store keyed by username.
    #[derive(Default)]
    pub struct InMemoryStore {
        pub users: HashMap<String, TestUser>,
        pub fail: bool,
    }

    impl InMemoryStore {
        pub fn with_user(username: &str, password: &str) -> Self {
            let mut store = Self::default();
            store.add_user(username, password);
            store
        }

        pub fn add_user(&mut self, username: &str, password: &str) {
            let password_hash = PasswordHasher::new()
                .hash(password)
                .expect("Failed to hash password");
            self.users.insert(
                username.to_string(),
                TestUser {
                    username: username.to_string(),
                    password_hash,
                },
            );
        }
    }

    #[async_trait]
    impl CredentialStore for InMemoryStore {
        type User = TestUser;

        async fn lookup_user(
            &self,
            username: &str,
        ) -> Result<Option<TestUser>, CredentialStoreError> {
            if self.fail {
                return Err(CredentialStoreError("connection refused".to_string()));
            }
            Ok(self.users.get(username).cloned())
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let store = InMemoryStore::with_user("alice", "wonderland");
        let verifier = CredentialVerifier::new();

        let user = verifier
            .authenticate(&store, "alice", "wonderland")
            .await
            .expect("Authentication failed");

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let store = InMemoryStore::with_user("alice", "wonderland");
        let verifier = CredentialVerifier::new();

        let result = verifier.authenticate(&store, "alice", "looking-glass").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_username_looks_like_wrong_password() {
        let store = InMemoryStore::with_user("alice", "wonderland");
        let verifier = CredentialVerifier::new();

        let unknown = verifier
            .authenticate(&store, "mallory", "wonderland")
            .await
            .expect_err("Unknown user must be rejected");
        let wrong = verifier
            .authenticate(&store, "alice", "nope")
            .await
            .expect_err("Wrong password must be rejected");

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(!unknown.to_string().contains("mallory"));
    }

    #[tokio::test]
    async fn test_username_lookup_is_exact() {
        let store = InMemoryStore::with_user("alice", "wonderland");
        let verifier = CredentialVerifier::new();

        let result = verifier.authenticate(&store, "Alice", "wonderland").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_malformed_stored_hash_is_internal_error() {
        let mut store = InMemoryStore::default();
        store.users.insert(
            "alice".to_string(),
            TestUser {
                username: "alice".to_string(),
                password_hash: "plaintext-oops".to_string(),
            },
        );
        let verifier = CredentialVerifier::new();

        let result = verifier.authenticate(&store, "alice", "wonderland").await;
        assert!(matches!(result, Err(AuthError::Password(_))));
    }

    #[tokio::test]
    async fn test_store_failure_is_propagated() {
        let store = InMemoryStore {
            fail: true,
            ..Default::default()
        };
        let verifier = CredentialVerifier::new();

        let result = verifier.authenticate(&store, "alice", "wonderland").await;
        assert!(matches!(result, Err(AuthError::Store(_))));
    }

    #[test]
    fn test_verify_returns_false_on_mismatch() {
        let verifier = CredentialVerifier::new();
        let hash = verifier.hash("wonderland").expect("Failed to hash password");

        assert!(verifier.verify("wonderland", &hash).expect("Failed to verify"));
        assert!(!verifier.verify("Wonderland", &hash).expect("Failed to verify"));
    }
}
