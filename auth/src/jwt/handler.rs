use std::collections::HashSet;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for signing and verifying compact tokens.
///
/// Generic over the claims type. The signing algorithm is fixed at
/// construction; tokens whose header names another algorithm are rejected.
///
/// Expiry is not checked here: callers compare `exp` against their own notion
/// of "now" so that validity can be evaluated at an explicit instant.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key and HS256.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    pub fn new(secret: &[u8]) -> Self {
        Self::with_algorithm(secret, Algorithm::HS256)
    }

    /// Create a new JWT handler with a secret key and an HMAC algorithm.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `algorithm` - HS256, HS384 or HS512
    ///
    /// # Security Notes
    /// - The secret should be at least as long as the digest (32 bytes for HS256)
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        }
    }

    /// Algorithm used for signing and expected on verification.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify the signature of a JWT and decode its claims.
    ///
    /// The `exp` claim must be present; its value is left to the caller.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the configured secret
    /// * `AlgorithmMismatch` - Header names a different algorithm
    /// * `MissingClaim` - `exp` is absent
    /// * `DecodingFailed` - Token is malformed or claims cannot be parsed
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => JwtError::AlgorithmMismatch,
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
