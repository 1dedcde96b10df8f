use serde::Deserialize;
use serde::Serialize;

/// JWT payload carried by access tokens.
///
/// `sub` holds the username, `exp` and `iat` are Unix timestamps in seconds
/// and `scopes` lists the permissions granted at login. `sub` stays optional
/// here so a token without a subject decodes and can be rejected explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Granted scopes
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Claims {
    /// Create claims expiring at `exp`.
    pub fn new(exp: i64) -> Self {
        Self {
            sub: None,
            exp,
            iat: None,
            scopes: Vec::new(),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set granted scopes.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Subject, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let claims = Claims::new(1234567890)
            .with_subject("alice")
            .with_issued_at(1234567800)
            .with_scopes(["me", "items"]);

        assert_eq!(claims.sub, Some("alice".to_string()));
        assert_eq!(claims.exp, 1234567890);
        assert_eq!(claims.iat, Some(1234567800));
        assert_eq!(claims.scopes, vec!["me".to_string(), "items".to_string()]);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new(1000);

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_empty_subject_is_absent() {
        let claims = Claims::new(1000).with_subject("");
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_scopes_default_to_empty() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"alice","exp":1000}"#).expect("Failed to parse claims");

        assert_eq!(claims.subject(), Some("alice"));
        assert!(claims.scopes.is_empty());
        assert!(claims.iat.is_none());
    }

    #[test]
    fn test_wire_format_uses_exp_key() {
        let claims = Claims::new(1000).with_subject("alice").with_scopes(["me"]);
        let json = serde_json::to_value(&claims).expect("Failed to serialize claims");

        assert_eq!(json["sub"], "alice");
        assert_eq!(json["exp"], 1000);
        assert_eq!(json["scopes"], serde_json::json!(["me"]));
        assert!(json.get("expire_time").is_none());
    }
}
