use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Set of permission names carried by a token.
///
/// Ordered so that serialized tokens and challenge strings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    /// Create an empty scope set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an OAuth2 `scope` parameter (space-delimited).
    ///
    /// Blank input yields an empty set.
    pub fn from_space_delimited(raw: &str) -> Self {
        raw.split_whitespace().collect()
    }

    /// Add a scope, returning false if it was already present.
    pub fn insert(&mut self, scope: impl Into<String>) -> bool {
        self.0.insert(scope.into())
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.0.contains(scope)
    }

    /// True iff every required scope is granted.
    ///
    /// An empty requirement is always satisfied.
    pub fn contains_all<I, S>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        required
            .into_iter()
            .all(|scope| self.contains(scope.as_ref()))
    }

    /// Required scopes that are not granted, deduplicated and sorted.
    pub fn missing<I, S>(&self, required: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        required
            .into_iter()
            .filter(|scope| !self.contains(scope.as_ref()))
            .map(|scope| scope.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// Space-delimited, as used in `scope` parameters and `WWW-Authenticate` challenges.
impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(" ");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_delimited() {
        let scopes = ScopeSet::from_space_delimited("  me items  me ");

        assert_eq!(scopes.len(), 2);
        assert!(scopes.contains("me"));
        assert!(scopes.contains("items"));
    }

    #[test]
    fn test_parse_blank() {
        assert!(ScopeSet::from_space_delimited("").is_empty());
        assert!(ScopeSet::from_space_delimited("   ").is_empty());
    }

    #[test]
    fn test_contains_all() {
        let granted: ScopeSet = ["me", "items"].into_iter().collect();

        assert!(granted.contains_all(Vec::<String>::new()));
        assert!(granted.contains_all(["items", "me"]));
        assert!(granted.contains_all(["me", "me"]));
        assert!(!granted.contains_all(["me", "admin"]));
    }

    #[test]
    fn test_missing_is_sorted_and_deduplicated() {
        let granted: ScopeSet = ["me"].into_iter().collect();

        assert_eq!(
            granted.missing(["write", "admin", "me", "write"]),
            vec!["admin".to_string(), "write".to_string()]
        );
        assert!(granted.missing(["me"]).is_empty());
    }

    #[test]
    fn test_display_is_space_delimited() {
        let scopes: ScopeSet = ["me", "admin"].into_iter().collect();
        assert_eq!(scopes.to_string(), "admin me");
    }

    #[test]
    fn test_serializes_as_array() {
        let scopes: ScopeSet = ["me"].into_iter().collect();
        let json = serde_json::to_value(&scopes).expect("Failed to serialize scopes");

        assert_eq!(json, serde_json::json!(["me"]));
    }
}
