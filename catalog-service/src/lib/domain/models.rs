use crate::domain::errors::TextError;

/// Offset pagination window for list operations.
///
/// `skip` defaults to 0 and is never negative. `limit` defaults to 100 and is
/// clamped to `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: i64,
    limit: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 100;

    /// Build a page from optional query parameters.
    ///
    /// # Arguments
    /// * `skip` - Number of rows to skip
    /// * `limit` - Maximum number of rows to return
    ///
    /// # Returns
    /// Page with defaults applied and bounds enforced
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(0).max(0),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn skip(&self) -> i64 {
        self.skip
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Trim `value` and check it is non-empty and at most `max` characters.
pub(crate) fn bounded_text(value: String, max: usize) -> Result<String, TextError> {
    let value = value.trim().to_string();
    let length = value.chars().count();
    if length == 0 {
        Err(TextError::Empty)
    } else if length > max {
        Err(TextError::TooLong {
            max,
            actual: length,
        })
    } else {
        Ok(value)
    }
}

/// Declare a UUID-backed identifier value object.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Parse an identifier from string.
            ///
            /// # Errors
            /// * `InvalidFormat` - String is not a valid UUID
            pub fn from_string(s: &str) -> Result<Self, $crate::domain::errors::IdError> {
                uuid::Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| $crate::domain::errors::IdError::InvalidFormat(e.to_string()))
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

pub(crate) use uuid_id;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let page = Page::default();
        assert_eq!(page.skip(), 0);
        assert_eq!(page.limit(), 100);
    }

    #[test]
    fn test_page_bounds() {
        let page = Page::new(Some(-5), Some(1000));
        assert_eq!(page.skip(), 0);
        assert_eq!(page.limit(), Page::MAX_LIMIT);

        let page = Page::new(Some(20), Some(0));
        assert_eq!(page.skip(), 20);
        assert_eq!(page.limit(), 1);
    }

    #[test]
    fn test_bounded_text() {
        assert_eq!(bounded_text("  Dune ".to_string(), 10), Ok("Dune".to_string()));
        assert_eq!(bounded_text("   ".to_string(), 10), Err(TextError::Empty));
        assert_eq!(
            bounded_text("abcdef".to_string(), 5),
            Err(TextError::TooLong { max: 5, actual: 6 })
        );
    }
}
