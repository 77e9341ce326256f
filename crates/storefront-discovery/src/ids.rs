//! Newtype IDs for type-safe identifiers.
//!
//! The storefront tables key everything by opaque strings. Wrapping them keeps
//! a `CategoryId` from being compared against a `ProductId` by accident.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(UserId);
define_id!(VoucherId);
define_id!(ReviewId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_str() {
        let id: CategoryId = "cat-ao".into();
        assert_eq!(id.as_str(), "cat-ao");
        assert_eq!(format!("{}", id), "cat-ao");
    }

    #[test]
    fn test_id_ordering_is_lexicographic() {
        let mut ids = vec![ProductId::new("b2"), ProductId::new("a9"), ProductId::new("b10")];
        ids.sort();
        assert_eq!(
            ids.iter().map(ProductId::as_str).collect::<Vec<_>>(),
            vec!["a9", "b10", "b2"]
        );
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = UserId::new("u-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"u-1\"");
        let back: UserId = serde_json::from_str("\"u-1\"").unwrap();
        assert_eq!(back, id);
    }
}
