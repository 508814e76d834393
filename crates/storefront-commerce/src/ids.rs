//! Newtype IDs for type-safe identifiers.
//!
//! Keeps product ids and session ids from being mixed up at call sites that
//! take plain strings from the command line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
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

define_id!(
    /// Stable identifier of a catalog product.
    ProductId
);
define_id!(
    /// Identifier of one shopping session.
    SessionId
);

impl ProductId {
    /// Generate a time-based id (milliseconds since the Unix epoch).
    ///
    /// Not unique on its own; [`Catalog::append`](crate::catalog::Catalog::append)
    /// bumps it until it no longer collides.
    pub fn generate() -> Self {
        Self(current_millis().to_string())
    }

    /// The id parsed as a number, if it is one.
    pub(crate) fn numeric(&self) -> Option<u128> {
        self.0.parse().ok()
    }
}

impl SessionId {
    /// Generate a new session id.
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("sess_{:x}_{:x}", current_millis(), counter))
    }
}

fn current_millis() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("1");
        assert_eq!(id.as_str(), "1");
    }

    #[test]
    fn test_generated_product_id_is_numeric() {
        let id = ProductId::generate();
        assert!(id.numeric().is_some());
    }

    #[test]
    fn test_session_ids_differ() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("sess_"));
    }

    #[test]
    fn test_id_from_str_and_display() {
        let id: ProductId = "42".into();
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }
}
