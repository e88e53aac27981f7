//! Session binding identifiers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier tying tokens and cookies to one browser session context.
///
/// A binding id is assigned by the embedding framework when a session
/// context is first established, and a fresh one is installed whenever a
/// login or registration succeeds. Because it doubles as HMAC key
/// material for join tokens, generated values are always 32 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingId(String);

impl BindingId {
    /// Generate a fresh random binding id (32 lowercase hex characters)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an identifier assigned by an external session mechanism
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BindingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = BindingId::generate();
        let b = BindingId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_ids_are_32_bytes() {
        let id = BindingId::generate();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_from_value_roundtrip() {
        let id = BindingId::from_value("external-session-id");
        assert_eq!(id.as_str(), "external-session-id");
        assert_eq!(id.to_string(), "external-session-id");
    }
}
