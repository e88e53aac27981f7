//! Configuration for the session core

use std::time::Duration;

/// Session core configuration.
///
/// The signing key is process-wide secret material, injected once at
/// construction and never mutated or logged afterwards.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for session cookie signing (at least 32 bytes)
    pub signing_key: String,
    /// How long an issued session cookie stays valid
    pub session_lifetime: Duration,
}

impl AuthConfig {
    /// Default session lifetime: 30 minutes, no sliding extension
    pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::from_secs(30 * 60);

    /// Create a config with the default session lifetime
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            session_lifetime: Self::DEFAULT_SESSION_LIFETIME,
        }
    }

    /// Set the session lifetime
    pub fn with_session_lifetime(mut self, lifetime: Duration) -> Self {
        self.session_lifetime = lifetime;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key_length", &self.signing_key.len())
            .field("session_lifetime", &self.session_lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetime_is_thirty_minutes() {
        let config = AuthConfig::new("a".repeat(32));
        assert_eq!(config.session_lifetime, Duration::from_secs(1800));
    }

    #[test]
    fn test_with_session_lifetime() {
        let config =
            AuthConfig::new("a".repeat(32)).with_session_lifetime(Duration::from_secs(60));
        assert_eq!(config.session_lifetime, Duration::from_secs(60));
    }

    #[test]
    fn test_debug_redacts_signing_key() {
        let config = AuthConfig::new("super-secret-signing-key-32-byte");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
