//! User provider collaborator
//!
//! The session core owns no identity storage. Lookup, password
//! verification, registration, and redirect-target policy all live
//! behind this capability trait; any concrete backend implements it.

use async_trait::async_trait;
use thiserror::Error;

use wicket_types::Params;

/// A failure reported by the user provider.
///
/// Carries the message shown to the user. The original design threw
/// exceptions for join/register failures; here callers pattern-match on
/// results instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The user-visible message for this failure
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convenience alias for provider call results
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Capability set the session core consumes from an identity backend.
///
/// Calls may block on external I/O (database, password hashing); the
/// core propagates their latency and failures but never retries. A
/// failed call surfaces once as a user-facing message.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Backend-defined user representation
    type User: Send + Sync;

    /// Retrieve a user by login; `None` as the login asks for the
    /// backend's anonymous/guest entity, if it has one
    async fn get_user(&self, login: Option<&str>) -> ProviderResult<Option<Self::User>>;

    /// The login for a user, or `None` if the user is invalid
    async fn user_login(&self, user: &Self::User) -> Option<String>;

    /// Verify a password against the user's credentials
    async fn verify_password(&self, user: &Self::User, password: &str) -> ProviderResult<bool>;

    /// Whether the user exists and is valid
    async fn verify_user(&self, user: &Self::User) -> bool;

    /// Set the password for a user
    async fn set_password(&self, user: &Self::User, password: &str) -> ProviderResult<()>;

    /// Handle a join request: the submitted params plus the signed join
    /// token that registration must present back
    async fn handle_join(&self, params: &Params, join_token: &str) -> ProviderResult<()>;

    /// Handle registration; the token payload is the verified join
    /// params. Returns the user to log in post-registration.
    async fn handle_register(
        &self,
        params: &Params,
        token_payload: &Params,
    ) -> ProviderResult<Self::User>;

    /// Path of the join entry point
    async fn join_path(&self) -> String;

    /// Path of the login entry point
    async fn login_path(&self) -> String;

    /// Where to send a user after successful login
    async fn login_redirect(&self, user: Option<&Self::User>) -> String;

    /// Where to send a user after logout or access denial
    async fn logout_redirect(&self, user: Option<&Self::User>) -> String;

    /// Record where a user should land after their next login
    async fn set_login_redirect(
        &self,
        user: Option<&Self::User>,
        location: &str,
    ) -> ProviderResult<()>;
}
