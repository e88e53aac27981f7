//! Auth errors

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors produced by the session core.
///
/// Cryptographic and structural failures (`InvalidToken`,
/// `SessionExpired`, `BindingMismatch`) are resolved inside the flow
/// engine by collapsing to the anonymous state; they only escape through
/// the lower-level codec APIs. Business failures are surfaced to the
/// user as messages, never as a crashed request.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Malformed encoding or signature mismatch; no payload is exposed
    #[error("invalid token")]
    InvalidToken,

    /// Valid signature, but the record's expiry has elapsed
    #[error("session expired")]
    SessionExpired,

    /// Valid signature and expiry, but the record was issued under a
    /// different binding id than the current session context
    #[error("session binding mismatch")]
    BindingMismatch,

    /// No user exists for the submitted login
    #[error("unknown user")]
    UnknownUser,

    /// Password verification failed
    #[error("invalid credentials")]
    BadCredentials,

    /// Login or password missing from the request
    #[error("missing credentials")]
    MissingCredentials,

    /// The external user provider reported a failure
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration error (bad signing key, etc.)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code an embedding layer should map this error to
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidToken
            | Self::SessionExpired
            | Self::BindingMismatch
            | Self::UnknownUser
            | Self::BadCredentials => 401,
            Self::MissingCredentials => 400,
            Self::Provider(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Whether this failure collapses to the anonymous state rather than
    /// being shown to the user
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::BindingMismatch)
    }
}
