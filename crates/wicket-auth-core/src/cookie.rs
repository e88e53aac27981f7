//! Session cookie encoding and validation
//!
//! The session record lives entirely in the client-held cookie: login,
//! binding token, expiry, wrapped in a signed token keyed by the global
//! signing secret. Reading enforces signature, expiry, and binding in
//! that order, and collapses every failure to the anonymous state.

use std::time::Duration;

use wicket_types::{BindingId, CookieChange, SessionRecord};

use crate::crypto::{constant_time_eq, HmacKey};
use crate::token::TokenCodec;
use crate::AuthError;

/// Serializes and validates session records as signed cookie values.
///
/// Keying: the long-lived session cookie is always signed with the
/// global secret. Only short-lived join tokens use the binding id as key
/// material; conflating the two would tie cookie integrity to a value
/// the client can observe.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    codec: TokenCodec,
    lifetime: Duration,
}

impl SessionCookies {
    pub fn new(key: HmacKey, lifetime: Duration) -> Self {
        Self {
            codec: TokenCodec::new(key),
            lifetime,
        }
    }

    /// Issue a signed cookie value for a login under the given binding.
    ///
    /// The record expires a fixed lifetime from now; there is no sliding
    /// extension on later requests.
    pub fn issue(&self, login: &str, binding: &BindingId) -> Result<String, AuthError> {
        let record = SessionRecord::new(login, binding, self.lifetime);
        self.codec.wrap(&record)
    }

    /// Decode a cookie value, distinguishing the failure causes.
    ///
    /// Checks run strictest-first: signature, then expiry, then binding.
    /// The binding comparison is constant-time; a cookie captured in one
    /// browser session cannot be replayed from another.
    pub fn decode(&self, cookie: &str, current: &BindingId) -> Result<SessionRecord, AuthError> {
        let record: SessionRecord = self.codec.unwrap(cookie)?;

        if record.is_expired() {
            tracing::debug!("session cookie expired");
            return Err(AuthError::SessionExpired);
        }

        if !constant_time_eq(record.binding_token.as_bytes(), current.as_str().as_bytes()) {
            tracing::debug!("session cookie bound to a different session context");
            return Err(AuthError::BindingMismatch);
        }

        Ok(record)
    }

    /// Decode a cookie value, collapsing every failure to anonymous
    pub fn read(&self, cookie: &str, current: &BindingId) -> Option<SessionRecord> {
        self.decode(cookie, current).ok()
    }

    /// Instruct the caller to expire the cookie.
    ///
    /// Revocation is delegated entirely to the client overwriting the
    /// value; a captured copy stays valid until its natural expiry.
    pub fn revoke(&self) -> CookieChange {
        CookieChange::Clear
    }
}
