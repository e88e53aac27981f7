//! Session record and cookie change types

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::BindingId;

/// Decoded content of the session cookie.
///
/// Wire format is three fields: the login the cookie vouches for, the
/// binding token scoping it to one browser session, and the expiry as
/// epoch seconds. The record is only meaningful after the surrounding
/// signature has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Login the session was established for (generally an e-mail)
    pub login: String,
    /// Binding id the cookie was issued under
    #[serde(rename = "bindingToken")]
    pub binding_token: String,
    /// Expiry as epoch seconds; the record is valid only while this is
    /// strictly in the future
    pub limit: i64,
}

impl SessionRecord {
    /// Create a record expiring `lifetime` from now
    pub fn new(login: impl Into<String>, binding: &BindingId, lifetime: Duration) -> Self {
        Self {
            login: login.into(),
            binding_token: binding.as_str().to_string(),
            limit: Utc::now().timestamp() + lifetime.as_secs() as i64,
        }
    }

    /// Check whether the record's expiry has elapsed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.limit
    }

    /// Expiry as a UTC timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.limit, 0).single()
    }
}

/// Outbound cookie instruction for the embedding response layer.
///
/// Revocation is entirely client-side: clearing means overwriting the
/// cookie with an already-expired value. There is no server-side list of
/// revoked tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieChange {
    /// Set the session cookie to this signed value
    Set(String),
    /// Expire the session cookie
    Clear,
}
