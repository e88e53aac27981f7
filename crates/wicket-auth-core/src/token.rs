//! Signed token codec
//!
//! Produces and consumes compact self-verifying token strings of the
//! form `payload_b64.signature_b64`. The codec knows nothing about
//! sessions or expiry; it only guarantees integrity. Expiry is a payload
//! concern handled by callers.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Serialize};

use crate::crypto::{constant_time_eq, HmacKey};
use crate::AuthError;

/// Signs and verifies opaque payloads with a shared HMAC key.
///
/// Cheap to construct: the account flows build a fresh codec per request
/// when sealing join tokens under the session binding id.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    key: HmacKey,
}

impl TokenCodec {
    pub fn new(key: HmacKey) -> Self {
        Self { key }
    }

    /// Sign a payload into a self-verifying token string.
    ///
    /// Deterministic for a given payload and key; no side effects.
    /// Supports any serializable payload shape (maps, nested maps,
    /// numbers, strings).
    pub fn wrap<T: Serialize>(&self, payload: &T) -> Result<String, AuthError> {
        let payload_json = serde_json::to_vec(payload).map_err(|e| {
            tracing::error!("failed to serialize token payload: {}", e);
            AuthError::Internal("failed to encode token payload".to_string())
        })?;

        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload_json);
        let signature = self.signature(&payload_b64);

        Ok(format!("{payload_b64}.{signature}"))
    }

    /// Verify and decode a token.
    ///
    /// The signature is checked in constant time before any of the
    /// payload is decoded, so nothing about a tampered payload is ever
    /// exposed. Fails with `InvalidToken` on malformed encoding or
    /// signature mismatch.
    pub fn unwrap<T: DeserializeOwned>(&self, token: &str) -> Result<T, AuthError> {
        let parts: Vec<&str> = token.rsplitn(2, '.').collect();
        if parts.len() != 2 {
            return Err(AuthError::InvalidToken);
        }

        let (signature, payload_b64) = (parts[0], parts[1]);

        let expected = self.signature(payload_b64);
        if !constant_time_eq(signature.as_bytes(), expected.as_bytes()) {
            tracing::debug!("token signature mismatch");
            return Err(AuthError::InvalidToken);
        }

        let payload_json = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::InvalidToken)?;

        serde_json::from_slice(&payload_json).map_err(|_| AuthError::InvalidToken)
    }

    fn signature(&self, data: &str) -> String {
        URL_SAFE_NO_PAD.encode(self.key.sign(data.as_bytes()))
    }
}
