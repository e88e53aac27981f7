//! Wicket Auth Core - stateless signed-token session core
//!
//! Issues tamper-evident session cookies binding a login to a
//! per-browser binding id and an expiry, validates them without any
//! server-side session storage, and drives the join, register, login,
//! and logout flows against an external [`provider::UserProvider`].

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod error;
pub mod flow;
pub mod provider;
pub mod token;

pub use config::AuthConfig;
pub use cookie::SessionCookies;
pub use crypto::{constant_time_eq, HmacKey, HmacKeyError};
pub use error::AuthError;
pub use flow::{AuthFlow, FlowResponse};
pub use provider::{ProviderError, ProviderResult, UserProvider};
pub use token::TokenCodec;
