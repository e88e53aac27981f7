//! Wicket Types - Shared domain types
//!
//! This crate contains the plain data types exchanged between the wicket
//! session core and the framework embedding it:
//! - Session binding identifiers and session records
//! - Request descriptions handed to the flow engine
//! - Flash messages and outbound cookie changes

pub mod binding;
pub mod message;
pub mod request;
pub mod session;

pub use binding::*;
pub use message::*;
pub use request::*;
pub use session::*;
