//! Common test utilities for wicket-auth-core integration tests

pub mod mock_provider;

#[allow(unused_imports)]
pub use mock_provider::{MockProvider, MockUser};
