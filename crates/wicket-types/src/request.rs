//! Request description handed to the flow engine

use std::collections::BTreeMap;

use crate::BindingId;

/// Submitted request parameters (form fields, query string)
pub type Params = BTreeMap<String, String>;

/// HTTP method, reduced to the two the account flows distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Everything the flow engine needs to know about an inbound request.
///
/// The embedding framework builds one of these per request; the core
/// never touches the transport directly.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// Request method
    pub method: Method,
    /// Path with query string, used as the post-login return target
    pub path: String,
    /// Submitted parameters
    pub params: Params,
    /// Raw session cookie value, if the client presented one
    pub cookie: Option<String>,
    /// Binding id of the current session context
    pub binding: BindingId,
}

impl AuthRequest {
    /// Create a request with no parameters and no cookie
    pub fn new(method: Method, path: impl Into<String>, binding: BindingId) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            cookie: None,
            binding,
        }
    }

    /// Attach a submitted parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Attach the presented session cookie value
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}
