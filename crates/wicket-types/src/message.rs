//! Flash messages surfaced to the user

use serde::{Deserialize, Serialize};

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Notice,
}

/// A user-visible message produced by a flow.
///
/// The core only produces messages; storing them across the redirect
/// (flash semantics) is the embedding framework's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub severity: Severity,
    pub text: String,
}

impl FlashMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Notice,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_constructors() {
        assert_eq!(FlashMessage::error("nope").severity, Severity::Error);
        assert_eq!(FlashMessage::notice("hi").severity, Severity::Notice);
    }
}
