//! Transient user notifications (toasts)

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// One notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub level: Level,
    /// Short heading
    pub title: String,
    /// Body text
    pub message: String,
    /// Failure class for error notifications
    pub kind: Option<ErrorKind>,
}

impl Notification {
    /// Success toast
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            level: Level::Success,
            title: "Success".to_string(),
            message: message.into(),
            kind: None,
        }
    }

    /// Error toast carrying the error text verbatim
    pub fn error(err: &Error) -> Self {
        Notification {
            level: Level::Error,
            title: "Error".to_string(),
            message: err.to_string(),
            kind: Some(err.kind()),
        }
    }

    /// Check for an error toast
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
