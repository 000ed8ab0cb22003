//! Transient user notifications
//!
//! All user-visible feedback travels as `Notice` values through a single
//! channel; none of them block or require acknowledgement.

use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Neutral information
    Info,

    /// An action completed
    Success,

    /// An action failed
    Error,
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity of the notice
    pub severity: Severity,

    /// Short headline
    pub title: String,

    /// Supporting detail line
    pub detail: String,
}

impl Notice {
    /// Create an informational notice
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Create a success notice
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Create an error notice
    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            detail: detail.into(),
        }
    }
}
