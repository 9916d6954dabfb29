//! Message domain — user-facing notices with a severity tag.

pub mod state;

use serde::{Deserialize, Serialize};

pub use state::MessageQueue;

/// Notice severity. Transport failures are `Error`, server soft errors `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single notice. The header may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub severity: Severity,
    pub header: String,
    pub body: String,
}

impl Message {
    pub fn new(severity: Severity, body: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            severity,
            header: header.into(),
            body: body.into(),
        }
    }

    pub fn info(body: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(Severity::Info, body, header)
    }

    pub fn warn(body: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(Severity::Warning, body, header)
    }

    pub fn error(body: impl Into<String>, header: impl Into<String>) -> Self {
        Self::new(Severity::Error, body, header)
    }

    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }

    pub fn is_info(&self) -> bool {
        self.severity == Severity::Info
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
