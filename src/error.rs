use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type WndResult<T> = Result<T, WndError>;

/// Where in the source a problem was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineRef {
    /// A physical line, 1-based.
    Line(usize),
    /// A whole window block; the exact line is unknown.
    Block { start: usize },
}

impl LineRef {
    /// Best line to point a user at.
    pub fn number(&self) -> usize {
        match self {
            LineRef::Line(n) => *n,
            LineRef::Block { start } => *start,
        }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Line(n) => write!(f, "{}", n),
            LineRef::Block { start } => write!(f, "unknown (block starting at line {})", start),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The document is unusable.
    Fatal,
    /// The enclosing unit was aborted; a host may retry with it skipped.
    Recoverable,
    /// Logged only.
    Informational,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Fatal => "fatal",
            Severity::Recoverable => "recoverable",
            Severity::Informational => "info",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WndError {
    #[error("Error in file '{path}' at line {line}: {message}. Line content: `{raw_text}`")]
    Format {
        path: String,
        line: LineRef,
        raw_text: String,
        message: String,
    },

    #[error("Invalid value in file '{path}' at line {line}: {message}. Line content: `{raw_text}`")]
    Value {
        path: String,
        line: LineRef,
        raw_text: String,
        message: String,
    },

    #[error("Unknown window type '{name}'")]
    UnknownWindowType { name: String },

    #[error("Failed to read '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Window {id} not found")]
    NodeNotFound { id: String },

    #[error("Cannot move window {id}: {reason}")]
    InvalidMove { id: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WndError {
    pub fn format(
        path: impl Into<String>,
        line: LineRef,
        raw_text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        WndError::Format {
            path: path.into(),
            line,
            raw_text: raw_text.into(),
            message: message.into(),
        }
    }

    pub fn value(
        path: impl Into<String>,
        line: LineRef,
        raw_text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        WndError::Value {
            path: path.into(),
            line,
            raw_text: raw_text.into(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            WndError::Value { .. } => Severity::Recoverable,
            _ => Severity::Fatal,
        }
    }

    /// Flatten into the shape hosts consume for every kind of report.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            WndError::Format {
                path,
                line,
                raw_text,
                message,
            }
            | WndError::Value {
                path,
                line,
                raw_text,
                message,
            } => Diagnostic {
                severity: self.severity(),
                path: path.clone(),
                line: Some(*line),
                raw_text: raw_text.clone(),
                message: message.clone(),
            },
            WndError::Io { path, reason } => Diagnostic {
                severity: Severity::Fatal,
                path: path.clone(),
                line: None,
                raw_text: String::new(),
                message: reason.clone(),
            },
            other => Diagnostic {
                severity: Severity::Fatal,
                path: String::new(),
                line: None,
                raw_text: String::new(),
                message: other.to_string(),
            },
        }
    }
}

impl From<serde_yaml::Error> for WndError {
    fn from(err: serde_yaml::Error) -> Self {
        WndError::Config(err.to_string())
    }
}

/// A located report of any severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: String,
    pub line: Option<LineRef>,
    pub raw_text: String,
    pub message: String,
}

impl Diagnostic {
    pub fn informational(
        path: impl Into<String>,
        line: LineRef,
        raw_text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity: Severity::Informational,
            path: path.into(),
            line: Some(line),
            raw_text: raw_text.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "[{}] '{}' at line {}: {}. Line content: `{}`",
                self.severity, self.path, line, self.message, self.raw_text
            ),
            None => write!(f, "[{}] '{}': {}", self.severity, self.path, self.message),
        }
    }
}

/// A successful result plus the non-fatal diagnostics gathered on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }
}
