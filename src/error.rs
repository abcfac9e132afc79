//! Error types for xmlchain
//!
//! Resolution never fails; errors come from commits that would break a
//! builder limit, from formatting with an invalid configuration, and from
//! build scripts.

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Element or attribute name that is not a valid markup name
    InvalidName { name: String },
    /// Committing would place a node deeper than the configured maximum
    MaxDepthExceeded { max: usize },
    /// A single commit carries more attributes than allowed
    MaxAttributesExceeded { max: usize },
    /// Cursor or node id that does not belong to this document
    UnknownNode { id: usize },
    /// Formatter configuration outside of the supported range
    InvalidIndentation(String),
    /// Malformed build script line
    Script { line: usize },
    /// Reading or writing a file failed
    Io(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { name } => write!(f, "invalid name: {name:?}"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxAttributesExceeded { max } => {
                write!(f, "max attributes exceeded: {max}")
            }
            Self::UnknownNode { id } => write!(f, "unknown node: {id}"),
            Self::InvalidIndentation(msg) => write!(f, "invalid indentation: {msg}"),
            Self::Script { line } => write!(f, "script error on line {line}"),
            Self::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

/// Main error type for xmlchain
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Append context to the message, keeping the kind
    pub fn with_context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{}: {}", self.message, context);
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn invalid_name(name: &str) -> Self {
        Self::new(ErrorKind::InvalidName {
            name: name.to_string(),
        })
    }

    pub(crate) fn unknown_node(id: usize) -> Self {
        Self::new(ErrorKind::UnknownNode { id })
    }

    pub(crate) fn script(line: usize, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Script { line }).with_context(message)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

/// Result type alias for xmlchain
pub type Result<T> = std::result::Result<T, Error>;
