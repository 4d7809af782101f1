//! Error types for webxml

use std::fmt;
use thiserror::Error;

/// Position in the descriptor source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnexpectedToken,
    UnexpectedEof,
    MismatchedTag { expected: String, found: String },
    DuplicateAttribute { name: String },
    InvalidEntity { entity: String },
    InvalidUtf8,
    DescriptorNotFound { path: String },
    InvalidArgument { field: String },
    Io { action: String },
}

impl ErrorKind {
    /// True for kinds produced while reading malformed descriptor content
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedToken
                | Self::UnexpectedEof
                | Self::MismatchedTag { .. }
                | Self::DuplicateAttribute { .. }
                | Self::InvalidEntity { .. }
                | Self::InvalidUtf8
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
            Self::MismatchedTag { expected, found } => {
                write!(
                    f,
                    "mismatched closing tag: expected </{expected}>, found </{found}>"
                )
            }
            Self::DuplicateAttribute { name } => write!(f, "duplicate attribute: {name}"),
            Self::InvalidEntity { entity } => write!(f, "invalid entity: &{entity};"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
            Self::DescriptorNotFound { path } => {
                write!(f, "descriptor '{path}' does not exist")
            }
            Self::InvalidArgument { field } => write!(f, "{field} required"),
            Self::Io { action } => write!(f, "failed to {action}"),
        }
    }
}

/// Main error type for webxml
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    pos: Option<Pos>,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            pos: None,
            message,
        }
    }

    /// Create error at a specific source position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            pos: Some(pos),
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            pos: None,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "error at {pos}: {}", self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

/// Result type alias for webxml
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "10:5");
    }

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::UnexpectedToken);
        assert_eq!(err.kind(), &ErrorKind::UnexpectedToken);
        assert!(err.pos().is_none());
    }

    #[test]
    fn test_error_display_with_pos() {
        let err = Error::at(ErrorKind::UnexpectedEof, Pos::new(10, 2, 5));
        let display = err.to_string();
        assert!(display.contains("error at 2:5"));
        assert!(display.contains("unexpected end of input"));
    }

    #[test]
    fn test_malformed_classification() {
        assert!(ErrorKind::InvalidUtf8.is_malformed());
        assert!(!ErrorKind::DescriptorNotFound {
            path: "web.xml".into()
        }
        .is_malformed());
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = Error::new(ErrorKind::InvalidArgument {
            field: "servlet name".into(),
        });
        assert_eq!(err.to_string(), "error: servlet name required");
    }
}
