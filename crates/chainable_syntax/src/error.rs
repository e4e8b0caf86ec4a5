//! Error types for the syntax layer.
//!
//! Uses `thiserror`. Parse errors carry the offending source line.

use thiserror::Error;

use crate::tree::NodeId;

/// Result type for syntax operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for parsing and tree access.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates an unknown node error.
    #[must_use]
    pub fn unknown_node(id: NodeId) -> Self {
        Self::new(ErrorKind::UnknownNode(id))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Source text could not be parsed.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A node id does not belong to the tree it was used with.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = Error::parse("expected '{'", 3, 7, "struct A".into());
        let msg = format!("{err}");
        assert!(msg.contains("3:7"));
        assert!(msg.contains("expected '{'"));
    }

    #[test]
    fn unknown_node_display() {
        let err = Error::unknown_node(NodeId::new(42));
        assert!(matches!(err.kind, ErrorKind::UnknownNode(_)));
        assert!(format!("{err}").contains("#42"));
    }
}
