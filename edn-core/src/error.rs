// edn-core - Error types for decoding and encoding
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for EDN decoding and encoding.

use edn_parser::{ParseError, Symbol, TermKind};
use thiserror::Error;

use crate::value::{Value, ValueKind};

/// Result type for EDN decoding and encoding.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing EDN.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed input text, passed through unchanged from the parser
    #[error(transparent)]
    Syntax(#[from] ParseError),
    /// The decoder table has no entry for a term kind that occurred
    #[error("No decoder registered for {0}")]
    MissingDecoder(TermKind),
    /// No writer, structural rule or default handler could encode a value
    #[error("Cannot encode {kind} value: {value}")]
    Unencodable { kind: ValueKind, value: String },
    /// A tag reader rejected its input
    #[error("Cannot read #{tag}: {message}")]
    Reader { tag: Symbol, message: String },
    /// Nesting exceeded the configured maximum depth
    #[error("Maximum nesting depth ({0}) exceeded")]
    DepthExceeded(usize),
    /// A value could not be converted to the requested Rust type
    #[error("Conversion error: expected {expected}, got {got}")]
    Conversion { expected: &'static str, got: String },
    /// Failure raised by a caller-supplied reader, writer or decoder
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Create an error for a value no rule could encode.
    pub fn unencodable(value: &Value) -> Self {
        Error::Unencodable {
            kind: value.kind(),
            value: value.to_string(),
        }
    }

    /// Create an error for a reader that rejected its input.
    pub fn reader(tag: &Symbol, message: impl Into<String>) -> Self {
        Error::Reader {
            tag: tag.clone(),
            message: message.into(),
        }
    }

    /// Create a conversion error.
    pub fn conversion(expected: &'static str, got: impl Into<String>) -> Self {
        Error::Conversion {
            expected,
            got: got.into(),
        }
    }

    /// Create an error with a free-form message.
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }
}
