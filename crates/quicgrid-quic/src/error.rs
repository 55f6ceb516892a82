//! Error types for the QUIC parser.

use quicgrid_ir::GridError;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at position {position}: {message}")]
    LexerError { position: usize, message: String },

    /// A column's width differs from the first column's.
    #[error("Malformed input: column {column} has {found} symbols, expected {expected}")]
    MalformedInput {
        column: usize,
        expected: usize,
        found: usize,
    },

    /// A column with no symbols, e.g. from `",HX"` or `"HX,,HX"`.
    #[error("Malformed input: column {0} is empty")]
    EmptyColumn(usize),

    /// Grid error during construction (e.g. too many tracks).
    #[error("Grid error: {0}")]
    GridError(#[from] GridError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
