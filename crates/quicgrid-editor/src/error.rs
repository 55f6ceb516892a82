//! Error types for editor sessions.

use quicgrid_ir::{GridError, Symbol};
use quicgrid_quic::ParseError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by session intents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// Grid editing error.
    #[error("Grid error: {0}")]
    GridError(#[from] GridError),

    /// QUIC parse error.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// A placed symbol is not part of the palette.
    #[error("Unknown symbol '{0}': not in the palette")]
    UnknownSymbol(Symbol),
}

/// Coarse classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Adding a track or loading a string would exceed the track cap.
    CapacityExceeded,
    /// A track index is out of range.
    InvalidTrack,
    /// Nothing exists at the addressed cell, track or boundary.
    NotFound,
    /// A string or hint is not well formed.
    MalformedInput,
    /// A symbol is not in the palette.
    UnknownSymbol,
    /// The session configuration is invalid.
    Config,
}

impl SessionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::GridError(e) | SessionError::ParseError(ParseError::GridError(e)) => {
                grid_kind(e)
            }
            SessionError::ParseError(_) => ErrorKind::MalformedInput,
            SessionError::ConfigError(_) => ErrorKind::Config,
            SessionError::UnknownSymbol(_) => ErrorKind::UnknownSymbol,
        }
    }
}

fn grid_kind(error: &GridError) -> ErrorKind {
    match error {
        GridError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
        GridError::InvalidTrack { .. } => ErrorKind::InvalidTrack,
        GridError::NotFound(_) => ErrorKind::NotFound,
        _ => ErrorKind::MalformedInput,
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
