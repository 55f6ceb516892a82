//! Error types for the grid crate.

use thiserror::Error;

use crate::track::TrackId;

/// Errors that can occur while editing a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GridError {
    /// Adding a track would exceed the track cap.
    #[error("Maximum of {max} tracks reached")]
    CapacityExceeded {
        /// The configured track cap.
        max: usize,
    },

    /// Track index is outside the current track range.
    #[error("Track {track} out of range (grid has {count} tracks)")]
    InvalidTrack {
        /// The requested track.
        track: TrackId,
        /// Number of tracks at the time of the request.
        count: usize,
    },

    /// Nothing exists at the requested location.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input did not describe a well-formed grid.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A symbol label is not a single character.
    #[error("Invalid symbol '{0}': symbols must be exactly one character")]
    InvalidSymbol(String),

    /// Catalog definition is inconsistent.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
