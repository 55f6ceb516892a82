//! Tracks (qubit lines) and the bounded, densely indexed track set.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GridError, GridResult};

/// Hard upper bound on the number of tracks; one QUIC column holds at most
/// this many characters.
pub const MAX_TRACKS: usize = 8;

/// Index of a track within a grid.
///
/// Track indices are always `0..count` with no gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub usize);

impl TrackId {
    /// Display label of the track, e.g. `q[0]`.
    pub fn label(self) -> String {
        format!("q[{}]", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q[{}]", self.0)
    }
}

impl From<usize> for TrackId {
    fn from(index: usize) -> Self {
        TrackId(index)
    }
}

/// Read-only view of a track for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackView {
    /// Position of the track.
    pub index: usize,
    /// Derived label, `q[index]`.
    pub label: String,
}

/// Ordered, bounded set of tracks.
///
/// Tracks carry no data of their own: a track is fully described by its
/// position, and labels are recomputed from it after every removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSet {
    count: usize,
    max: usize,
}

impl TrackSet {
    /// Create an empty track set holding at most `max` tracks.
    pub fn new(max: usize) -> GridResult<Self> {
        if max == 0 || max > MAX_TRACKS {
            return Err(GridError::MalformedInput(format!(
                "track limit must be between 1 and {MAX_TRACKS}, got {max}"
            )));
        }
        Ok(Self { count: 0, max })
    }

    /// Append a track at index `count`.
    pub fn add(&mut self) -> GridResult<TrackId> {
        if self.count >= self.max {
            return Err(GridError::CapacityExceeded { max: self.max });
        }
        let id = TrackId(self.count);
        self.count += 1;
        Ok(id)
    }

    /// Drop every track but the first. The limit is always at least one.
    pub fn reset(&mut self) {
        self.count = 1;
    }

    /// Remove a track; every following track moves down by one.
    pub fn remove(&mut self, track: TrackId) -> GridResult<()> {
        if !self.contains(track) {
            return Err(GridError::NotFound(format!(
                "track {track} (grid has {} tracks)",
                self.count
            )));
        }
        self.count -= 1;
        Ok(())
    }

    /// Return an error unless `track` currently exists.
    pub fn check(&self, track: TrackId) -> GridResult<()> {
        if self.contains(track) {
            Ok(())
        } else {
            Err(GridError::InvalidTrack {
                track,
                count: self.count,
            })
        }
    }

    /// Check whether a track index is in range.
    #[inline]
    pub fn contains(&self, track: TrackId) -> bool {
        track.0 < self.count
    }

    /// Number of tracks.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if there are no tracks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Maximum number of tracks.
    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// Check whether another track can be added.
    pub fn is_full(&self) -> bool {
        self.count >= self.max
    }

    /// Iterate over track ids in order.
    pub fn iter(&self) -> impl Iterator<Item = TrackId> + '_ {
        (0..self.count).map(TrackId)
    }

    /// Views of every track, in order.
    pub fn views(&self) -> Vec<TrackView> {
        self.iter()
            .map(|t| TrackView {
                index: t.0,
                label: t.label(),
            })
            .collect()
    }
}

impl Default for TrackSet {
    fn default() -> Self {
        Self {
            count: 0,
            max: MAX_TRACKS,
        }
    }
}
