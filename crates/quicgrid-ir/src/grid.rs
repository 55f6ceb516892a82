//! The placement grid: per-track ordered sequences of symbols.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::symbol::Symbol;
use crate::track::{MAX_TRACKS, TrackId, TrackSet, TrackView};

/// Default width of a gate body as a fraction of the column pitch.
pub const DEFAULT_BODY_WIDTH: f64 = 0.6;

/// Geometry used to resolve continuous hints against placed gates.
///
/// A hint is an offset along a track measured in column pitches. Column `k`
/// occupies `[k, k + 1)`; its gate body is centred at `k + 0.5` and spans
/// `body_width` of the pitch. The gap between bodies is where insertions land.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotGeometry {
    body_width: f64,
}

impl SlotGeometry {
    /// Create a geometry with the given body width (`0 < width <= 1`).
    pub fn new(body_width: f64) -> GridResult<Self> {
        if !(body_width > 0.0 && body_width <= 1.0) {
            return Err(GridError::MalformedInput(format!(
                "body width must be in (0, 1], got {body_width}"
            )));
        }
        Ok(Self { body_width })
    }

    /// Body width as a fraction of the pitch.
    #[inline]
    pub fn body_width(&self) -> f64 {
        self.body_width
    }

    /// Centre of the gate body in `column`.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn midpoint(&self, column: usize) -> f64 {
        column as f64 + 0.5
    }

    /// Inclusive bounds of the gate body in `column`.
    #[inline]
    pub fn body_bounds(&self, column: usize) -> (f64, f64) {
        let mid = self.midpoint(column);
        let half = self.body_width / 2.0;
        (mid - half, mid + half)
    }
}

impl Default for SlotGeometry {
    fn default() -> Self {
        Self {
            body_width: DEFAULT_BODY_WIDTH,
        }
    }
}

/// How `place` chooses the column of a new symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Resolve a continuous hint against the gates already on the track.
    Positional(f64),
    /// Write at exactly this column without shifting anything.
    Exact(usize),
}

/// Outcome of resolving a positional hint on one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The hint lies on an existing gate body: overwrite that column.
    Replace(usize),
    /// Insert at this position, shifting later gates on the track right.
    Insert(usize),
}

impl Resolution {
    /// The column affected by this resolution.
    pub fn column(self) -> usize {
        match self {
            Resolution::Replace(c) | Resolution::Insert(c) => c,
        }
    }
}

/// Address of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    /// Track of the cell.
    pub track: TrackId,
    /// Column of the cell.
    pub column: usize,
}

impl CellRef {
    /// Create a cell reference.
    pub fn new(track: impl Into<TrackId>, column: usize) -> Self {
        Self {
            track: track.into(),
            column,
        }
    }
}

/// A symbol bound to a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Track index.
    pub track: TrackId,
    /// Column index.
    pub column: usize,
    /// Placed symbol.
    pub symbol: Symbol,
}

/// A grid of symbols on a bounded set of tracks.
///
/// Each track holds a dense sequence of symbols; a symbol's column is its
/// position in that sequence. Tracks are edited independently, so inserting
/// or removing on one track never moves symbols on another. Cells past the end
/// of a shorter track are empty and read as the identity symbol when the grid
/// is linearised.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    tracks: TrackSet,
    /// One sequence per track, indexed by track position.
    lines: Vec<Vec<Symbol>>,
    /// Column boundaries carrying a visual divider.
    separators: BTreeSet<usize>,
    geometry: SlotGeometry,
    identity: Symbol,
}

impl Grid {
    /// Create an empty grid with no tracks and default limits.
    pub fn new() -> Self {
        Self {
            tracks: TrackSet::default(),
            lines: vec![],
            separators: BTreeSet::new(),
            geometry: SlotGeometry::default(),
            identity: Symbol::new('I'),
        }
    }

    /// Create a grid with `num_tracks` empty tracks and default limits.
    pub fn with_tracks(num_tracks: usize) -> GridResult<Self> {
        GridBuilder::new().tracks(num_tracks).build()
    }

    /// Start building a grid with custom limits.
    pub fn builder() -> GridBuilder {
        GridBuilder::new()
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    /// Append a track.
    pub fn add_track(&mut self) -> GridResult<TrackId> {
        let id = self.tracks.add()?;
        self.lines.push(vec![]);
        Ok(id)
    }

    /// Remove a track with all of its placements.
    ///
    /// Following tracks shift down by one and keep their placements.
    pub fn remove_track(&mut self, track: TrackId) -> GridResult<Vec<Symbol>> {
        self.tracks.remove(track)?;
        let removed = self.lines.remove(track.0);
        self.prune_separators();
        Ok(removed)
    }

    /// The track set.
    pub fn tracks(&self) -> &TrackSet {
        &self.tracks
    }

    /// Number of tracks.
    #[inline]
    pub fn num_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Maximum number of tracks.
    #[inline]
    pub fn max_tracks(&self) -> usize {
        self.tracks.max()
    }

    /// Index and label of every track.
    pub fn track_views(&self) -> Vec<TrackView> {
        self.tracks.views()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Longest track sequence; zero for a grid without placements.
    pub fn max_depth(&self) -> usize {
        self.lines.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check whether no symbol is placed anywhere.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(Vec::is_empty)
    }

    /// Total number of placements.
    pub fn num_placements(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Symbols placed on a track, in column order.
    pub fn line(&self, track: TrackId) -> GridResult<&[Symbol]> {
        self.tracks.check(track)?;
        Ok(&self.lines[track.0])
    }

    /// Symbol at a cell, if any.
    pub fn get(&self, track: TrackId, column: usize) -> Option<Symbol> {
        self.lines.get(track.0)?.get(column).copied()
    }

    /// Symbol at a cell, or the identity symbol if the cell is empty.
    pub fn symbol_or_identity(&self, track: TrackId, column: usize) -> Symbol {
        self.get(track, column).unwrap_or(self.identity)
    }

    /// Occupied cells of one column, in track order.
    pub fn column(&self, column: usize) -> impl Iterator<Item = (TrackId, Symbol)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter_map(move |(t, line)| line.get(column).map(|s| (TrackId(t), *s)))
    }

    /// Every placement, ordered by track and then column.
    pub fn placements(&self) -> Vec<Placement> {
        self.lines
            .iter()
            .enumerate()
            .flat_map(|(t, line)| {
                line.iter().enumerate().map(move |(column, symbol)| Placement {
                    track: TrackId(t),
                    column,
                    symbol: *symbol,
                })
            })
            .collect()
    }

    /// Symbol used for empty cells.
    #[inline]
    pub fn identity(&self) -> Symbol {
        self.identity
    }

    /// Hint geometry.
    #[inline]
    pub fn geometry(&self) -> SlotGeometry {
        self.geometry
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Resolve a positional hint on a track.
    ///
    /// A hint inside a gate body (bounds inclusive) replaces that gate.
    /// Otherwise the symbol is inserted after the last gate whose midpoint is
    /// strictly less than the hint, or at position 0.
    pub fn resolve_hint(&self, track: TrackId, hint: f64) -> GridResult<Resolution> {
        let line = self.line(track)?;
        if !hint.is_finite() {
            return Err(GridError::MalformedInput(format!(
                "placement hint must be finite, got {hint}"
            )));
        }

        let mut insert_at = 0;
        for column in 0..line.len() {
            let (left, right) = self.geometry.body_bounds(column);
            if hint >= left && hint <= right {
                return Ok(Resolution::Replace(column));
            }
            if self.geometry.midpoint(column) < hint {
                insert_at = column + 1;
            } else {
                break;
            }
        }
        Ok(Resolution::Insert(insert_at))
    }

    /// Place a symbol on a track and return the cell it ended up in.
    pub fn place(
        &mut self,
        track: TrackId,
        symbol: Symbol,
        mode: PlacementMode,
    ) -> GridResult<CellRef> {
        if symbol.is_reserved() {
            return Err(GridError::InvalidSymbol(symbol.to_string()));
        }
        let column = match mode {
            PlacementMode::Positional(hint) => {
                let resolution = self.resolve_hint(track, hint)?;
                self.apply(track, symbol, resolution);
                resolution.column()
            }
            PlacementMode::Exact(column) => {
                self.tracks.check(track)?;
                let depth = self.max_depth();
                if column > depth {
                    return Err(GridError::MalformedInput(format!(
                        "column {column} is past the end of the grid (depth {depth})"
                    )));
                }
                let identity = self.identity;
                let line = &mut self.lines[track.0];
                if column < line.len() {
                    line[column] = symbol;
                } else {
                    line.resize(column, identity);
                    line.push(symbol);
                }
                column
            }
        };
        Ok(CellRef::new(track, column))
    }

    fn apply(&mut self, track: TrackId, symbol: Symbol, resolution: Resolution) {
        let line = &mut self.lines[track.0];
        match resolution {
            Resolution::Replace(column) => line[column] = symbol,
            Resolution::Insert(column) => line.insert(column, symbol),
        }
    }

    /// Remove the symbol at a cell.
    ///
    /// Later symbols on the same track shift left; other tracks are untouched.
    pub fn remove(&mut self, track: TrackId, column: usize) -> GridResult<Symbol> {
        self.tracks.check(track)?;
        let line = &mut self.lines[track.0];
        if column >= line.len() {
            return Err(GridError::NotFound(format!(
                "no placement at {track}, column {column}"
            )));
        }
        let symbol = line.remove(column);
        self.prune_separators();
        Ok(symbol)
    }

    /// Move an existing placement to a positional hint on a track.
    ///
    /// The hint is resolved against the layout before the move, the way a
    /// dragged gate still occupies its slot until it is dropped. Dropping a
    /// gate onto its own body leaves the grid unchanged.
    pub fn move_placement(
        &mut self,
        from: CellRef,
        to_track: TrackId,
        hint: f64,
    ) -> GridResult<CellRef> {
        let symbol = self.get(from.track, from.column).ok_or_else(|| {
            GridError::NotFound(format!(
                "no placement at {}, column {}",
                from.track, from.column
            ))
        })?;
        let resolution = self.resolve_hint(to_track, hint)?;

        if to_track == from.track && resolution == Resolution::Replace(from.column) {
            return Ok(from);
        }

        self.lines[from.track.0].remove(from.column);
        let adjusted = if to_track == from.track && resolution.column() > from.column {
            match resolution {
                Resolution::Replace(c) => Resolution::Replace(c - 1),
                Resolution::Insert(c) => Resolution::Insert(c - 1),
            }
        } else {
            resolution
        };
        self.apply(to_track, symbol, adjusted);
        self.prune_separators();
        Ok(CellRef::new(to_track, adjusted.column()))
    }

    /// Remove every placement and separator and reset to a single track.
    pub fn clear(&mut self) {
        self.tracks.reset();
        self.lines = vec![vec![]];
        self.separators.clear();
    }

    // =========================================================================
    // Separators
    // =========================================================================

    /// Insert a divider at the column boundary nearest to `approx_x`.
    ///
    /// The boundary is clamped to `0..=max_depth`. Returns the boundary used;
    /// inserting at an existing boundary is a no-op.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn insert_separator(&mut self, approx_x: f64) -> GridResult<usize> {
        if !approx_x.is_finite() {
            return Err(GridError::MalformedInput(format!(
                "separator position must be finite, got {approx_x}"
            )));
        }
        let boundary = (approx_x.round().max(0.0) as usize).min(self.max_depth());
        self.separators.insert(boundary);
        Ok(boundary)
    }

    /// Remove the divider at a column boundary.
    pub fn remove_separator(&mut self, boundary: usize) -> GridResult<()> {
        if self.separators.remove(&boundary) {
            Ok(())
        } else {
            Err(GridError::NotFound(format!(
                "no separator before column {boundary}"
            )))
        }
    }

    /// Drop dividers past the last column after the grid shrinks.
    fn prune_separators(&mut self) {
        let depth = self.max_depth();
        self.separators.retain(|&boundary| boundary <= depth);
    }

    /// Column boundaries carrying a divider, ascending.
    pub fn separators(&self) -> impl Iterator<Item = usize> + '_ {
        self.separators.iter().copied()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for grids with non-default limits.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    max_tracks: usize,
    tracks: usize,
    geometry: SlotGeometry,
    identity: Symbol,
}

impl GridBuilder {
    /// Create a builder with default settings (no tracks, cap of 8).
    pub fn new() -> Self {
        Self {
            max_tracks: MAX_TRACKS,
            tracks: 0,
            geometry: SlotGeometry::default(),
            identity: Symbol::new('I'),
        }
    }

    /// Set the track cap.
    #[must_use]
    pub fn max_tracks(mut self, max: usize) -> Self {
        self.max_tracks = max;
        self
    }

    /// Set the initial number of tracks.
    #[must_use]
    pub fn tracks(mut self, count: usize) -> Self {
        self.tracks = count;
        self
    }

    /// Set the hint geometry.
    #[must_use]
    pub fn geometry(mut self, geometry: SlotGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the identity symbol used for empty cells.
    #[must_use]
    pub fn identity(mut self, identity: Symbol) -> Self {
        self.identity = identity;
        self
    }

    /// Build the grid.
    pub fn build(self) -> GridResult<Grid> {
        if self.identity.is_reserved() {
            return Err(GridError::InvalidSymbol(self.identity.to_string()));
        }
        let mut grid = Grid {
            tracks: TrackSet::new(self.max_tracks)?,
            lines: vec![],
            separators: BTreeSet::new(),
            geometry: self.geometry,
            identity: self.identity,
        };
        for _ in 0..self.tracks {
            grid.add_track()?;
        }
        Ok(grid)
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}
