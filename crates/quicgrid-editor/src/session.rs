//! The editing session.
//!
//! An [`EditorSession`] owns the grid, the symbol catalog and the cached
//! connectivity. Every intent either succeeds and leaves a consistent grid or
//! fails and leaves the grid untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use quicgrid_ir::{
    AmbiguousControl, CellRef, Connectivity, ControlPolicy, Grid, GridBuilder, Link, Placement,
    PlacementMode, Symbol, SymbolCatalog, TrackId, TrackView,
};

use crate::config::EditorConfig;
use crate::error::{SessionError, SessionResult};
use crate::intent::{DropTarget, GateSource, Intent, Outcome};
use crate::sink::{NullSink, QuicSink};

/// Everything a front end needs to draw the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Tracks in order, with labels.
    pub tracks: Vec<TrackView>,
    /// Placed symbols in track-major order.
    pub placements: Vec<Placement>,
    /// Separator boundaries in ascending order.
    pub separators: Vec<usize>,
    /// Control/target links.
    pub links: Vec<Link>,
    /// Columns whose controls could not be resolved uniquely.
    pub ambiguities: Vec<AmbiguousControl>,
    /// QUIC form of the grid.
    pub quic: String,
}

/// A single-user editing session.
pub struct EditorSession<S = NullSink> {
    grid: Grid,
    catalog: SymbolCatalog,
    policy: ControlPolicy,
    template: GridBuilder,
    connectivity: Connectivity,
    sink: S,
}

impl EditorSession<NullSink> {
    /// Create a session with one empty track.
    pub fn new(config: &EditorConfig) -> SessionResult<Self> {
        Self::with_tracks(config, 1)
    }

    /// Create a session with no tracks.
    pub fn empty(config: &EditorConfig) -> SessionResult<Self> {
        Self::with_tracks(config, 0)
    }

    fn with_tracks(config: &EditorConfig, tracks: usize) -> SessionResult<Self> {
        config.validate()?;
        let catalog = config.catalog()?;
        let template = config.grid_template()?;
        let grid = template.clone().tracks(tracks).build()?;

        let mut session = EditorSession {
            grid,
            catalog,
            policy: config.control_policy,
            template,
            connectivity: Connectivity::default(),
            sink: NullSink,
        };
        session.refresh();
        debug!(
            tracks,
            max_tracks = config.max_tracks,
            policy = %config.control_policy,
            "Created editor session"
        );
        Ok(session)
    }
}

impl Default for EditorSession<NullSink> {
    fn default() -> Self {
        let mut grid = Grid::new();
        grid.clear();
        EditorSession {
            grid,
            catalog: SymbolCatalog::standard(),
            policy: ControlPolicy::default(),
            template: Grid::builder(),
            connectivity: Connectivity::default(),
            sink: NullSink,
        }
    }
}

impl<S: QuicSink> EditorSession<S> {
    /// Replace the export sink, keeping the grid.
    pub fn with_sink<T: QuicSink>(self, sink: T) -> EditorSession<T> {
        EditorSession {
            grid: self.grid,
            catalog: self.catalog,
            policy: self.policy,
            template: self.template,
            connectivity: self.connectivity,
            sink,
        }
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Append a track.
    #[instrument(skip(self))]
    pub fn add_track(&mut self) -> SessionResult<TrackId> {
        let track = self.grid.add_track().inspect_err(|e| warn!("{e}"))?;
        info!(track = %track, "Added track");
        Ok(track)
    }

    /// Remove a track and everything on it; later tracks move up by one.
    #[instrument(skip(self))]
    pub fn remove_track(&mut self, track: TrackId) -> SessionResult<Vec<Symbol>> {
        let removed = self.grid.remove_track(track)?;
        self.refresh();
        info!(track = %track, symbols = removed.len(), "Removed track");
        Ok(removed)
    }

    /// Place a palette symbol on a track.
    #[instrument(skip(self))]
    pub fn place(
        &mut self,
        track: TrackId,
        symbol: Symbol,
        mode: PlacementMode,
    ) -> SessionResult<CellRef> {
        self.check_palette(symbol)?;
        let cell = self.grid.place(track, symbol, mode)?;
        self.refresh();
        debug!(track = %cell.track, column = cell.column, %symbol, "Placed symbol");
        Ok(cell)
    }

    /// Release a dragged gate.
    ///
    /// Returns the cell the gate ended up in, or `None` when it was dropped
    /// outside the grid. A grid gate dropped outside is deleted; a palette
    /// gate dropped outside is discarded.
    #[instrument(skip(self))]
    pub fn drop_gate(
        &mut self,
        source: GateSource,
        target: DropTarget,
    ) -> SessionResult<Option<CellRef>> {
        match (source, target) {
            (GateSource::Palette(symbol), DropTarget::Track { track, hint }) => self
                .place(track, symbol, PlacementMode::Positional(hint))
                .map(Some),
            (GateSource::Grid(from), DropTarget::Track { track, hint }) => {
                self.move_placement(from, track, hint).map(Some)
            }
            (GateSource::Grid(cell), DropTarget::Outside) => {
                self.remove(cell)?;
                Ok(None)
            }
            (GateSource::Palette(symbol), DropTarget::Outside) => {
                debug!(%symbol, "Palette gate dropped outside the grid");
                Ok(None)
            }
        }
    }

    /// Move a placed gate to a hint on a track.
    #[instrument(skip(self))]
    pub fn move_placement(
        &mut self,
        from: CellRef,
        to_track: TrackId,
        hint: f64,
    ) -> SessionResult<CellRef> {
        let cell = self.grid.move_placement(from, to_track, hint)?;
        self.refresh();
        debug!(
            from_track = %from.track,
            from_column = from.column,
            to_track = %cell.track,
            to_column = cell.column,
            "Moved placement"
        );
        Ok(cell)
    }

    /// Delete the gate in a cell.
    #[instrument(skip(self))]
    pub fn remove(&mut self, cell: CellRef) -> SessionResult<Symbol> {
        let symbol = self.grid.remove(cell.track, cell.column)?;
        self.refresh();
        debug!(track = %cell.track, column = cell.column, %symbol, "Removed placement");
        Ok(symbol)
    }

    /// Reset to a single empty track.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.grid.clear();
        self.refresh();
        info!("Cleared grid");
    }

    /// Add a separator at the boundary nearest to `x`.
    #[instrument(skip(self))]
    pub fn insert_separator(&mut self, x: f64) -> SessionResult<usize> {
        let boundary = self.grid.insert_separator(x)?;
        debug!(boundary, "Inserted separator");
        Ok(boundary)
    }

    /// Remove the separator at a boundary.
    #[instrument(skip(self))]
    pub fn remove_separator(&mut self, boundary: usize) -> SessionResult<()> {
        self.grid.remove_separator(boundary)?;
        debug!(boundary, "Removed separator");
        Ok(())
    }

    /// Replace the grid with a parsed QUIC string.
    ///
    /// The new grid is built off to the side; on error the current grid is
    /// kept unchanged.
    #[doc(alias = "deserialize")]
    #[instrument(skip(self, quic), fields(len = quic.len()))]
    pub fn load_quic(&mut self, quic: &str) -> SessionResult<()> {
        let grid = quicgrid_quic::parse_with(quic, self.template.clone())
            .inspect_err(|e| warn!("Rejected QUIC input: {e}"))?;
        self.grid = grid;
        self.refresh();
        info!(
            tracks = self.grid.num_tracks(),
            columns = self.grid.max_depth(),
            "Loaded QUIC"
        );
        Ok(())
    }

    /// Serialize the grid and hand the result to the sink.
    #[instrument(skip(self))]
    pub fn export_quic(&mut self) -> String {
        let quic = self.serialize();
        self.sink.on_serialized(&quic);
        info!(quic = %quic, "Exported QUIC");
        quic
    }

    /// Apply a serialized intent.
    pub fn apply(&mut self, intent: Intent) -> SessionResult<Outcome> {
        let name = intent.name();
        let outcome = match intent {
            Intent::AddTrack => self.add_track().map(Outcome::TrackAdded),
            Intent::RemoveTrack { track } => self.remove_track(track).map(Outcome::TrackRemoved),
            Intent::Place { track, symbol, at } => {
                self.place(track, symbol, at).map(Outcome::Placed)
            }
            Intent::DropGate { source, target } => self
                .drop_gate(source, target)
                .map(|cell| cell.map_or(Outcome::Done, Outcome::Placed)),
            Intent::MovePlacement {
                from,
                to_track,
                hint,
            } => self
                .move_placement(from, to_track, hint)
                .map(Outcome::Placed),
            Intent::Remove { cell } => self.remove(cell).map(Outcome::Removed),
            Intent::Clear => {
                self.clear();
                Ok(Outcome::Done)
            }
            Intent::InsertSeparator { x } => self.insert_separator(x).map(Outcome::Separator),
            Intent::RemoveSeparator { boundary } => {
                self.remove_separator(boundary).map(|()| Outcome::Done)
            }
            Intent::LoadQuic { quic } => self.load_quic(&quic).map(|()| Outcome::Done),
            Intent::ExportQuic => Ok(Outcome::Exported(self.export_quic())),
        };
        if let Err(e) = &outcome {
            debug!(intent = name, error = %e, "Intent rejected");
        }
        outcome
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Tracks in order with their labels.
    pub fn current_tracks(&self) -> Vec<TrackView> {
        self.grid.track_views()
    }

    /// Every placed symbol in track-major order.
    pub fn current_placements(&self) -> Vec<Placement> {
        self.grid.placements()
    }

    /// Control/target links of the current grid.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// QUIC form of the grid. Does not notify the sink.
    pub fn serialize(&self) -> String {
        quicgrid_quic::emit(&self.grid)
    }

    /// Separator boundaries in ascending order.
    pub fn separators(&self) -> Vec<usize> {
        self.grid.separators().collect()
    }

    /// Full render state.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            tracks: self.current_tracks(),
            placements: self.current_placements(),
            separators: self.separators(),
            links: self.connectivity.links().to_vec(),
            ambiguities: self.connectivity.ambiguities().to_vec(),
            quic: self.serialize(),
        }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The symbol palette.
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// Active control policy.
    pub fn policy(&self) -> ControlPolicy {
        self.policy
    }

    /// The export sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The export sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the session and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check_palette(&self, symbol: Symbol) -> SessionResult<()> {
        if self.catalog.contains(symbol) {
            Ok(())
        } else {
            Err(SessionError::UnknownSymbol(symbol))
        }
    }

    fn refresh(&mut self) {
        self.connectivity = Connectivity::resolve(&self.grid, &self.catalog, self.policy);
        for ambiguity in self.connectivity.ambiguities() {
            warn!(
                column = ambiguity.column,
                controls = ambiguity.controls.len(),
                "Column has more than one control"
            );
        }
    }
}

impl<S> std::fmt::Debug for EditorSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("grid", &self.grid)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::sink::RecordingSink;

    fn session() -> EditorSession {
        EditorSession::new(&EditorConfig::default()).unwrap()
    }

    fn sym(c: char) -> Symbol {
        Symbol::new(c)
    }

    #[test]
    fn test_new_session_has_one_track() {
        let s = session();
        assert_eq!(s.current_tracks().len(), 1);
        assert_eq!(s.current_tracks()[0].label, "q[0]");
        assert_eq!(s.serialize(), "");
    }

    #[test]
    fn test_default_matches_new() {
        let s = EditorSession::default();
        assert_eq!(s.grid(), session().grid());
        assert_eq!(s.catalog(), session().catalog());
    }

    #[test]
    fn test_palette_drop_and_export() {
        let mut s = session().with_sink(RecordingSink::new());
        s.add_track().unwrap();
        s.drop_gate(
            GateSource::Palette(sym('H')),
            DropTarget::Track {
                track: TrackId(0),
                hint: 0.5,
            },
        )
        .unwrap();
        s.drop_gate(
            GateSource::Palette(sym('X')),
            DropTarget::Track {
                track: TrackId(1),
                hint: 0.5,
            },
        )
        .unwrap();

        assert_eq!(s.serialize(), "HX");
        assert!(s.sink().is_empty());
        assert_eq!(s.export_quic(), "HX");
        assert_eq!(s.sink().received(), ["HX".to_string()]);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let mut s = session();
        let err = s
            .place(TrackId(0), sym('?'), PlacementMode::Exact(0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownSymbol);
        assert!(s.current_placements().is_empty());
    }

    #[test]
    fn test_grid_gate_dropped_outside_is_removed() {
        let mut s = session();
        s.load_quic("H,X").unwrap();
        let result = s
            .drop_gate(GateSource::Grid(CellRef::new(0, 0)), DropTarget::Outside)
            .unwrap();
        assert_eq!(result, None);
        assert_eq!(s.serialize(), "X");
    }

    #[test]
    fn test_palette_gate_dropped_outside_is_noop() {
        let mut s = session();
        s.load_quic("H").unwrap();
        s.drop_gate(GateSource::Palette(sym('X')), DropTarget::Outside)
            .unwrap();
        assert_eq!(s.serialize(), "H");
    }

    #[test]
    fn test_connectivity_follows_edits() {
        let mut s = session();
        s.load_quic("CX").unwrap();
        assert_eq!(s.connectivity().links().len(), 1);
        s.remove(CellRef::new(0, 0)).unwrap();
        assert!(s.connectivity().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_grid() {
        let mut s = session();
        s.load_quic("HX,IC").unwrap();
        let err = s.load_quic("HX,I").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert_eq!(s.serialize(), "HX,IC");

        let err = s.load_quic("HHHHHHHHH").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(s.serialize(), "HX,IC");
    }

    #[test]
    fn test_apply_intents() {
        let mut s = session();
        assert_eq!(
            s.apply(Intent::AddTrack).unwrap(),
            Outcome::TrackAdded(TrackId(1))
        );
        let placed = s
            .apply(Intent::Place {
                track: TrackId(1),
                symbol: sym('Z'),
                at: PlacementMode::Exact(0),
            })
            .unwrap();
        assert_eq!(placed, Outcome::Placed(CellRef::new(1, 0)));
        assert_eq!(
            s.apply(Intent::ExportQuic).unwrap(),
            Outcome::Exported("IZ".into())
        );
        assert_eq!(
            s.apply(Intent::RemoveTrack { track: TrackId(7) })
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_snapshot() {
        let mut s = session();
        s.load_quic("CX,HI").unwrap();
        s.insert_separator(1.2).unwrap();
        let snap = s.snapshot();
        assert_eq!(snap.tracks.len(), 2);
        assert_eq!(snap.placements.len(), 4);
        assert_eq!(snap.separators, vec![1]);
        assert_eq!(snap.links.len(), 1);
        assert!(snap.ambiguities.is_empty());
        assert_eq!(snap.quic, "CX,HI");
    }
}
