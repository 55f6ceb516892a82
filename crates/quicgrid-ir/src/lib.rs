//! quicgrid Circuit Grid Model
//!
//! This crate provides the data model behind the quicgrid circuit editor: a
//! small number of parallel tracks (qubit lines), each holding an ordered
//! sequence of gate symbols. It is renderer-agnostic; a presentation layer maps
//! gestures to track indices and continuous column hints and calls into the
//! grid.
//!
//! # Core Components
//!
//! - **Symbols**: [`Symbol`] labels and the injectable [`SymbolCatalog`] that
//!   assigns [`SymbolRole`]s (control, target, identity, plain)
//! - **Tracks**: [`TrackId`] and the bounded [`TrackSet`] (at most
//!   [`MAX_TRACKS`] tracks, always densely indexed)
//! - **Grid**: [`Grid`] with positional and exact placement, removal, moves
//!   and separators
//! - **Connectivity**: [`Connectivity`] control → target links derived per
//!   column
//!
//! # Example: A Controlled-X Column
//!
//! ```rust
//! use quicgrid_ir::{
//!     ControlPolicy, Connectivity, Grid, PlacementMode, Symbol, SymbolCatalog, TrackId,
//! };
//!
//! let mut grid = Grid::with_tracks(2).unwrap();
//! grid.place(TrackId(0), Symbol::new('H'), PlacementMode::Exact(0)).unwrap();
//! grid.place(TrackId(0), Symbol::new('C'), PlacementMode::Exact(1)).unwrap();
//! grid.place(TrackId(1), Symbol::new('X'), PlacementMode::Exact(1)).unwrap();
//!
//! assert_eq!(grid.max_depth(), 2);
//!
//! let overlay = Connectivity::resolve(&grid, &SymbolCatalog::standard(), ControlPolicy::Strict);
//! assert_eq!(overlay.links().len(), 1);
//! assert_eq!(overlay.links()[0].target, TrackId(1));
//! ```
//!
//! # Example: Positional Placement
//!
//! ```rust
//! use quicgrid_ir::{Grid, PlacementMode, Symbol, TrackId};
//!
//! let mut grid = Grid::with_tracks(1).unwrap();
//! grid.place(TrackId(0), Symbol::new('H'), PlacementMode::Positional(0.0)).unwrap();
//! grid.place(TrackId(0), Symbol::new('Z'), PlacementMode::Positional(5.0)).unwrap();
//!
//! // Dropping squarely on the Z body replaces it.
//! grid.place(TrackId(0), Symbol::new('X'), PlacementMode::Positional(1.5)).unwrap();
//! assert_eq!(grid.get(TrackId(0), 1), Some(Symbol::new('X')));
//! assert_eq!(grid.num_placements(), 2);
//! ```
//!
//! # Standard Palette
//!
//! | Symbol | Role |
//! |--------|------|
//! | `C` | control |
//! | `X`, `Y`, `Z`, `N` | target |
//! | `I` | identity |
//! | `H`, `P`, `T`, `m` | plain |

pub mod connectivity;
pub mod error;
pub mod grid;
pub mod symbol;
pub mod track;

pub use connectivity::{AmbiguousControl, Connectivity, ControlPolicy, Link};
pub use error::{GridError, GridResult};
pub use grid::{
    CellRef, DEFAULT_BODY_WIDTH, Grid, GridBuilder, Placement, PlacementMode, Resolution,
    SlotGeometry,
};
pub use symbol::{COLUMN_SEPARATOR, Symbol, SymbolCatalog, SymbolRole};
pub use track::{MAX_TRACKS, TrackId, TrackSet, TrackView};
