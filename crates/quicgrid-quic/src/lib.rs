//! QUIC Parser and Emitter for quicgrid
//!
//! A QUIC string is the compact text form of a circuit grid: a comma-separated
//! sequence of columns, each column one character per track.
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `HX,IC` | 2 tracks; column 0 is `H` on `q[0]`, `X` on `q[1]` |
//! | `I` | no-op / empty cell |
//! | `""` | empty grid (a single track, no placements) |
//!
//! At most eight characters appear per column, one for each track.
//! Characters outside the symbol catalog are kept as opaque symbols.
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use quicgrid_quic::{emit, parse};
//!
//! let grid = parse("HX,IC").unwrap();
//! assert_eq!(grid.num_tracks(), 2);
//! assert_eq!(grid.max_depth(), 2);
//!
//! assert_eq!(emit(&grid), "HX,IC");
//! ```
//!
//! # Example: Malformed Input
//!
//! ```rust
//! use quicgrid_quic::{ParseError, parse};
//!
//! let err = parse("HX,I").unwrap_err();
//! assert!(matches!(err, ParseError::MalformedInput { column: 1, .. }));
//! ```

mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::{emit, emit_columns};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_columns, parse_with};
