//! Editing sessions for quicgrid.
//!
//! This crate wraps the grid model in an [`EditorSession`] that accepts
//! front-end intents (add a track, drop a gate, load a QUIC string, ...),
//! keeps connectivity up to date and hands exported QUIC strings to a
//! [`QuicSink`].
//!
//! # Example
//!
//! ```rust
//! use quicgrid_editor::{DropTarget, EditorConfig, EditorSession, GateSource, RecordingSink};
//! use quicgrid_ir::{Symbol, TrackId};
//!
//! let mut session = EditorSession::new(&EditorConfig::default())
//!     .unwrap()
//!     .with_sink(RecordingSink::new());
//! session.add_track().unwrap();
//!
//! session
//!     .drop_gate(
//!         GateSource::Palette(Symbol::new('C')),
//!         DropTarget::Track { track: TrackId(0), hint: 0.0 },
//!     )
//!     .unwrap();
//! session
//!     .drop_gate(
//!         GateSource::Palette(Symbol::new('X')),
//!         DropTarget::Track { track: TrackId(1), hint: 0.0 },
//!     )
//!     .unwrap();
//!
//! assert_eq!(session.connectivity().links().len(), 1);
//! assert_eq!(session.export_quic(), "CX");
//! assert_eq!(session.sink().last(), Some("CX"));
//! ```

pub mod config;
mod error;
pub mod intent;
mod session;
pub mod sink;

pub use config::{CatalogConfig, ConfigError, EditorConfig};
pub use error::{ErrorKind, SessionError, SessionResult};
pub use intent::{DropTarget, GateSource, Intent, Outcome, parse_script};
pub use session::{EditorSession, GridSnapshot};
pub use sink::{FnSink, NullSink, QuicSink, RecordingSink};
