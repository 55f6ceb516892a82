//! Serializable editing intents.
//!
//! Every edit a front end can request is an [`Intent`]. Intents can be
//! scripted in YAML or JSON and replayed against a session:
//!
//! ```yaml
//! - intent: add_track
//! - intent: place
//!   track: 0
//!   symbol: H
//!   at: { positional: 0.0 }
//! - intent: drop_gate
//!   source: { palette: C }
//!   target: { track: { track: 1, hint: 0.5 } }
//! - intent: export_quic
//! ```

use serde::{Deserialize, Serialize};

use quicgrid_ir::{CellRef, PlacementMode, Symbol, TrackId};

/// Where a dragged gate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateSource {
    /// A fresh copy of a palette symbol.
    Palette(Symbol),
    /// A gate already on the grid.
    Grid(CellRef),
}

/// Where a dragged gate is released.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    /// On a track, at a continuous horizontal hint.
    Track {
        /// Track under the pointer.
        track: TrackId,
        /// Horizontal position in column pitches.
        hint: f64,
    },
    /// Anywhere outside the grid.
    Outside,
}

/// A single editing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Append a track.
    AddTrack,
    /// Remove a track and its symbols.
    RemoveTrack {
        /// Track to remove.
        track: TrackId,
    },
    /// Place a palette symbol.
    Place {
        /// Target track.
        track: TrackId,
        /// Symbol to place.
        symbol: Symbol,
        /// Positional hint or exact column.
        at: PlacementMode,
    },
    /// Release a dragged gate.
    DropGate {
        /// Origin of the gate.
        source: GateSource,
        /// Release point.
        target: DropTarget,
    },
    /// Move a placed gate.
    MovePlacement {
        /// Cell holding the gate.
        from: CellRef,
        /// Destination track.
        to_track: TrackId,
        /// Destination hint.
        hint: f64,
    },
    /// Delete a placed gate.
    Remove {
        /// Cell to clear.
        cell: CellRef,
    },
    /// Reset to a single empty track.
    Clear,
    /// Add a visual boundary near a horizontal position.
    InsertSeparator {
        /// Approximate position in column pitches.
        x: f64,
    },
    /// Delete a visual boundary.
    RemoveSeparator {
        /// Boundary index.
        boundary: usize,
    },
    /// Replace the grid with a parsed QUIC string.
    LoadQuic {
        /// QUIC text.
        quic: String,
    },
    /// Serialize and notify the sink.
    ExportQuic,
}

impl Intent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddTrack => "add_track",
            Intent::RemoveTrack { .. } => "remove_track",
            Intent::Place { .. } => "place",
            Intent::DropGate { .. } => "drop_gate",
            Intent::MovePlacement { .. } => "move_placement",
            Intent::Remove { .. } => "remove",
            Intent::Clear => "clear",
            Intent::InsertSeparator { .. } => "insert_separator",
            Intent::RemoveSeparator { .. } => "remove_separator",
            Intent::LoadQuic { .. } => "load_quic",
            Intent::ExportQuic => "export_quic",
        }
    }
}

/// What an applied intent produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A track was added.
    TrackAdded(TrackId),
    /// A track was removed together with these symbols.
    TrackRemoved(Vec<Symbol>),
    /// A gate now occupies this cell.
    Placed(CellRef),
    /// A gate was deleted.
    Removed(Symbol),
    /// A separator exists at this boundary.
    Separator(usize),
    /// An export produced this string.
    Exported(String),
    /// The intent succeeded with nothing to report.
    Done,
}

/// Parse an intent script from YAML (JSON is accepted as a YAML subset).
pub fn parse_script(source: &str) -> Result<Vec<Intent>, serde_yaml_ng::Error> {
    serde_yaml_ng::from_str(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_script() {
        let script = r"
- intent: add_track
- intent: place
  track: 0
  symbol: H
  at: { positional: 0.0 }
- intent: drop_gate
  source: { palette: C }
  target: { track: { track: 1, hint: 0.5 } }
- intent: drop_gate
  source: { grid: { track: 0, column: 0 } }
  target: outside
- intent: remove_separator
  boundary: 2
- intent: export_quic
";
        let intents = parse_script(script).unwrap();
        assert_eq!(intents.len(), 6);
        assert_eq!(intents[0], Intent::AddTrack);
        assert_eq!(
            intents[1],
            Intent::Place {
                track: TrackId(0),
                symbol: Symbol::new('H'),
                at: PlacementMode::Positional(0.0),
            }
        );
        assert_eq!(
            intents[3],
            Intent::DropGate {
                source: GateSource::Grid(CellRef::new(0, 0)),
                target: DropTarget::Outside,
            }
        );
        assert_eq!(intents[5].name(), "export_quic");
    }

    #[test]
    fn test_parse_json_script() {
        let script = r#"[{"intent": "load_quic", "quic": "HX,IC"}, {"intent": "clear"}]"#;
        let intents = parse_script(script).unwrap();
        assert_eq!(
            intents,
            vec![
                Intent::LoadQuic {
                    quic: "HX,IC".into()
                },
                Intent::Clear
            ]
        );
    }

    #[test]
    fn test_rejects_multi_character_symbol() {
        let script = "- intent: place\n  track: 0\n  symbol: CN\n  at: { exact: 0 }\n";
        assert!(parse_script(script).is_err());
    }

    #[test]
    fn test_intent_json_roundtrip() {
        let intent = Intent::MovePlacement {
            from: CellRef::new(1, 2),
            to_track: TrackId(0),
            hint: 3.5,
        };
        let json = serde_json::to_string(&intent).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, intent);
    }
}
