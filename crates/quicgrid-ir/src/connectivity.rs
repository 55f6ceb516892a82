//! Control/target links derived from the grid.
//!
//! The overlay is a pure function of the grid and the catalog. For every
//! column, a single control symbol is linked to each target-capable symbol in
//! the same column. Columns holding more than one control are reported as
//! [`AmbiguousControl`] and handled according to a [`ControlPolicy`].

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::grid::{CellRef, Grid};
use crate::symbol::SymbolCatalog;
use crate::track::TrackId;

/// What to do with a column that holds several controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPolicy {
    /// Emit no links for the column.
    #[default]
    Strict,
    /// Link the control with the lowest track index; ignore the others.
    FirstWins,
}

impl fmt::Display for ControlPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlPolicy::Strict => write!(f, "strict"),
            ControlPolicy::FirstWins => write!(f, "first_wins"),
        }
    }
}

impl std::str::FromStr for ControlPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(ControlPolicy::Strict),
            "first_wins" | "first" => Ok(ControlPolicy::FirstWins),
            other => Err(format!(
                "unknown control policy '{other}' (expected strict or first_wins)"
            )),
        }
    }
}

/// A control → target link within one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Column shared by both ends.
    pub column: usize,
    /// Track holding the control symbol.
    pub control: TrackId,
    /// Track holding the target symbol.
    pub target: TrackId,
}

/// A column with more than one control symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousControl {
    /// Offending column.
    pub column: usize,
    /// Tracks holding a control, ascending.
    pub controls: Vec<TrackId>,
}

/// The connectivity overlay of a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    links: Vec<Link>,
    ambiguities: Vec<AmbiguousControl>,
}

impl Connectivity {
    /// Derive the overlay for a grid.
    pub fn resolve(grid: &Grid, catalog: &SymbolCatalog, policy: ControlPolicy) -> Self {
        let mut links = vec![];
        let mut ambiguities = vec![];

        for column in 0..grid.max_depth() {
            let mut controls = vec![];
            let mut targets = vec![];
            for (track, symbol) in grid.column(column) {
                if catalog.is_control(symbol) {
                    controls.push(track);
                } else if catalog.is_target(symbol) {
                    targets.push(track);
                }
            }

            let control = match controls.len() {
                0 => continue,
                1 => controls[0],
                _ => {
                    let first = controls[0];
                    ambiguities.push(AmbiguousControl { column, controls });
                    match policy {
                        ControlPolicy::Strict => continue,
                        ControlPolicy::FirstWins => first,
                    }
                }
            };

            links.extend(targets.into_iter().map(|target| Link {
                column,
                control,
                target,
            }));
        }

        Self { links, ambiguities }
    }

    /// All links, ordered by column and then target track.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Columns with more than one control.
    pub fn ambiguities(&self) -> &[AmbiguousControl] {
        &self.ambiguities
    }

    /// Links whose ends lie in `column`.
    pub fn links_in_column(&self, column: usize) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(move |l| l.column == column)
    }

    /// Cells at either end of some link, sorted.
    ///
    /// A renderer uses this to highlight linked symbols.
    pub fn linked_cells(&self) -> Vec<CellRef> {
        let cells: FxHashSet<CellRef> = self
            .links
            .iter()
            .flat_map(|l| {
                [
                    CellRef::new(l.control, l.column),
                    CellRef::new(l.target, l.column),
                ]
            })
            .collect();
        let mut cells: Vec<_> = cells.into_iter().collect();
        cells.sort_unstable();
        cells
    }

    /// Check whether a cell is at either end of some link.
    pub fn is_linked(&self, cell: CellRef) -> bool {
        self.links.iter().any(|l| {
            l.column == cell.column && (l.control == cell.track || l.target == cell.track)
        })
    }

    /// Check if there are no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Derive the overlay for a grid.
pub fn resolve(grid: &Grid, catalog: &SymbolCatalog, policy: ControlPolicy) -> Connectivity {
    Connectivity::resolve(grid, catalog, policy)
}
