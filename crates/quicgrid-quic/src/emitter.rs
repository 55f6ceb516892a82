//! QUIC emitter for serializing grids.

use quicgrid_ir::{Grid, TrackId};

/// Emit a grid as a QUIC string.
///
/// Columns `0..max_depth` are written left to right, one character per
/// track; empty cells are written as the grid's identity symbol. Columns are
/// joined with `,`. A grid without placements emits the empty string.
pub fn emit(grid: &Grid) -> String {
    emit_columns(grid).join(",")
}

/// Emit each column of a grid as its own fixed-width string.
pub fn emit_columns(grid: &Grid) -> Vec<String> {
    (0..grid.max_depth())
        .map(|column| {
            (0..grid.num_tracks())
                .map(|t| grid.symbol_or_identity(TrackId(t), column).as_char())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicgrid_ir::{PlacementMode, Symbol};

    #[test]
    fn test_emit_empty_grid() {
        assert_eq!(emit(&Grid::with_tracks(1).unwrap()), "");
        assert_eq!(emit(&Grid::new()), "");
    }

    #[test]
    fn test_emit_two_tracks() {
        let mut grid = Grid::with_tracks(2).unwrap();
        grid.place(TrackId(0), Symbol::new('H'), PlacementMode::Exact(0))
            .unwrap();
        grid.place(TrackId(1), Symbol::new('X'), PlacementMode::Exact(0))
            .unwrap();
        grid.place(TrackId(1), Symbol::new('C'), PlacementMode::Exact(1))
            .unwrap();
        assert_eq!(emit(&grid), "HX,IC");
        assert_eq!(emit_columns(&grid), vec!["HX", "IC"]);
    }

    #[test]
    fn test_emit_pads_short_tracks() {
        let mut grid = Grid::with_tracks(3).unwrap();
        for column in 0..3 {
            grid.place(TrackId(1), Symbol::new('T'), PlacementMode::Exact(column))
                .unwrap();
        }
        assert_eq!(emit(&grid), "ITI,ITI,ITI");
    }

    #[test]
    fn test_emit_uses_grid_identity() {
        let mut grid = Grid::builder()
            .tracks(2)
            .identity(Symbol::new('.'))
            .build()
            .unwrap();
        grid.place(TrackId(0), Symbol::new('H'), PlacementMode::Exact(0))
            .unwrap();
        assert_eq!(emit(&grid), "H.");
    }

    #[test]
    fn test_separators_do_not_affect_output() {
        let mut grid = Grid::with_tracks(1).unwrap();
        grid.place(TrackId(0), Symbol::new('H'), PlacementMode::Exact(0))
            .unwrap();
        grid.place(TrackId(0), Symbol::new('Z'), PlacementMode::Exact(1))
            .unwrap();
        let before = emit(&grid);
        grid.insert_separator(1.0).unwrap();
        assert_eq!(emit(&grid), before);
    }
}
