//! Property-based tests for grid editing invariants.

use proptest::prelude::*;
use quicgrid_ir::{
    Connectivity, ControlPolicy, Grid, MAX_TRACKS, PlacementMode, Resolution, Symbol,
    SymbolCatalog, TrackId,
};

fn arb_symbol() -> impl Strategy<Value = Symbol> {
    prop::sample::select(SymbolCatalog::STANDARD_SYMBOLS.to_vec()).prop_map(Symbol::new)
}

/// A grid with 1-8 tracks filled by random positional drops.
fn arb_grid() -> impl Strategy<Value = Grid> {
    (1_usize..=MAX_TRACKS).prop_flat_map(|tracks| {
        prop::collection::vec((0..tracks, 0.0_f64..12.0, arb_symbol()), 0..48).prop_map(
            move |drops| {
                let mut grid = Grid::with_tracks(tracks).unwrap();
                for (track, hint, symbol) in drops {
                    grid.place(TrackId(track), symbol, PlacementMode::Positional(hint))
                        .unwrap();
                }
                grid
            },
        )
    })
}

proptest! {
    /// A positional drop either replaces (count unchanged) or inserts (count
    /// plus one), and never touches other tracks.
    #[test]
    fn test_positional_drop_is_local(
        grid in arb_grid(),
        pick in any::<prop::sample::Index>(),
        hint in -2.0_f64..14.0,
        symbol in arb_symbol(),
    ) {
        let track = TrackId(pick.index(grid.num_tracks()));
        let resolution = grid.resolve_hint(track, hint).unwrap();

        let mut edited = grid.clone();
        let cell = edited.place(track, symbol, PlacementMode::Positional(hint)).unwrap();
        prop_assert_eq!(cell.column, resolution.column());
        prop_assert_eq!(edited.get(track, cell.column), Some(symbol));

        let expected = match resolution {
            Resolution::Replace(_) => grid.num_placements(),
            Resolution::Insert(_) => grid.num_placements() + 1,
        };
        prop_assert_eq!(edited.num_placements(), expected);

        for other in grid.tracks().iter().filter(|t| *t != track) {
            prop_assert_eq!(edited.line(other).unwrap(), grid.line(other).unwrap());
        }
    }

    /// Removing a track shifts every later track down by one.
    #[test]
    fn test_remove_track_reindexes(grid in arb_grid(), pick in any::<prop::sample::Index>()) {
        let removed = TrackId(pick.index(grid.num_tracks()));
        let mut edited = grid.clone();
        edited.remove_track(removed).unwrap();

        prop_assert_eq!(edited.num_tracks(), grid.num_tracks() - 1);
        for t in removed.0 + 1..grid.num_tracks() {
            prop_assert_eq!(
                edited.line(TrackId(t - 1)).unwrap(),
                grid.line(TrackId(t)).unwrap()
            );
        }
    }

    /// Separators always land on a boundary within the grid.
    #[test]
    fn test_separator_bounds(grid in arb_grid(), x in -5.0_f64..30.0) {
        let mut edited = grid.clone();
        let boundary = edited.insert_separator(x).unwrap();
        prop_assert!(boundary <= grid.max_depth());
        prop_assert!(edited.separators().any(|b| b == boundary));
        prop_assert_eq!(edited.placements(), grid.placements());
    }

    /// Separators stay within the grid after it shrinks.
    #[test]
    fn test_separators_survive_shrink(
        grid in arb_grid(),
        xs in prop::collection::vec(0.0_f64..30.0, 1..6),
        pick in any::<prop::sample::Index>(),
        drop_track in any::<bool>(),
    ) {
        let mut edited = grid.clone();
        for x in xs {
            edited.insert_separator(x).unwrap();
        }

        let track = TrackId(pick.index(edited.num_tracks()));
        if drop_track && edited.num_tracks() > 1 {
            edited.remove_track(track).unwrap();
        } else if let Some(last) = edited.line(track).unwrap().len().checked_sub(1) {
            edited.remove(track, last).unwrap();
        }

        let depth = edited.max_depth();
        prop_assert!(edited.separators().all(|b| b <= depth));
    }

    /// Strict links only come from columns with exactly one control, and each
    /// link joins a control symbol to a target symbol in the same column.
    #[test]
    fn test_links_join_control_and_target(grid in arb_grid()) {
        let catalog = SymbolCatalog::standard();
        let conn = Connectivity::resolve(&grid, &catalog, ControlPolicy::Strict);

        for link in conn.links() {
            let control = grid.get(link.control, link.column).unwrap();
            let target = grid.get(link.target, link.column).unwrap();
            prop_assert!(catalog.is_control(control));
            prop_assert!(catalog.is_target(target));
            prop_assert!(conn.ambiguities().iter().all(|a| a.column != link.column));
        }
    }
}
