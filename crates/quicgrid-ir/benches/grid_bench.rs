//! Benchmarks for grid editing and overlay resolution
//!
//! Run with: cargo bench -p quicgrid-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quicgrid_ir::{
    Connectivity, ControlPolicy, Grid, MAX_TRACKS, PlacementMode, Symbol, SymbolCatalog, TrackId,
};

/// Build a full-width grid of `depth` columns with a C/X pair in every column.
fn filled_grid(depth: usize) -> Grid {
    let mut grid = Grid::with_tracks(MAX_TRACKS).unwrap();
    for column in 0..depth {
        for t in 0..MAX_TRACKS {
            let symbol = match t {
                0 => 'C',
                1 => 'X',
                _ => 'H',
            };
            grid.place(TrackId(t), Symbol::new(symbol), PlacementMode::Exact(column))
                .unwrap();
        }
    }
    grid
}

/// Benchmark positional placement into a growing track
fn bench_positional_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("positional_placement");

    for depth in &[8, 64, 256] {
        group.bench_with_input(BenchmarkId::new("insert_middle", depth), depth, |b, &n| {
            let grid = filled_grid(n);
            #[allow(clippy::cast_precision_loss)]
            let hint = n as f64 / 2.0;
            b.iter(|| {
                let mut grid = grid.clone();
                grid.place(
                    black_box(TrackId(3)),
                    Symbol::new('T'),
                    PlacementMode::Positional(black_box(hint)),
                )
                .unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark connectivity resolution
fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");
    let catalog = SymbolCatalog::standard();

    for depth in &[8, 64, 256] {
        let grid = filled_grid(*depth);
        group.bench_with_input(BenchmarkId::new("resolve", depth), &grid, |b, grid| {
            b.iter(|| Connectivity::resolve(black_box(grid), &catalog, ControlPolicy::Strict));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_positional_placement, bench_connectivity);
criterion_main!(benches);
