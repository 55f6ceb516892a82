//! Check command implementation.

use anyhow::Result;
use console::style;

use super::common::{load_config, read_quic_arg, session_from_quic};

/// Execute the check command.
pub fn execute(quic: &str, config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let quic = read_quic_arg(quic)?;
    let session = session_from_quic(&config, &quic)?;

    let grid = session.grid();
    let connectivity = session.connectivity();
    println!(
        "{} Valid QUIC: {} tracks, depth {}, {} links",
        style("✓").green().bold(),
        grid.num_tracks(),
        grid.max_depth(),
        connectivity.links().len()
    );

    let unknown = grid
        .placements()
        .into_iter()
        .filter(|p| !session.catalog().contains(p.symbol))
        .count();
    if unknown > 0 {
        println!(
            "  {} {} symbols are not in the palette",
            style("⚠").yellow().bold(),
            unknown
        );
    }
    if !connectivity.ambiguities().is_empty() {
        println!(
            "  {} {} columns have more than one control",
            style("⚠").yellow().bold(),
            connectivity.ambiguities().len()
        );
    }

    Ok(())
}
