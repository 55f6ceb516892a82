//! Show command implementation.

use anyhow::{Context, Result};
use console::style;

use super::common::{load_config, print_session, read_quic_arg, session_from_quic};

/// Execute the show command.
pub fn execute(quic: &str, format: &str, config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let quic = read_quic_arg(quic)?;
    let session = session_from_quic(&config, &quic)?;

    match format.to_lowercase().as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&session.snapshot())
                .context("Failed to serialize snapshot")?;
            println!("{json}");
        }
        "text" | "table" => {
            let grid = session.grid();
            println!(
                "{} {} tracks, depth {}\n",
                style("→").cyan().bold(),
                grid.num_tracks(),
                grid.max_depth()
            );
            print_session(&session);
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: text, json"),
    }

    Ok(())
}
