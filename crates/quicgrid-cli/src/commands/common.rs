//! Shared helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use quicgrid_editor::{EditorConfig, EditorSession, QuicSink};
use quicgrid_ir::{CellRef, Connectivity, Grid};

/// Return the default config file location (~/.quicgrid/config.yaml).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quicgrid").join("config.yaml"))
}

/// Load the editor configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present; environment overrides apply in both cases.
pub fn load_config(path: Option<&str>) -> Result<EditorConfig> {
    if let Some(path) = path {
        return EditorConfig::load(Some(path))
            .with_context(|| format!("Failed to load config: {path}"));
    }

    match default_config_path() {
        Some(default) if default.exists() => {
            debug!(path = %default.display(), "Using default config file");
            let path = default.to_string_lossy();
            EditorConfig::load(Some(path.as_ref()))
                .with_context(|| format!("Failed to load config: {path}"))
        }
        _ => EditorConfig::load(None).context("Invalid configuration"),
    }
}

/// Resolve a QUIC argument: `@path` reads the string from a file.
pub fn read_quic_arg(arg: &str) -> Result<String> {
    let Some(path) = arg.strip_prefix('@') else {
        return Ok(arg.to_string());
    };

    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    Ok(contents.trim_end_matches(['\n', '\r']).to_string())
}

/// Create a session loaded with a QUIC string.
pub fn session_from_quic(config: &EditorConfig, quic: &str) -> Result<EditorSession> {
    let mut session = EditorSession::new(config)?;
    session
        .load_quic(quic)
        .with_context(|| format!("Invalid QUIC string: {quic:?}"))?;
    Ok(session)
}

/// Render the grid as one text line per track.
///
/// Linked symbols are highlighted; separators are drawn as `|`.
pub fn render_lines(grid: &Grid, connectivity: &Connectivity) -> Vec<String> {
    let separators: Vec<usize> = grid.separators().collect();
    let depth = grid.max_depth();

    grid.tracks()
        .iter()
        .map(|track| {
            let mut line = format!("{}: ", track.label());
            for column in 0..depth {
                if separators.contains(&column) {
                    line.push_str("| ");
                }
                let symbol = grid.symbol_or_identity(track, column);
                let cell = if connectivity.is_linked(CellRef::new(track, column)) {
                    style(symbol).magenta().bold().to_string()
                } else if symbol == grid.identity() {
                    style(symbol).dim().to_string()
                } else {
                    symbol.to_string()
                };
                line.push_str(&cell);
                line.push(' ');
            }
            if separators.contains(&depth) && depth > 0 {
                line.push('|');
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// Print the grid diagram and its control links.
pub fn print_session<S: QuicSink>(session: &EditorSession<S>) {
    for line in render_lines(session.grid(), session.connectivity()) {
        println!("  {line}");
    }

    let connectivity = session.connectivity();
    if !connectivity.links().is_empty() {
        println!();
        println!("  Links:");
        for link in connectivity.links() {
            println!(
                "    column {}: {} {} {}",
                link.column,
                style(link.control).cyan(),
                style("→").dim(),
                style(link.target).cyan()
            );
        }
    }
    for ambiguity in connectivity.ambiguities() {
        let controls: Vec<String> = ambiguity.controls.iter().map(ToString::to_string).collect();
        println!(
            "  {} column {} has {} controls ({})",
            style("⚠").yellow().bold(),
            ambiguity.column,
            ambiguity.controls.len(),
            controls.join(", ")
        );
    }
}
