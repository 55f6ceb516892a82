//! Edit command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use quicgrid_editor::{EditorSession, ErrorKind, RecordingSink, parse_script};

use super::common::{load_config, print_session, read_quic_arg};

/// Execute the edit command.
pub fn execute(
    script: &str,
    from: Option<&str>,
    output: Option<&str>,
    config: Option<&str>,
) -> Result<()> {
    println!(
        "{} Applying {}",
        style("→").cyan().bold(),
        style(script).green()
    );

    let config = load_config(config)?;

    if !Path::new(script).exists() {
        anyhow::bail!("File not found: {script}");
    }
    let source =
        fs::read_to_string(script).with_context(|| format!("Failed to read file: {script}"))?;
    let intents =
        parse_script(&source).with_context(|| format!("Invalid intent script: {script}"))?;

    let mut session = EditorSession::new(&config)?.with_sink(RecordingSink::new());
    if let Some(from) = from {
        let quic = read_quic_arg(from)?;
        session
            .load_quic(&quic)
            .with_context(|| format!("Invalid QUIC string: {quic:?}"))?;
    }

    for (index, intent) in intents.into_iter().enumerate() {
        let name = intent.name();
        match session.apply(intent) {
            Ok(outcome) => info!(step = index + 1, intent = name, ?outcome, "Applied intent"),
            Err(e) if e.kind() == ErrorKind::CapacityExceeded => {
                println!("  {} {}", style("⚠").yellow().bold(), e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Step {} ({name}) failed", index + 1));
            }
        }
    }

    println!("{} Script complete", style("✓").green().bold());
    print_session(&session);

    for exported in session.sink().received() {
        println!("  Exported: {}", style(exported).yellow());
    }

    let quic = session.serialize();
    println!("  Result: {}", style(&quic).green());

    if let Some(path) = output {
        fs::write(path, format!("{quic}\n"))
            .with_context(|| format!("Failed to write file: {path}"))?;
        println!("  Output: {}", style(path).green());
    }

    Ok(())
}
