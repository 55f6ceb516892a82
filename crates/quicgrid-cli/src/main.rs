//! quicgrid Command-Line Interface
//!
//! Inspect, validate and script-edit circuits written as QUIC strings.
//!
//! ```text
//! q[0]: C H
//! q[1]: X I
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{catalog, check, edit, show, version};

/// quicgrid - grid editing for QUIC-encoded quantum circuits
#[derive(Parser)]
#[command(name = "quicgrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ~/.quicgrid/config.yaml when present)
    #[arg(short, long, global = true, env = "QUICGRID_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a QUIC string as a grid
    Show {
        /// QUIC string, or @file to read it from a file
        quic: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a QUIC string
    Check {
        /// QUIC string, or @file to read it from a file
        quic: String,
    },

    /// Apply a YAML or JSON script of editing intents
    Edit {
        /// Script file
        #[arg(short, long)]
        script: String,

        /// Initial QUIC string (starts from one empty track if omitted)
        #[arg(long)]
        from: Option<String>,

        /// Write the final QUIC string to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the gate palette
    Catalog,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = cli.config.as_deref();

    // Execute command
    let result = match cli.command {
        Commands::Show { quic, format } => show::execute(&quic, &format, config),

        Commands::Check { quic } => check::execute(&quic, config),

        Commands::Edit {
            script,
            from,
            output,
        } => edit::execute(&script, from.as_deref(), output.as_deref(), config),

        Commands::Catalog => catalog::execute(config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
