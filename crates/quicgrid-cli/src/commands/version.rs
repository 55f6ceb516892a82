//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - grid editing for QUIC-encoded circuits",
        style("quicgrid").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  quicgrid-ir      Tracks, placement grid and connectivity");
    println!("  quicgrid-quic    QUIC parser and emitter");
    println!("  quicgrid-editor  Editing sessions, intents and configuration");
    println!("  quicgrid-cli     Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
