//! Catalog command implementation.

use anyhow::Result;
use console::style;

use quicgrid_ir::SymbolRole;

use super::common::load_config;

/// Execute the catalog command.
pub fn execute(config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let catalog = config.catalog()?;

    println!("{} Gate palette:\n", style("quicgrid").cyan().bold());

    for &symbol in catalog.symbols() {
        let role = catalog.role(symbol);
        let marker = match role {
            SymbolRole::Control => style("●").magenta(),
            SymbolRole::Target => style("⊕").magenta(),
            SymbolRole::Identity => style("·").dim(),
            _ => style("■").green(),
        };
        println!("  {} {}  {}", marker, style(symbol).bold(), style(role).dim());
    }

    println!();
    println!("  Max tracks:     {}", config.max_tracks);
    println!("  Control policy: {}", config.control_policy);

    Ok(())
}
