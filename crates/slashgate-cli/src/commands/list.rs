//! `slashgate list` -- show configured slash commands.
//!
//! ```text
//! slashgate list --config ./slashgate.json
//! ```

use std::path::PathBuf;

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use slashgate_core::RegistrySnapshot;
use slashgate_types::PluginConfig;

/// Arguments for `slashgate list`.
#[derive(Args)]
pub struct ListArgs {
    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the list command.
pub fn run(args: ListArgs) -> anyhow::Result<()> {
    let raw = super::load_config(args.config.as_deref())?;
    let config = PluginConfig::from_value(raw)?;
    let snapshot = RegistrySnapshot::from_config(&config);

    if snapshot.is_empty() {
        println!("No slash commands configured.");
        return Ok(());
    }
    println!("{}", build_table(&snapshot));
    Ok(())
}

fn build_table(snapshot: &RegistrySnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["TRIGGER", "METHOD", "URL", "HEADERS", "DESCRIPTION"]);

    for ep in snapshot.endpoints() {
        table.add_row([
            format!("/{}", ep.trigger),
            ep.request_type.to_string(),
            ep.command_url.clone(),
            ep.custom_headers.len().to_string(),
            ep.description.clone(),
        ]);
    }
    table
}
