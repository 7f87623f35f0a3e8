//! Audit command - show the catalog's audit trail

use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::Style,
    Table, Tabled,
};

use crate::cmd::load_catalog;
use crate::core::display_action;

#[derive(Args, Debug)]
pub struct AuditCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// Show only the most recent N entries
    #[arg(short, long)]
    last: Option<usize>,

    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct AuditRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Actor")]
    actor: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl AuditCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = load_catalog(&self.file)?;
        let trail = catalog.audit();
        let skip = self
            .last
            .map_or(0, |n| trail.len().saturating_sub(n));
        let entries = &trail[skip..];

        if self.json {
            println!("{}", serde_json::to_string_pretty(entries)?);
            return Ok(());
        }

        if entries.is_empty() {
            println!("Audit trail is empty");
            return Ok(());
        }

        let rows: Vec<AuditRow> = entries
            .iter()
            .map(|e| AuditRow {
                time: e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                actor: e.actor.clone(),
                action: display_action(e.action).to_string(),
                details: e.details.clone(),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{}", table);
        Ok(())
    }
}
