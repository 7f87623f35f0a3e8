//! Reorder command - restock suggestions for low-stock items

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cmd::load_catalog;

#[derive(Args, Debug)]
pub struct ReorderCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct SuggestionRow {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "On Hand")]
    on_hand: i64,
    #[tabled(rename = "Reorder Point")]
    reorder_point: i64,
    #[tabled(rename = "Suggested Order")]
    order_qty: i64,
}

impl ReorderCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = load_catalog(&self.file)?;
        let rows: Vec<SuggestionRow> = catalog
            .reorder_suggestions()
            .into_iter()
            .map(|s| SuggestionRow {
                sku: s.entry.sku.clone(),
                name: s.entry.name.clone(),
                on_hand: s.entry.quantity,
                reorder_point: s.entry.reorder_point,
                order_qty: s.order_qty,
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        if rows.is_empty() {
            println!("Nothing to reorder");
            return Ok(());
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}
