//! List command - search and filter the item catalog

use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cmd::load_catalog;
use crate::core::ItemEntry;

#[derive(Args, Debug)]
pub struct ListCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// Substring matched against SKU, name or barcode (case-insensitive)
    #[arg(short, long)]
    query: Option<String>,

    /// Exact category filter
    #[arg(long)]
    category: Option<String>,

    /// Exact location filter
    #[arg(long)]
    location: Option<String>,

    /// Output as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ListCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = load_catalog(&self.file)?;
        let matches = catalog.search(
            self.query.as_deref(),
            self.category.as_deref(),
            self.location.as_deref(),
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&matches)?);
            return Ok(());
        }

        if matches.is_empty() {
            println!("No items match the given filters");
            return Ok(());
        }

        let rows: Vec<ItemRow> = matches.iter().map(|item| ItemRow::from_entry(item)).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct ItemRow {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Unit Cost")]
    unit_cost: String,
    #[tabled(rename = "Cost Basis")]
    total_cost: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl ItemRow {
    pub fn from_entry(item: &ItemEntry) -> Self {
        ItemRow {
            sku: item.sku.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity.to_string(),
            unit_cost: format_money(item.unit_cost),
            total_cost: format_money(item.total_cost),
            location: item.location.clone(),
        }
    }
}

fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
