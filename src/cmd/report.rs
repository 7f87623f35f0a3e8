//! Report command - stock table, valuation total and low-stock alerts

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};

use crate::cmd::list::ItemRow;
use crate::cmd::load_catalog;
use crate::core::Catalog;

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Report data for JSON output
#[derive(Debug, Serialize)]
struct ReportData {
    item_count: usize,
    total_inventory_value: Decimal,
    low_stock: Vec<LowStockRow>,
}

#[derive(Debug, Serialize)]
struct LowStockRow {
    sku: String,
    name: String,
    quantity: i64,
    reorder_point: i64,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = load_catalog(&self.file)?;

        if self.json {
            self.print_json(&catalog)
        } else {
            self.print_report(&catalog);
            Ok(())
        }
    }

    fn print_report(&self, catalog: &Catalog) {
        println!();
        println!("INVENTORY REPORT");
        println!();

        if catalog.item_count() == 0 {
            println!("Inventory is empty");
            return;
        }

        let rows: Vec<ItemRow> = catalog.items().map(ItemRow::from_entry).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        println!(
            "TOTAL INVENTORY VALUE: {:.2}",
            catalog.total_inventory_value()
        );

        let low_stock = catalog.low_stock_items();
        if low_stock.is_empty() {
            println!("All items have sufficient stock");
        } else {
            println!();
            println!("Low-stock items:");
            for item in low_stock {
                println!(
                    "  - {}: {} (qty {} <= reorder point {})",
                    item.sku, item.name, item.quantity, item.reorder_point
                );
            }
        }
        println!();
    }

    fn print_json(&self, catalog: &Catalog) -> anyhow::Result<()> {
        let data = ReportData {
            item_count: catalog.item_count(),
            total_inventory_value: catalog.total_inventory_value(),
            low_stock: catalog
                .low_stock_items()
                .into_iter()
                .map(|item| LowStockRow {
                    sku: item.sku.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    reorder_point: item.reorder_point,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}
