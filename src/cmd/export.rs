//! Export command - write the item catalog as CSV

use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cmd::load_catalog;
use crate::core::ItemEntry;

#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// Output CSV file (stdout with "-")
    #[arg(default_value = "-")]
    output: PathBuf,
}

/// CSV row for item import/export.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemRecord {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_cost: Decimal,
    #[serde(default)]
    pub total_cost: Decimal,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_reorder_point")]
    pub reorder_point: i64,
    #[serde(default)]
    pub barcode: String,
}

fn default_reorder_point() -> i64 {
    5
}

impl ItemRecord {
    pub fn from_entry(item: &ItemEntry) -> Self {
        ItemRecord {
            sku: item.sku.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            unit_cost: item.unit_cost,
            total_cost: item.total_cost,
            supplier: item.supplier.clone(),
            location: item.location.clone(),
            reorder_point: item.reorder_point,
            barcode: item.barcode.clone(),
        }
    }
}

impl ExportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = load_catalog(&self.file)?;

        if self.output.as_os_str() == "-" {
            self.write_csv(&catalog, io::stdout().lock())?;
        } else {
            let out = std::fs::File::create(&self.output)?;
            self.write_csv(&catalog, out)?;
            println!(
                "Exported {} items to {}",
                catalog.item_count(),
                self.output.display()
            );
        }
        Ok(())
    }

    fn write_csv<W: Write>(&self, catalog: &crate::core::Catalog, writer: W) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for item in catalog.items() {
            wtr.serialize(ItemRecord::from_entry(item))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
