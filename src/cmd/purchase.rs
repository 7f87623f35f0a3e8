//! Purchase command - record purchased stock for a SKU

use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::cmd::{load_catalog, save_catalog};
use crate::core::ItemDetails;

#[derive(Args, Debug)]
pub struct PurchaseCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// SKU (trimmed and upper-cased)
    sku: String,

    /// Quantity purchased
    #[arg(short, long)]
    qty: i64,

    /// Purchase price per unit
    #[arg(short, long)]
    price: Decimal,

    /// Item name / description
    #[arg(short, long)]
    name: Option<String>,

    /// Category
    #[arg(long)]
    category: Option<String>,

    /// Supplier name
    #[arg(long)]
    supplier: Option<String>,

    /// Storage location
    #[arg(long)]
    location: Option<String>,

    /// Low-stock threshold for this item
    #[arg(long)]
    reorder_point: Option<i64>,

    /// Actor recorded in the audit trail
    #[arg(long, default_value = "cli")]
    actor: String,
}

impl PurchaseCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut catalog = load_catalog(&self.file)?;
        let details = ItemDetails {
            name: self.name.clone(),
            category: self.category.clone(),
            supplier: self.supplier.clone(),
            location: self.location.clone(),
            reorder_point: self.reorder_point,
        };
        let item = catalog.record_purchase(
            &self.actor,
            &self.sku,
            self.qty,
            self.price,
            &details,
            Utc::now(),
        )?;
        save_catalog(&self.file, &catalog)?;

        println!(
            "Added {} x {} (SKU {}) at {:.2} each",
            self.qty, item.name, item.sku, self.price
        );
        println!(
            "On hand: {} | Unit cost: {:.4} | Cost basis: {:.2}",
            item.quantity, item.unit_cost, item.total_cost
        );
        Ok(())
    }
}
