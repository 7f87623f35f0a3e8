//! Sell command - record a sale with optional commission

use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::cmd::{load_catalog, save_catalog};
use crate::core::SaleTerms;

#[derive(Args, Debug)]
pub struct SellCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// SKU (trimmed and upper-cased)
    sku: String,

    /// Quantity sold
    #[arg(short, long)]
    qty: i64,

    /// Sale price per unit; defaults to the item's unit cost
    #[arg(short, long)]
    price: Option<Decimal>,

    /// Customer name
    #[arg(long, default_value = "")]
    customer: String,

    /// Salesperson credited with the sale
    #[arg(long, default_value = "")]
    salesperson: String,

    /// Commission rate in percent (5.0 = 5%)
    #[arg(long, default_value = "0")]
    commission_rate: Decimal,

    /// Actor recorded in the audit trail
    #[arg(long, default_value = "cli")]
    actor: String,
}

impl SellCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut catalog = load_catalog(&self.file)?;
        let terms = SaleTerms {
            customer: self.customer.clone(),
            salesperson: self.salesperson.clone(),
            commission_rate: self.commission_rate,
        };
        let record = catalog.record_sale(
            &self.actor,
            &self.sku,
            self.qty,
            self.price,
            &terms,
            Utc::now(),
        )?;
        save_catalog(&self.file, &catalog)?;

        println!(
            "Sold {} x {} at {:.2} each",
            record.quantity, record.sku, record.sale_price
        );
        println!(
            "Profit: {:.2} | Commission: {:.2}",
            record.profit, record.commission_amount
        );
        if let Some(item) = catalog.get(&record.sku) {
            println!("Remaining on hand: {}", item.quantity);
        }
        Ok(())
    }
}
