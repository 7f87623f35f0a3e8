//! Sales command - sale history, totals and commissions over a window

use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cmd::load_catalog;
use crate::core::{SaleRecord, SalesSummary};

#[derive(Args, Debug)]
pub struct SalesCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// Window in days
    #[arg(short, long, default_value_t = 30)]
    days: i64,

    /// Group commission totals by salesperson
    #[arg(long)]
    by_salesperson: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Sales data for JSON output
#[derive(Debug, Serialize)]
struct SalesData<'a> {
    window_days: i64,
    summary: SalesSummary,
    sales: Vec<&'a SaleRecord>,
}

#[derive(Debug, Clone, Tabled)]
struct SaleRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Qty")]
    qty: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Salesperson")]
    salesperson: String,
    #[tabled(rename = "Commission")]
    commission: String,
}

#[derive(Debug, Clone, Tabled)]
struct CommissionRow {
    #[tabled(rename = "Salesperson")]
    salesperson: String,
    #[tabled(rename = "Sales")]
    sales: usize,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Commission")]
    commission: String,
}

impl SalesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = load_catalog(&self.file)?;
        let now = Utc::now();
        let mut sales = catalog.sales_within(self.days, now);
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let summary = catalog.sales_analytics(self.days, now);

        if self.json {
            let data = SalesData {
                window_days: self.days,
                summary,
                sales,
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            return Ok(());
        }

        println!();
        println!("SALES (last {} days)", self.days);
        println!();

        if sales.is_empty() {
            println!("No sales in this window");
            return Ok(());
        }

        if self.by_salesperson {
            self.print_by_salesperson(&sales);
        } else {
            self.print_history(&sales);
        }

        println!();
        println!(
            "Revenue: {} | Profit: {} | Commission: {} | Margin: {}%",
            format_money(summary.total_revenue),
            format_money(summary.total_profit),
            format_money(summary.total_commission),
            summary.profit_margin_pct
        );
        println!();
        Ok(())
    }

    fn print_history(&self, sales: &[&SaleRecord]) {
        let rows: Vec<SaleRow> = sales
            .iter()
            .map(|s| SaleRow {
                date: s.timestamp.format("%Y-%m-%d").to_string(),
                sku: s.sku.clone(),
                qty: s.quantity.to_string(),
                price: format_money(s.sale_price),
                revenue: format_money(s.revenue()),
                profit: format_money(s.profit),
                customer: s.customer.clone(),
                salesperson: s.salesperson.clone(),
                commission: format_money(s.commission_amount),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn print_by_salesperson(&self, sales: &[&SaleRecord]) {
        let mut totals: BTreeMap<String, (usize, Decimal, Decimal)> = BTreeMap::new();
        for sale in sales {
            let name = if sale.salesperson.is_empty() {
                "(unassigned)".to_string()
            } else {
                sale.salesperson.clone()
            };
            let entry = totals.entry(name).or_default();
            entry.0 += 1;
            entry.1 += sale.revenue();
            entry.2 += sale.commission_amount;
        }

        let rows: Vec<CommissionRow> = totals
            .into_iter()
            .map(|(salesperson, (count, revenue, commission))| CommissionRow {
                salesperson,
                sales: count,
                revenue: format_money(revenue),
                commission: format_money(commission),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}

fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
