//! HTML report generation for the inventory and sales data
//!
//! Generates a self-contained HTML file with embedded CSS.

use chrono::Utc;
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::cmd::load_catalog;
use crate::core::{Catalog, SalesSummary};

#[derive(Args, Debug)]
pub struct HtmlCommand {
    /// Inventory file
    #[arg(short, long, default_value = "stocktake.json")]
    file: PathBuf,

    /// Sales window in days
    #[arg(short, long, default_value_t = 30)]
    days: i64,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl HtmlCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = load_catalog(&self.file)?;
        let summary = catalog.sales_analytics(self.days, Utc::now());
        let html = generate(&catalog, &summary, self.days);

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &html)?;
            println!("HTML report written to: {}", output_path.display());
        } else {
            // Write to temp file and open in browser
            let temp_path = std::env::temp_dir().join("stocktake-report.html");
            std::fs::write(&temp_path, &html)?;
            opener::open(&temp_path)?;
            println!("Opened HTML report in browser: {}", temp_path.display());
        }
        Ok(())
    }
}

/// Generate HTML report content
pub fn generate(catalog: &Catalog, summary: &SalesSummary, window_days: i64) -> String {
    let mut item_rows = String::new();
    for item in catalog.items() {
        let low = if item.is_low_stock() {
            r#" class="low""#
        } else {
            ""
        };
        let _ = write!(
            item_rows,
            "<tr{low}><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td>\
             <td class=\"num\">{:.4}</td><td class=\"num\">{:.2}</td><td>{}</td></tr>",
            escape(&item.sku),
            escape(&item.name),
            escape(&item.category),
            item.quantity,
            item.unit_cost,
            item.total_cost,
            escape(&item.location),
        );
    }

    let low_stock = catalog.low_stock_items();
    let low_stock_note = if low_stock.is_empty() {
        "All items have sufficient stock".to_string()
    } else {
        format!("{} item(s) at or below their reorder point", low_stock.len())
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Inventory Report</title>
<style>
body {{ font-family: sans-serif; margin: 2em; color: #222; }}
h1 {{ border-bottom: 2px solid #444; padding-bottom: 0.2em; }}
table {{ border-collapse: collapse; margin: 1em 0; }}
th, td {{ border: 1px solid #bbb; padding: 0.35em 0.7em; }}
th {{ background: #eee; text-align: left; }}
td.num {{ text-align: right; }}
tr.low td {{ background: #fff3cd; }}
.summary {{ margin: 1em 0; }}
.summary span {{ margin-right: 2em; }}
</style>
</head>
<body>
<h1>Inventory Report</h1>
<p>Generated {generated}</p>
<table>
<tr><th>SKU</th><th>Name</th><th>Category</th><th>Qty</th><th>Unit Cost</th><th>Cost Basis</th><th>Location</th></tr>
{item_rows}
</table>
<p><strong>Total inventory value: {total_value:.2}</strong> &mdash; {low_stock_note}</p>
<h1>Sales (last {window_days} days)</h1>
<div class="summary">
<span>Sales: {sale_count}</span>
<span>Revenue: {revenue:.2}</span>
<span>Profit: {profit:.2}</span>
<span>Commission: {commission:.2}</span>
<span>Margin: {margin}%</span>
</div>
</body>
</html>
"##,
        generated = Utc::now().format("%Y-%m-%d %H:%M UTC"),
        item_rows = item_rows,
        total_value = catalog.total_inventory_value(),
        low_stock_note = low_stock_note,
        window_days = window_days,
        sale_count = summary.sale_count,
        revenue = summary.total_revenue,
        profit = summary.total_profit,
        commission = summary.total_commission,
        margin = summary.profit_margin_pct,
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ItemDetails, SaleTerms};
    use rust_decimal_macros::dec;

    #[test]
    fn report_contains_items_and_totals() {
        let mut catalog = Catalog::new();
        let details = ItemDetails {
            name: Some("Widget <XL>".to_string()),
            ..ItemDetails::default()
        };
        catalog
            .record_purchase("tester", "x1", 10, dec!(2.00), &details, Utc::now())
            .unwrap();
        catalog
            .record_sale("tester", "x1", 2, Some(dec!(3.00)), &SaleTerms::default(), Utc::now())
            .unwrap();

        let summary = catalog.sales_analytics(30, Utc::now());
        let html = generate(&catalog, &summary, 30);

        assert!(html.contains("X1"));
        assert!(html.contains("Widget &lt;XL&gt;"));
        assert!(html.contains("Total inventory value: 16.00"));
        assert!(html.contains("Revenue: 6.00"));
    }

    #[test]
    fn margin_is_zero_without_revenue() {
        let catalog = Catalog::new();
        let summary = catalog.sales_analytics(30, Utc::now());
        let html = generate(&catalog, &summary, 30);
        assert!(html.contains("Margin: 0%"));
    }
}
