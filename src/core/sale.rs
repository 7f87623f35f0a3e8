use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::item::Rounding;

/// One completed sale. Append-only: records are created exactly once by
/// `Catalog::record_sale` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SaleRecord {
    pub id: u64,
    pub sku: String,
    pub quantity: i64,
    #[schemars(with = "f64")]
    pub sale_price: Decimal,
    #[schemars(with = "f64")]
    pub profit: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub salesperson: String,
    /// Commission rate in percent (5.0 = 5%)
    #[serde(default)]
    #[schemars(with = "f64")]
    pub commission_rate: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub commission_amount: Decimal,
}

impl SaleRecord {
    pub fn revenue(&self) -> Decimal {
        self.sale_price * Decimal::from(self.quantity)
    }
}

/// Commission accrued on a sale: `qty * price * rate / 100`.
pub fn commission(qty: i64, sale_price: Decimal, rate_pct: Decimal, rounding: Rounding) -> Decimal {
    rounding.cost(Decimal::from(qty) * sale_price * rate_pct / dec!(100))
}

/// Aggregate view over a set of sale records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub sale_count: usize,
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub total_commission: Decimal,
    /// Profit as a percentage of revenue; defined as 0 when revenue is 0
    pub profit_margin_pct: Decimal,
}

/// Fold sale records into revenue/profit/commission totals.
pub fn summarize<'a>(sales: impl IntoIterator<Item = &'a SaleRecord>) -> SalesSummary {
    let mut count = 0usize;
    let mut revenue = Decimal::ZERO;
    let mut profit = Decimal::ZERO;
    let mut commission = Decimal::ZERO;

    for sale in sales {
        count += 1;
        revenue += sale.revenue();
        profit += sale.profit;
        commission += sale.commission_amount;
    }

    let margin = if revenue.is_zero() {
        Decimal::ZERO
    } else {
        (profit / revenue * dec!(100)).round_dp(2)
    };

    SalesSummary {
        sale_count: count,
        total_revenue: revenue.round_dp(2),
        total_profit: profit.round_dp(2),
        total_commission: commission.round_dp(2),
        profit_margin_pct: margin,
    }
}
