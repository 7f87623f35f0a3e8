use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::LedgerError;

/// Rounding policy applied to ledger arithmetic.
///
/// Unit costs carry more precision than cost totals so that the weighted
/// average survives many small restocks. Both use round-half-to-even.
/// Rounding happens at every step rather than being deferred, which keeps
/// each mutation auditable at the cost of bounded drift in `total_cost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rounding {
    /// Decimal places kept on the weighted-average unit cost.
    pub unit_cost_dp: u32,
    /// Decimal places kept on cost totals and profits.
    pub cost_dp: u32,
}

impl Default for Rounding {
    fn default() -> Self {
        Rounding {
            unit_cost_dp: 4,
            cost_dp: 2,
        }
    }
}

impl Rounding {
    pub fn unit_cost(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.unit_cost_dp, RoundingStrategy::MidpointNearestEven)
    }

    pub fn cost(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.cost_dp, RoundingStrategy::MidpointNearestEven)
    }
}

/// Normalize a raw SKU: trimmed and upper-cased.
///
/// Every path that accepts SKU input must apply this, or lookups will
/// silently miss.
pub fn normalize_sku(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Deterministic secondary identifier derived from the SKU.
pub fn derive_barcode(sku: &str) -> String {
    let digest = Sha256::digest(sku.as_bytes());
    format!("BC{}", hex::encode_upper(&digest[..4]))
}

/// One SKU's ledger line: units on hand, weighted-average unit cost and the
/// cumulative cost basis of the stock.
///
/// `total_cost` is maintained incrementally rather than recomputed from
/// `quantity * unit_cost`, so the two can drift apart by rounding residue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItemEntry {
    /// Stock Keeping Unit, unique and immutable once created
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: String,
    /// Secondary identifier, matched by searches alongside SKU and name
    #[serde(default)]
    pub barcode: String,
    pub quantity: i64,
    /// Weighted-average purchase cost per unit
    #[schemars(with = "f64")]
    pub unit_cost: Decimal,
    /// Cost basis of the units currently on hand
    #[schemars(with = "f64")]
    pub total_cost: Decimal,
    /// On-hand quantity at or below which the entry counts as low stock
    pub reorder_point: i64,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Check purchase arguments without touching any state.
///
/// Split out so the catalog can validate before it creates an entry for a
/// brand-new SKU: a rejected purchase must not leave an empty entry behind.
pub fn validate_purchase(qty: i64, price_per_unit: Decimal) -> Result<(), LedgerError> {
    if qty <= 0 {
        return Err(LedgerError::InvalidQuantity(qty));
    }
    if price_per_unit < Decimal::ZERO {
        return Err(LedgerError::InvalidPrice(price_per_unit));
    }
    Ok(())
}

impl ItemEntry {
    /// Fresh entry with zeroed stock and costs. Metadata is filled in by the
    /// catalog afterwards.
    pub fn new(sku: String, reorder_point: i64, now: DateTime<Utc>) -> Self {
        let barcode = derive_barcode(&sku);
        ItemEntry {
            sku,
            name: String::new(),
            category: String::new(),
            supplier: String::new(),
            location: String::new(),
            barcode,
            quantity: 0,
            unit_cost: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            reorder_point,
            created: now,
            last_updated: now,
        }
    }

    /// Record a purchase: quantity grows and the unit cost becomes the
    /// quantity-weighted mean of the old cost and the new price.
    pub fn purchase(
        &mut self,
        qty: i64,
        price_per_unit: Decimal,
        rounding: Rounding,
    ) -> Result<(), LedgerError> {
        validate_purchase(qty, price_per_unit)?;

        let new_qty = self.quantity + qty;
        let new_unit_cost = if new_qty == 0 {
            // unreachable given qty > 0; guards the division below
            Decimal::ZERO
        } else {
            (self.unit_cost * Decimal::from(self.quantity)
                + price_per_unit * Decimal::from(qty))
                / Decimal::from(new_qty)
        };

        self.quantity = new_qty;
        self.unit_cost = rounding.unit_cost(new_unit_cost);
        self.total_cost = rounding.cost(self.total_cost + price_per_unit * Decimal::from(qty));
        Ok(())
    }

    /// Record a sale of `qty` units and return the realized profit.
    ///
    /// The cost relieved from the basis is the current average cost per unit;
    /// `unit_cost` itself is unchanged, since selling at cost does not move
    /// the average of the remaining stock. When no override is given the sale
    /// is priced at `unit_cost`.
    pub fn sell(
        &mut self,
        qty: i64,
        sale_price: Option<Decimal>,
        rounding: Rounding,
    ) -> Result<Decimal, LedgerError> {
        if qty <= 0 {
            return Err(LedgerError::InvalidQuantity(qty));
        }
        if qty > self.quantity {
            return Err(LedgerError::InsufficientStock {
                sku: self.sku.clone(),
                requested: qty,
                on_hand: self.quantity,
            });
        }

        let cost_per_unit = self.cost_per_unit();
        let effective_price = sale_price.unwrap_or(self.unit_cost);

        self.quantity -= qty;
        // Clamp: per-step rounding can leave a small negative residue once
        // the last units go out.
        let relieved = self.total_cost - cost_per_unit * Decimal::from(qty);
        self.total_cost = rounding.cost(relieved).max(Decimal::ZERO);

        Ok(rounding.cost((effective_price - cost_per_unit) * Decimal::from(qty)))
    }

    /// Average cost of one unit on hand, derived from the cost basis.
    pub fn cost_per_unit(&self) -> Decimal {
        if self.quantity > 0 {
            self.total_cost / Decimal::from(self.quantity)
        } else {
            Decimal::ZERO
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_point
    }

    /// Quantity proposed when restocking a low-stock entry.
    pub fn suggested_order_qty(&self) -> i64 {
        (self.reorder_point * 2).max(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(sku: &str) -> ItemEntry {
        ItemEntry::new(normalize_sku(sku), 5, Utc::now())
    }

    #[test]
    fn purchase_establishes_weighted_average() {
        let mut item = entry("x1");
        item.purchase(10, dec!(2.00), Rounding::default()).unwrap();
        assert_eq!(item.quantity, 10);
        assert_eq!(item.unit_cost, dec!(2.00));
        assert_eq!(item.total_cost, dec!(20.00));

        item.purchase(10, dec!(4.00), Rounding::default()).unwrap();
        assert_eq!(item.quantity, 20);
        assert_eq!(item.unit_cost, dec!(3.00));
        assert_eq!(item.total_cost, dec!(60.00));
    }

    #[test]
    fn average_stays_between_old_cost_and_new_price() {
        let mut item = entry("x1");
        item.purchase(7, dec!(1.50), Rounding::default()).unwrap();
        item.purchase(3, dec!(9.99), Rounding::default()).unwrap();
        assert!(item.unit_cost >= dec!(1.50));
        assert!(item.unit_cost <= dec!(9.99));
    }

    #[test]
    fn unit_cost_rounds_half_to_even() {
        let mut item = entry("x1");
        item.purchase(1, dec!(2.0000), Rounding::default()).unwrap();
        // (2.0000 + 2.0001) / 2 = 2.00005, which rounds down to the even digit
        item.purchase(1, dec!(2.0001), Rounding::default()).unwrap();
        assert_eq!(item.unit_cost, dec!(2.0000));
    }

    #[test]
    fn sell_realizes_profit_against_average_cost() {
        let mut item = entry("x1");
        item.purchase(10, dec!(2.00), Rounding::default()).unwrap();
        item.purchase(10, dec!(4.00), Rounding::default()).unwrap();

        let profit = item.sell(5, Some(dec!(5.00)), Rounding::default()).unwrap();
        assert_eq!(profit, dec!(10.00));
        assert_eq!(item.quantity, 15);
        assert_eq!(item.total_cost, dec!(45.00));
        // the average cost of the remaining stock is untouched
        assert_eq!(item.unit_cost, dec!(3.00));
    }

    #[test]
    fn sell_without_override_prices_at_unit_cost() {
        let mut item = entry("x1");
        item.purchase(4, dec!(2.50), Rounding::default()).unwrap();
        let profit = item.sell(2, None, Rounding::default()).unwrap();
        assert_eq!(profit, dec!(0.00));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn overselling_fails_and_leaves_state_unchanged() {
        let mut item = entry("x1");
        item.purchase(10, dec!(2.00), Rounding::default()).unwrap();
        item.purchase(10, dec!(4.00), Rounding::default()).unwrap();
        item.sell(5, Some(dec!(5.00)), Rounding::default()).unwrap();

        let before = item.clone();
        let err = item.sell(100, None, Rounding::default()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientStock {
                sku: "X1".to_string(),
                requested: 100,
                on_hand: 15,
            }
        );
        assert_eq!(item, before);
    }

    #[test]
    fn zero_quantity_purchase_rejected() {
        let mut item = entry("x1");
        let err = item.purchase(0, dec!(1.00), Rounding::default()).unwrap_err();
        assert_eq!(err, LedgerError::InvalidQuantity(0));
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn negative_price_rejected() {
        let mut item = entry("x1");
        let err = item
            .purchase(1, dec!(-0.01), Rounding::default())
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidPrice(dec!(-0.01)));
    }

    #[test]
    fn selling_out_clears_cost_basis() {
        let mut item = entry("x1");
        item.purchase(3, dec!(0.10), Rounding::default()).unwrap();
        item.sell(3, None, Rounding::default()).unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(item.total_cost, dec!(0.00));
    }

    #[test]
    fn total_cost_never_negative_under_repeated_partial_sales() {
        let mut item = entry("x1");
        item.purchase(7, dec!(0.13), Rounding::default()).unwrap();
        for _ in 0..7 {
            item.sell(1, None, Rounding::default()).unwrap();
            assert!(item.total_cost >= Decimal::ZERO);
        }
        assert_eq!(item.quantity, 0);
    }

    #[test]
    fn quantity_tracks_purchases_minus_sales_exactly() {
        let mut item = entry("x1");
        item.purchase(100, dec!(1.37), Rounding::default()).unwrap();
        item.sell(33, None, Rounding::default()).unwrap();
        item.purchase(8, dec!(2.11), Rounding::default()).unwrap();
        item.sell(50, None, Rounding::default()).unwrap();
        assert_eq!(item.quantity, 100 - 33 + 8 - 50);
    }

    #[test]
    fn sku_normalization() {
        assert_eq!(normalize_sku("  ab-12 "), "AB-12");
        assert_eq!(normalize_sku("ab-12"), normalize_sku("AB-12"));
    }

    #[test]
    fn barcode_is_deterministic() {
        assert_eq!(derive_barcode("X1"), derive_barcode("X1"));
        assert_ne!(derive_barcode("X1"), derive_barcode("X2"));
        assert!(derive_barcode("X1").starts_with("BC"));
    }

    #[test]
    fn reorder_suggestion_has_a_floor() {
        let mut item = entry("x1");
        item.reorder_point = 2;
        assert_eq!(item.suggested_order_qty(), 10);
        item.reorder_point = 8;
        assert_eq!(item.suggested_order_qty(), 16);
    }
}
