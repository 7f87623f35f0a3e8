use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::audit::{display_action, AuditAction, AuditEntry};
use super::error::LedgerError;
use super::item::{derive_barcode, normalize_sku, validate_purchase, ItemEntry, Rounding};
use super::sale::{self, SaleRecord, SalesSummary};
use super::supplier::{supplier_key, Supplier};

/// Per-catalog configuration. There is deliberately no process-wide state:
/// two catalogs can run different policies side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogConfig {
    pub rounding: Rounding,
    /// Reorder point assigned to entries created without an explicit one
    pub default_reorder_point: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            rounding: Rounding::default(),
            default_reorder_point: 5,
        }
    }
}

/// Descriptive fields supplied alongside a purchase. `None` (or an empty
/// string) leaves the stored value alone; anything else wins.
#[derive(Debug, Clone, Default)]
pub struct ItemDetails {
    pub name: Option<String>,
    pub category: Option<String>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub reorder_point: Option<i64>,
}

/// Counterparty fields for a sale.
#[derive(Debug, Clone, Default)]
pub struct SaleTerms {
    pub customer: String,
    pub salesperson: String,
    /// Commission rate in percent (5.0 = 5%)
    pub commission_rate: Decimal,
}

/// A low-stock entry together with the order quantity proposed for it.
#[derive(Debug, Clone, Copy)]
pub struct ReorderSuggestion<'a> {
    pub entry: &'a ItemEntry,
    pub order_qty: i64,
}

/// The in-memory catalog: SKU-keyed ledger entries, the append-only sale
/// log, the supplier registry and the audit trail.
///
/// All operations are synchronous state transitions. Validation happens
/// before any field is touched, so a returned error means nothing changed.
/// When embedded in a concurrent host, wrap the whole catalog in a single
/// lock: `record_sale` is a read-modify-write across the entry map and the
/// sale log and must not interleave with other mutations.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    config: CatalogConfig,
    items: BTreeMap<String, ItemEntry>,
    sales: Vec<SaleRecord>,
    suppliers: BTreeMap<String, Supplier>,
    audit: Vec<AuditEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Catalog {
            config,
            ..Catalog::default()
        }
    }

    /// Rebuild a catalog from previously persisted records.
    pub fn from_parts(
        config: CatalogConfig,
        items: Vec<ItemEntry>,
        sales: Vec<SaleRecord>,
        suppliers: Vec<Supplier>,
        audit: Vec<AuditEntry>,
    ) -> Self {
        Catalog {
            config,
            items: items
                .into_iter()
                .map(|item| (normalize_sku(&item.sku), item))
                .collect(),
            sales,
            suppliers: suppliers.into_iter().map(|s| (s.key(), s)).collect(),
            audit,
        }
    }

    pub fn config(&self) -> CatalogConfig {
        self.config
    }

    /// Entries in SKU order.
    pub fn items(&self) -> impl Iterator<Item = &ItemEntry> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, sku_raw: &str) -> Option<&ItemEntry> {
        self.items.get(&normalize_sku(sku_raw))
    }

    /// Record a purchase, creating the ledger entry on first sight of the
    /// SKU. Metadata is last-write-wins for non-empty values. Emits a
    /// price-change audit entry whenever the weighted average moves.
    pub fn record_purchase(
        &mut self,
        actor: &str,
        sku_raw: &str,
        qty: i64,
        price_per_unit: Decimal,
        details: &ItemDetails,
        now: DateTime<Utc>,
    ) -> Result<ItemEntry, LedgerError> {
        // Validate before the entry exists: a rejected purchase of a new SKU
        // must not leave an empty entry behind.
        validate_purchase(qty, price_per_unit)?;

        let sku = normalize_sku(sku_raw);
        let rounding = self.config.rounding;
        let default_reorder_point = self.config.default_reorder_point;
        let entry = self.items.entry(sku.clone()).or_insert_with(|| {
            let mut fresh = ItemEntry::new(sku.clone(), default_reorder_point, now);
            fresh.name = "Unnamed".to_string();
            fresh.category = "General".to_string();
            fresh.location = "Main Warehouse".to_string();
            fresh
        });

        apply_details(entry, details);
        let old_cost = entry.unit_cost;
        entry.purchase(qty, price_per_unit, rounding)?;
        entry.last_updated = now;
        let new_cost = entry.unit_cost;
        let updated = entry.clone();

        if old_cost != new_cost {
            self.record_audit(
                actor,
                AuditAction::PriceChange,
                format!("{sku} unit cost {old_cost} -> {new_cost}"),
                now,
            );
        }
        self.record_audit(
            actor,
            AuditAction::Purchase,
            format!("added {qty} units of {sku} at {price_per_unit} each"),
            now,
        );
        Ok(updated)
    }

    /// Record a sale against an existing entry and append the sale record.
    /// Returns the record, which carries the realized profit and the
    /// commission accrued to the salesperson.
    pub fn record_sale(
        &mut self,
        actor: &str,
        sku_raw: &str,
        qty: i64,
        sale_price: Option<Decimal>,
        terms: &SaleTerms,
        now: DateTime<Utc>,
    ) -> Result<SaleRecord, LedgerError> {
        let sku = normalize_sku(sku_raw);
        let rounding = self.config.rounding;
        let entry = self
            .items
            .get_mut(&sku)
            .ok_or_else(|| LedgerError::ItemNotFound(sku.clone()))?;

        let effective_price = sale_price.unwrap_or(entry.unit_cost);
        let profit = entry.sell(qty, sale_price, rounding)?;
        entry.last_updated = now;

        let commission_amount =
            sale::commission(qty, effective_price, terms.commission_rate, rounding);
        let record = SaleRecord {
            id: self.sales.len() as u64 + 1,
            sku: sku.clone(),
            quantity: qty,
            sale_price: effective_price,
            profit,
            timestamp: now,
            customer: terms.customer.clone(),
            salesperson: terms.salesperson.clone(),
            commission_rate: terms.commission_rate,
            commission_amount,
        };
        self.sales.push(record.clone());
        self.record_audit(
            actor,
            AuditAction::Sale,
            format!("sold {qty} units of {sku} at {effective_price} each; commission {commission_amount}"),
            now,
        );
        Ok(record)
    }

    /// Remove an entry and all its state. Returns the removed entry, or
    /// `None` for an unknown SKU; absence is not an error here, callers
    /// decide whether to care.
    pub fn remove_item(
        &mut self,
        actor: &str,
        sku_raw: &str,
        now: DateTime<Utc>,
    ) -> Option<ItemEntry> {
        let sku = normalize_sku(sku_raw);
        let removed = self.items.remove(&sku);
        if removed.is_some() {
            self.record_audit(actor, AuditAction::Remove, format!("removed item {sku}"), now);
        }
        removed
    }

    /// Upsert an entry imported from an external file, bypassing purchase
    /// arithmetic (quantities and costs are taken as given).
    pub fn import_item(&mut self, actor: &str, mut entry: ItemEntry, now: DateTime<Utc>) -> String {
        entry.sku = normalize_sku(&entry.sku);
        if entry.barcode.is_empty() {
            entry.barcode = derive_barcode(&entry.sku);
        }
        entry.last_updated = now;
        let sku = entry.sku.clone();
        self.items.insert(sku.clone(), entry);
        self.record_audit(actor, AuditAction::Import, format!("imported item {sku}"), now);
        sku
    }

    /// Entries matching a case-insensitive substring of SKU, name or
    /// barcode, further narrowed by exact category/location when given.
    /// An empty query matches everything.
    pub fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Vec<&ItemEntry> {
        let needle = query.unwrap_or("").trim().to_lowercase();
        self.items
            .values()
            .filter(|item| {
                let text = needle.is_empty()
                    || item.sku.to_lowercase().contains(&needle)
                    || item.name.to_lowercase().contains(&needle)
                    || item.barcode.to_lowercase().contains(&needle);
                text && category.is_none_or(|c| item.category == c)
                    && location.is_none_or(|l| item.location == l)
            })
            .collect()
    }

    pub fn low_stock_items(&self) -> Vec<&ItemEntry> {
        self.items.values().filter(|i| i.is_low_stock()).collect()
    }

    pub fn reorder_suggestions(&self) -> Vec<ReorderSuggestion<'_>> {
        self.items
            .values()
            .filter(|i| i.is_low_stock())
            .map(|entry| ReorderSuggestion {
                entry,
                order_qty: entry.suggested_order_qty(),
            })
            .collect()
    }

    /// Sum of cost basis across all entries.
    pub fn total_inventory_value(&self) -> Decimal {
        self.config
            .rounding
            .cost(self.items.values().map(|i| i.total_cost).sum())
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// Sale records no older than `window_days` before `now`.
    pub fn sales_within(&self, window_days: i64, now: DateTime<Utc>) -> Vec<&SaleRecord> {
        let cutoff = now - Duration::days(window_days);
        self.sales.iter().filter(|s| s.timestamp >= cutoff).collect()
    }

    pub fn sales_analytics(&self, window_days: i64, now: DateTime<Utc>) -> SalesSummary {
        sale::summarize(self.sales_within(window_days, now))
    }

    /// Register a supplier. Names are unique (trimmed, case-insensitive).
    pub fn add_supplier(&mut self, supplier: Supplier) -> Result<(), LedgerError> {
        let key = supplier.key();
        if self.suppliers.contains_key(&key) {
            return Err(LedgerError::DuplicateSupplier(supplier.name));
        }
        self.suppliers.insert(key, supplier);
        Ok(())
    }

    pub fn remove_supplier(&mut self, name: &str) -> Option<Supplier> {
        self.suppliers.remove(&supplier_key(name))
    }

    pub fn suppliers(&self) -> impl Iterator<Item = &Supplier> {
        self.suppliers.values()
    }

    pub fn audit(&self) -> &[AuditEntry] {
        &self.audit
    }

    fn record_audit(&mut self, actor: &str, action: AuditAction, details: String, now: DateTime<Utc>) {
        log::debug!("audit {} [{}]: {}", display_action(action), actor, details);
        self.audit.push(AuditEntry {
            timestamp: now,
            actor: actor.to_string(),
            action,
            details,
        });
    }
}

fn apply_details(entry: &mut ItemEntry, details: &ItemDetails) {
    if let Some(name) = non_empty(&details.name) {
        entry.name = name;
    }
    if let Some(category) = non_empty(&details.category) {
        entry.category = category;
    }
    if let Some(supplier) = non_empty(&details.supplier) {
        entry.supplier = supplier;
    }
    if let Some(location) = non_empty(&details.location) {
        entry.location = location;
    }
    if let Some(reorder_point) = details.reorder_point {
        entry.reorder_point = reorder_point;
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ts(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn now() -> DateTime<Utc> {
        ts("2026-08-01T12:00:00+00:00")
    }

    fn named(name: &str) -> ItemDetails {
        ItemDetails {
            name: Some(name.to_string()),
            ..ItemDetails::default()
        }
    }

    fn seeded() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .record_purchase("tester", "x1", 10, dec!(2.00), &named("Widget"), now())
            .unwrap();
        catalog
            .record_purchase("tester", "x1", 10, dec!(4.00), &ItemDetails::default(), now())
            .unwrap();
        catalog
    }

    #[test]
    fn purchase_creates_entry_with_normalized_sku() {
        let catalog = seeded();
        let item = catalog.get("  x1 ").unwrap();
        assert_eq!(item.sku, "X1");
        assert_eq!(item.name, "Widget");
        assert_eq!(item.quantity, 20);
        assert_eq!(item.unit_cost, dec!(3.00));
        assert_eq!(item.total_cost, dec!(60.00));
    }

    #[test]
    fn invalid_purchase_creates_no_entry() {
        let mut catalog = Catalog::new();
        let err = catalog
            .record_purchase("tester", "new-sku", 0, dec!(1.00), &named("Nope"), now())
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidQuantity(0));
        assert!(catalog.get("new-sku").is_none());
        assert!(catalog.audit().is_empty());
    }

    #[test]
    fn metadata_is_last_write_wins_for_non_empty_values() {
        let mut catalog = seeded();
        let details = ItemDetails {
            name: Some("Widget Mk2".to_string()),
            category: Some("Tools".to_string()),
            // empty strings do not clobber
            location: Some("".to_string()),
            ..ItemDetails::default()
        };
        catalog
            .record_purchase("tester", "X1", 1, dec!(3.00), &details, now())
            .unwrap();
        let item = catalog.get("X1").unwrap();
        assert_eq!(item.name, "Widget Mk2");
        assert_eq!(item.category, "Tools");
        assert_eq!(item.location, "Main Warehouse");
    }

    #[test]
    fn sale_returns_profit_and_commission() {
        let mut catalog = seeded();
        let terms = SaleTerms {
            customer: "ACME".to_string(),
            salesperson: "Jo".to_string(),
            commission_rate: dec!(5.0),
        };
        let record = catalog
            .record_sale("tester", "x1", 5, Some(dec!(5.00)), &terms, now())
            .unwrap();
        assert_eq!(record.profit, dec!(10.00));
        // 5 * 5.00 = 25.00 revenue, 5% commission
        assert_eq!(record.commission_amount, dec!(1.25));
        assert_eq!(record.sale_price, dec!(5.00));
        assert_eq!(record.salesperson, "Jo");

        let item = catalog.get("X1").unwrap();
        assert_eq!(item.quantity, 15);
        assert_eq!(item.total_cost, dec!(45.00));
    }

    #[test]
    fn commission_on_a_round_hundred() {
        let mut catalog = Catalog::new();
        catalog
            .record_purchase("tester", "c1", 50, dec!(1.00), &named("Cog"), now())
            .unwrap();
        let terms = SaleTerms {
            commission_rate: dec!(5),
            ..SaleTerms::default()
        };
        // 20 * 5.00 = 100.00 total sale
        let record = catalog
            .record_sale("tester", "c1", 20, Some(dec!(5.00)), &terms, now())
            .unwrap();
        assert_eq!(record.commission_amount, dec!(5.00));
    }

    #[test]
    fn sale_of_unknown_sku_fails() {
        let mut catalog = seeded();
        let err = catalog
            .record_sale("tester", "nope", 1, None, &SaleTerms::default(), now())
            .unwrap_err();
        assert_eq!(err, LedgerError::ItemNotFound("NOPE".to_string()));
        assert!(catalog.sales().is_empty());
    }

    #[test]
    fn oversell_leaves_catalog_unmodified() {
        let mut catalog = seeded();
        let before = catalog.get("X1").unwrap().clone();
        let err = catalog
            .record_sale("tester", "X1", 100, Some(dec!(9.99)), &SaleTerms::default(), now())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientStock { .. }));
        assert_eq!(catalog.get("X1").unwrap(), &before);
        assert!(catalog.sales().is_empty());
    }

    #[test]
    fn default_sale_price_is_unit_cost() {
        let mut catalog = seeded();
        let record = catalog
            .record_sale("tester", "X1", 2, None, &SaleTerms::default(), now())
            .unwrap();
        assert_eq!(record.sale_price, dec!(3.00));
        assert_eq!(record.profit, dec!(0.00));
    }

    #[test]
    fn remove_item_returns_entry_and_is_none_for_unknown() {
        let mut catalog = seeded();
        assert!(catalog.remove_item("tester", "missing", now()).is_none());
        let removed = catalog.remove_item("tester", "x1", now()).unwrap();
        assert_eq!(removed.sku, "X1");
        assert!(catalog.get("x1").is_none());
    }

    #[test]
    fn search_matches_sku_name_and_barcode() {
        let mut catalog = seeded();
        catalog
            .record_purchase("tester", "y2", 3, dec!(1.00), &named("Sprocket"), now())
            .unwrap();

        let by_name = catalog.search(Some("sprock"), None, None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].sku, "Y2");

        let by_sku = catalog.search(Some("x1"), None, None);
        assert_eq!(by_sku.len(), 1);

        let barcode = catalog.get("Y2").unwrap().barcode.clone();
        let by_barcode = catalog.search(Some(&barcode.to_lowercase()), None, None);
        assert_eq!(by_barcode.len(), 1);

        // empty query matches all
        assert_eq!(catalog.search(None, None, None).len(), 2);
        assert_eq!(catalog.search(Some(""), None, None).len(), 2);
    }

    #[test]
    fn search_filters_by_category_and_location() {
        let mut catalog = Catalog::new();
        let details = ItemDetails {
            name: Some("Bolt".to_string()),
            category: Some("Fasteners".to_string()),
            location: Some("Retail Floor".to_string()),
            ..ItemDetails::default()
        };
        catalog
            .record_purchase("tester", "b1", 5, dec!(0.10), &details, now())
            .unwrap();
        catalog
            .record_purchase("tester", "n1", 5, dec!(0.10), &named("Nut"), now())
            .unwrap();

        assert_eq!(catalog.search(None, Some("Fasteners"), None).len(), 1);
        assert_eq!(catalog.search(None, Some("Fasteners"), Some("Retail Floor")).len(), 1);
        assert_eq!(catalog.search(None, Some("Fasteners"), Some("Main Warehouse")).len(), 0);
    }

    #[test]
    fn low_stock_and_reorder_suggestions() {
        let mut catalog = Catalog::new();
        let details = ItemDetails {
            name: Some("Gadget".to_string()),
            reorder_point: Some(8),
            ..ItemDetails::default()
        };
        catalog
            .record_purchase("tester", "g1", 6, dec!(2.00), &details, now())
            .unwrap();
        catalog
            .record_purchase("tester", "h1", 50, dec!(2.00), &named("Hinge"), now())
            .unwrap();

        let low = catalog.low_stock_items();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].sku, "G1");
        // idempotent with no intervening mutation
        let skus: Vec<_> = catalog.low_stock_items().iter().map(|i| i.sku.clone()).collect();
        assert_eq!(skus, vec!["G1".to_string()]);

        let suggestions = catalog.reorder_suggestions();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].order_qty, 16);
    }

    #[test]
    fn total_inventory_value_sums_cost_basis() {
        let mut catalog = seeded();
        catalog
            .record_purchase("tester", "y2", 3, dec!(1.50), &named("Sprocket"), now())
            .unwrap();
        assert_eq!(catalog.total_inventory_value(), dec!(64.50));
    }

    #[test]
    fn sales_analytics_respects_the_window() {
        let mut catalog = seeded();
        catalog
            .record_sale("tester", "X1", 5, Some(dec!(5.00)), &SaleTerms::default(), ts("2026-06-01T00:00:00+00:00"))
            .unwrap();
        catalog
            .record_sale("tester", "X1", 5, Some(dec!(4.00)), &SaleTerms::default(), ts("2026-07-25T00:00:00+00:00"))
            .unwrap();

        let summary = catalog.sales_analytics(30, now());
        assert_eq!(summary.sale_count, 1);
        assert_eq!(summary.total_revenue, dec!(20.00));

        let all_time = catalog.sales_analytics(365, now());
        assert_eq!(all_time.sale_count, 2);
        assert_eq!(all_time.total_revenue, dec!(45.00));
        // (10.00 + 5.00) / 45.00
        assert_eq!(all_time.total_profit, dec!(15.00));
        assert_eq!(all_time.profit_margin_pct, dec!(33.33));
    }

    #[test]
    fn analytics_margin_defined_at_zero_revenue() {
        let catalog = seeded();
        let summary = catalog.sales_analytics(30, now());
        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.profit_margin_pct, Decimal::ZERO);
    }

    #[test]
    fn duplicate_supplier_rejected_case_insensitively() {
        let mut catalog = Catalog::new();
        catalog.add_supplier(Supplier::named("Acme Ltd")).unwrap();
        let err = catalog.add_supplier(Supplier::named("  acme ltd ")).unwrap_err();
        assert_eq!(err, LedgerError::DuplicateSupplier("  acme ltd ".to_string()));
        assert_eq!(catalog.suppliers().count(), 1);
    }

    #[test]
    fn audit_trail_captures_mutations_and_price_changes() {
        let mut catalog = Catalog::new();
        catalog
            .record_purchase("alice", "x1", 10, dec!(2.00), &named("Widget"), now())
            .unwrap();
        catalog
            .record_sale("bob", "x1", 1, Some(dec!(3.00)), &SaleTerms::default(), now())
            .unwrap();
        catalog.remove_item("alice", "x1", now());

        let actions: Vec<_> = catalog.audit().iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::PriceChange,
                AuditAction::Purchase,
                AuditAction::Sale,
                AuditAction::Remove,
            ]
        );
        assert_eq!(catalog.audit()[0].actor, "alice");
    }

    #[test]
    fn repurchase_at_same_price_emits_no_price_change() {
        let mut catalog = Catalog::new();
        catalog
            .record_purchase("tester", "x1", 10, dec!(2.00), &named("Widget"), now())
            .unwrap();
        catalog
            .record_purchase("tester", "x1", 5, dec!(2.00), &ItemDetails::default(), now())
            .unwrap();
        let price_changes = catalog
            .audit()
            .iter()
            .filter(|e| e.action == AuditAction::PriceChange)
            .count();
        assert_eq!(price_changes, 1);
    }

    #[test]
    fn parts_round_trip() {
        let catalog = seeded();
        let items: Vec<_> = catalog.items().cloned().collect();
        let rebuilt = Catalog::from_parts(
            catalog.config(),
            items,
            catalog.sales().to_vec(),
            catalog.suppliers().cloned().collect(),
            catalog.audit().to_vec(),
        );
        assert_eq!(rebuilt.get("X1"), catalog.get("X1"));
        assert_eq!(rebuilt.item_count(), catalog.item_count());
    }
}
