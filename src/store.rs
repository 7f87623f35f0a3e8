//! Storage port: catalogs persist as atomic snapshots, never as deltas.

use std::fs;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{AuditEntry, Catalog, CatalogConfig, ItemEntry, SaleRecord, Supplier};

/// Everything a catalog owns, in plain persistable records.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<ItemEntry>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub audit: Vec<AuditEntry>,
}

impl Snapshot {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Snapshot {
            items: catalog.items().cloned().collect(),
            sales: catalog.sales().to_vec(),
            suppliers: catalog.suppliers().cloned().collect(),
            audit: catalog.audit().to_vec(),
        }
    }

    pub fn into_catalog(self, config: CatalogConfig) -> Catalog {
        Catalog::from_parts(config, self.items, self.sales, self.suppliers, self.audit)
    }
}

/// Load/save boundary the CLI wires the catalog to. Implementations must
/// treat a snapshot as a whole: either everything is written or nothing is.
pub trait Store {
    /// `None` means no data has been saved yet (not an error).
    fn load(&self) -> anyhow::Result<Option<Snapshot>>;
    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()>;
}

/// JSON file-backed store.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }
}

impl Store for JsonStore {
    fn load(&self) -> anyhow::Result<Option<Snapshot>> {
        if !self.path.exists() {
            log::info!("no data file at {}, starting empty", self.path.display());
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        // Write to a sibling temp file first so a failed write cannot
        // truncate the existing snapshot.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(snapshot)?)?;
        fs::rename(&tmp, &self.path)?;
        log::info!(
            "saved {} items, {} sales to {}",
            snapshot.items.len(),
            snapshot.sales.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItemDetails;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        let details = ItemDetails {
            name: Some("Widget".to_string()),
            ..ItemDetails::default()
        };
        catalog
            .record_purchase("tester", "x1", 10, dec!(2.00), &details, Utc::now())
            .unwrap();
        catalog
            .record_sale("tester", "x1", 2, Some(dec!(3.00)), &Default::default(), Utc::now())
            .unwrap();
        catalog
    }

    #[test]
    fn snapshot_serde_round_trip() {
        let catalog = sample_catalog();
        let snapshot = Snapshot::from_catalog(&catalog);
        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();
        let rebuilt = restored.into_catalog(catalog.config());

        assert_eq!(rebuilt.get("X1"), catalog.get("X1"));
        assert_eq!(rebuilt.sales(), catalog.sales());
        assert_eq!(rebuilt.audit(), catalog.audit());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let store = JsonStore::new("/nonexistent/stocktake-test.json");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("stocktake-store-{}.json", std::process::id()));
        let store = JsonStore::new(&path);
        let catalog = sample_catalog();

        store.save(&Snapshot::from_catalog(&catalog)).unwrap();
        let loaded = store.load().unwrap().expect("snapshot should exist");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.sales.len(), 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn legacy_minimal_snapshot_parses() {
        // older files may lack the suppliers/audit sections
        let json = r#"{"items": [], "sales": []}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.suppliers.is_empty());
        assert!(snapshot.audit.is_empty());
    }
}
