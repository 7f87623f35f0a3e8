pub mod audit;
pub mod export;
pub mod html_report;
pub mod import;
pub mod list;
pub mod purchase;
pub mod remove;
pub mod reorder;
pub mod report;
pub mod sales;
pub mod schema;
pub mod sell;
pub mod supplier;

use std::path::Path;

use crate::core::{Catalog, CatalogConfig};
use crate::store::{JsonStore, Snapshot, Store};

/// Load the catalog from the inventory file (empty if the file is absent).
pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let snapshot = JsonStore::new(path).load()?.unwrap_or_default();
    Ok(snapshot.into_catalog(CatalogConfig::default()))
}

pub fn save_catalog(path: &Path, catalog: &Catalog) -> anyhow::Result<()> {
    JsonStore::new(path).save(&Snapshot::from_catalog(catalog))
}
