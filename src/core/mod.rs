pub mod audit;
pub mod catalog;
pub mod error;
pub mod item;
pub mod sale;
pub mod supplier;

// Flat public surface for domain types and functions.
pub use audit::{display_action, AuditAction, AuditEntry};
pub use catalog::{Catalog, CatalogConfig, ItemDetails, ReorderSuggestion, SaleTerms};
pub use error::LedgerError;
pub use item::{derive_barcode, normalize_sku, ItemEntry, Rounding};
pub use sale::{summarize, SaleRecord, SalesSummary};
pub use supplier::Supplier;
