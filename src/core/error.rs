use rust_decimal::Decimal;

/// Errors raised by catalog and ledger-entry operations.
///
/// Every variant is a synchronous validation failure: the operation that
/// returned it has left the catalog untouched and can be retried with
/// corrected input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("quantity must be positive (got {0})")]
    InvalidQuantity(i64),
    #[error("unit price cannot be negative (got {0})")]
    InvalidPrice(Decimal),
    #[error("insufficient stock for {sku}: requested {requested}, on hand {on_hand}")]
    InsufficientStock {
        sku: String,
        requested: i64,
        on_hand: i64,
    },
    #[error("item not found: {0}")]
    ItemNotFound(String),
    #[error("duplicate supplier: {0}")]
    DuplicateSupplier(String),
}
