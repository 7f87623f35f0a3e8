use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A vendor items are restocked from. Suppliers are unique by name (trimmed,
/// case-insensitive); the catalog enforces this on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Supplier {
    pub name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl Supplier {
    pub fn named(name: impl Into<String>) -> Self {
        Supplier {
            name: name.into(),
            ..Supplier::default()
        }
    }

    /// Key used for uniqueness checks and lookups.
    pub fn key(&self) -> String {
        supplier_key(&self.name)
    }
}

pub fn supplier_key(name: &str) -> String {
    name.trim().to_lowercase()
}
