use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a catalog mutation did, for the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AuditAction {
    Purchase,
    Sale,
    Remove,
    PriceChange,
    Import,
}

/// Display string for an audit action (used in trail listings).
pub fn display_action(action: AuditAction) -> &'static str {
    match action {
        AuditAction::Purchase => "PURCHASE",
        AuditAction::Sale => "SALE",
        AuditAction::Remove => "REMOVE",
        AuditAction::PriceChange => "PRICE_CHANGE",
        AuditAction::Import => "IMPORT",
    }
}

/// One append-only audit trail entry. Emitted by catalog mutations,
/// fire-and-forget: no catalog operation depends on the trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: AuditAction,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_display_strings() {
        assert_eq!(display_action(AuditAction::Purchase), "PURCHASE");
        assert_eq!(display_action(AuditAction::Sale), "SALE");
        assert_eq!(display_action(AuditAction::Remove), "REMOVE");
        assert_eq!(display_action(AuditAction::PriceChange), "PRICE_CHANGE");
        assert_eq!(display_action(AuditAction::Import), "IMPORT");
    }
}
