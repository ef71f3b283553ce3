//! Soft-deletable entity kinds and the table registry.
//!
//! Every record type that participates in the trash lifecycle is described by
//! one [`TableSpec`] entry. The trash aggregator and the retention sweep
//! iterate the registry uniformly, so adding a new soft-deletable type means
//! adding an enum variant and a registry entry, not new control flow.

use crate::error::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A record category sharing the soft-delete lifecycle contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Expense,
    Subscription,
    FixedBill,
    Card,
    InstallmentPurchase,
    FuelLog,
    Goal,
    Investment,
    Debt,
    Loan,
    Budget,
    Asset,
}

/// Registry entry describing how one entity table participates in the
/// lifecycle. Column names are `None` where the table has no such column;
/// the trash aggregator substitutes NULL for those.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub kind: EntityKind,
    /// SQL table name; doubles as the wire identifier for the kind.
    pub table: &'static str,
    /// Human-facing label for the record category.
    pub label: &'static str,
    pub description_col: Option<&'static str>,
    pub name_col: Option<&'static str>,
    pub amount_col: Option<&'static str>,
    pub category_col: Option<&'static str>,
    pub notes_col: Option<&'static str>,
}

static REGISTRY: [TableSpec; 12] = [
    TableSpec {
        kind: EntityKind::Expense,
        table: "expenses",
        label: "Expense",
        description_col: Some("description"),
        name_col: None,
        amount_col: Some("amount_cents"),
        category_col: Some("category"),
        notes_col: Some("notes"),
    },
    TableSpec {
        kind: EntityKind::Subscription,
        table: "subscriptions",
        label: "Subscription",
        description_col: None,
        name_col: Some("name"),
        amount_col: Some("amount_cents"),
        category_col: Some("category"),
        notes_col: Some("notes"),
    },
    TableSpec {
        kind: EntityKind::FixedBill,
        table: "fixed_bills",
        label: "Fixed bill",
        description_col: None,
        name_col: Some("name"),
        amount_col: Some("amount_cents"),
        category_col: Some("category"),
        notes_col: None,
    },
    TableSpec {
        kind: EntityKind::Card,
        table: "cards",
        label: "Card",
        description_col: None,
        name_col: Some("name"),
        amount_col: Some("limit_cents"),
        category_col: None,
        notes_col: None,
    },
    TableSpec {
        kind: EntityKind::InstallmentPurchase,
        table: "installment_purchases",
        label: "Installment purchase",
        description_col: Some("description"),
        name_col: None,
        amount_col: Some("total_cents"),
        category_col: Some("category"),
        notes_col: None,
    },
    TableSpec {
        kind: EntityKind::FuelLog,
        table: "fuel_logs",
        label: "Fuel log",
        description_col: Some("description"),
        name_col: None,
        amount_col: Some("amount_cents"),
        category_col: None,
        notes_col: Some("notes"),
    },
    TableSpec {
        kind: EntityKind::Goal,
        table: "goals",
        label: "Goal",
        description_col: None,
        name_col: Some("name"),
        amount_col: Some("target_cents"),
        category_col: None,
        notes_col: None,
    },
    TableSpec {
        kind: EntityKind::Investment,
        table: "investments",
        label: "Investment",
        description_col: None,
        name_col: Some("name"),
        amount_col: Some("amount_cents"),
        category_col: Some("category"),
        notes_col: Some("notes"),
    },
    TableSpec {
        kind: EntityKind::Debt,
        table: "debts",
        label: "Debt",
        description_col: Some("description"),
        name_col: None,
        amount_col: Some("amount_cents"),
        category_col: None,
        notes_col: None,
    },
    TableSpec {
        kind: EntityKind::Loan,
        table: "loans",
        label: "Loan",
        description_col: Some("description"),
        name_col: None,
        amount_col: Some("amount_cents"),
        category_col: None,
        notes_col: None,
    },
    TableSpec {
        kind: EntityKind::Budget,
        table: "budgets",
        label: "Budget",
        description_col: None,
        name_col: Some("name"),
        amount_col: Some("limit_cents"),
        category_col: Some("category"),
        notes_col: None,
    },
    TableSpec {
        kind: EntityKind::Asset,
        table: "assets",
        label: "Asset",
        description_col: None,
        name_col: Some("name"),
        amount_col: Some("value_cents"),
        category_col: Some("category"),
        notes_col: None,
    },
];

impl EntityKind {
    /// All registered kinds, in registry order.
    pub const ALL: [EntityKind; 12] = [
        EntityKind::Expense,
        EntityKind::Subscription,
        EntityKind::FixedBill,
        EntityKind::Card,
        EntityKind::InstallmentPurchase,
        EntityKind::FuelLog,
        EntityKind::Goal,
        EntityKind::Investment,
        EntityKind::Debt,
        EntityKind::Loan,
        EntityKind::Budget,
        EntityKind::Asset,
    ];

    /// The registry entry for this kind.
    pub fn spec(&self) -> &'static TableSpec {
        // Registry order matches ALL; index by discriminant position.
        REGISTRY
            .iter()
            .find(|s| s.kind == *self)
            .expect("every kind has a registry entry")
    }

    /// The table name, which is also the wire identifier (e.g. `expenses`).
    pub fn as_str(&self) -> &'static str {
        self.spec().table
    }

    /// Human-facing label (e.g. "Installment purchase").
    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    /// Parse a wire identifier / table name back into a kind.
    pub fn parse(s: &str) -> Result<Self> {
        REGISTRY
            .iter()
            .find(|spec| spec.table == s)
            .map(|spec| spec.kind)
            .ok_or_else(|| Error::UnknownEntityKind(s.to_string()))
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        EntityKind::parse(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_kind() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        assert!(matches!(
            EntityKind::parse("salaries"),
            Err(Error::UnknownEntityKind(_))
        ));
    }

    #[test]
    fn every_entry_has_a_label_source() {
        // Label fallback needs at least one of description/name, or the
        // aggregator falls through to "Item {id}"; either is allowed, but a
        // registry entry with an amount column must name a real column.
        for spec in EntityKind::ALL.map(|k| *k.spec()) {
            assert!(!spec.table.is_empty());
            assert!(!spec.label.is_empty());
            if let Some(col) = spec.amount_col {
                assert!(!col.is_empty());
            }
        }
    }

    #[test]
    fn serde_uses_table_identifiers() {
        let json = serde_json::to_string(&EntityKind::FuelLog).unwrap();
        assert_eq!(json, "\"fuel_logs\"");
        let kind: EntityKind = serde_json::from_str("\"installment_purchases\"").unwrap();
        assert_eq!(kind, EntityKind::InstallmentPurchase);
    }
}
