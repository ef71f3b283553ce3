//! Record fixture builders.
//! Note: #[allow(dead_code)] items because each test file compiles common/
//! separately.

use cofre_core::EntityKind;
use cofre_metadata::MetadataStore;
use cofre_metadata::models::*;
use std::sync::Arc;
use time::macros::date;
use time::{Date, Duration, OffsetDateTime};

/// Default owner used by most fixtures; matches actor 1 of the test config.
#[allow(dead_code)]
pub const OWNER: i64 = 1;

/// A UTC instant the given number of days in the past.
#[allow(dead_code)]
pub fn days_ago(days: i64) -> OffsetDateTime {
    OffsetDateTime::now_utc() - Duration::days(days)
}

/// A UTC instant the given number of minutes in the past.
#[allow(dead_code)]
pub fn minutes_ago(minutes: i64) -> OffsetDateTime {
    OffsetDateTime::now_utc() - Duration::minutes(minutes)
}

/// Civil date used as a stable anchor by fixtures.
#[allow(dead_code)]
pub const ANCHOR_DAY: Date = date!(2026 - 08 - 06);

#[allow(dead_code)]
pub fn new_expense(owner_id: i64, description: &str, amount_cents: i64) -> NewExpense {
    NewExpense {
        owner_id,
        description: description.to_string(),
        amount_cents,
        category: "groceries".to_string(),
        payment_method: "debit".to_string(),
        spent_on: ANCHOR_DAY,
        notes: None,
    }
}

#[allow(dead_code)]
pub fn new_subscription(owner_id: i64, name: &str, amount_cents: i64) -> NewSubscription {
    NewSubscription {
        owner_id,
        name: name.to_string(),
        amount_cents,
        category: Some("streaming".to_string()),
        billing_day: 5,
        notes: None,
    }
}

#[allow(dead_code)]
pub fn new_fixed_bill(owner_id: i64, name: &str, amount_cents: i64) -> NewFixedBill {
    NewFixedBill {
        owner_id,
        name: name.to_string(),
        amount_cents,
        category: Some("housing".to_string()),
        due_day: 10,
    }
}

#[allow(dead_code)]
pub fn new_card(owner_id: i64, name: &str) -> NewCard {
    NewCard {
        owner_id,
        name: name.to_string(),
        limit_cents: 500_000,
        closing_day: 28,
        due_day: 8,
    }
}

#[allow(dead_code)]
pub fn new_installment_purchase(
    owner_id: i64,
    description: &str,
    count: i64,
    installment_cents: i64,
    first_due_on: Date,
) -> NewInstallmentPurchase {
    NewInstallmentPurchase {
        owner_id,
        description: description.to_string(),
        total_cents: count * installment_cents,
        installment_count: count,
        installment_cents,
        category: Some("electronics".to_string()),
        first_due_on,
    }
}

/// Fuel log with no description, exercising the `Item {id}` label fallback.
#[allow(dead_code)]
pub fn new_fuel_log(owner_id: i64, amount_cents: i64) -> NewFuelLog {
    NewFuelLog {
        owner_id,
        description: None,
        amount_cents,
        liters_milli: 32_450,
        filled_on: ANCHOR_DAY,
        notes: None,
    }
}

#[allow(dead_code)]
pub fn new_goal(owner_id: i64, name: &str) -> NewGoal {
    NewGoal {
        owner_id,
        name: name.to_string(),
        target_cents: 1_000_000,
        saved_cents: 250_000,
        due_on: None,
    }
}

#[allow(dead_code)]
pub fn new_investment(owner_id: i64, name: &str) -> NewInvestment {
    NewInvestment {
        owner_id,
        name: name.to_string(),
        amount_cents: 200_000,
        category: Some("index funds".to_string()),
        notes: None,
    }
}

#[allow(dead_code)]
pub fn new_debt(owner_id: i64, description: &str) -> NewDebt {
    NewDebt {
        owner_id,
        description: description.to_string(),
        amount_cents: 120_000,
        creditor: "bank".to_string(),
    }
}

#[allow(dead_code)]
pub fn new_loan(owner_id: i64, description: &str, amount_cents: i64) -> NewLoan {
    NewLoan {
        owner_id,
        description: description.to_string(),
        amount_cents,
        counterparty: "cousin".to_string(),
    }
}

#[allow(dead_code)]
pub fn new_budget(owner_id: i64, name: &str) -> NewBudget {
    NewBudget {
        owner_id,
        name: name.to_string(),
        category: "groceries".to_string(),
        limit_cents: 80_000,
        period: "2026-08".to_string(),
    }
}

#[allow(dead_code)]
pub fn new_asset(owner_id: i64, name: &str) -> NewAsset {
    NewAsset {
        owner_id,
        name: name.to_string(),
        value_cents: 4_500_000,
        category: Some("vehicle".to_string()),
    }
}

/// Create one record of the given kind with fixture values, returning its id.
/// Used by tests that exercise the lifecycle uniformly across the registry.
#[allow(dead_code)]
pub async fn create_kind_record(
    store: &Arc<dyn MetadataStore>,
    kind: EntityKind,
    owner_id: i64,
) -> i64 {
    let created_at = OffsetDateTime::now_utc();
    match kind {
        EntityKind::Expense => {
            store
                .create_expense(&new_expense(owner_id, "fixture expense", 1_000), created_at)
                .await
                .expect("create expense")
                .id
        }
        EntityKind::Subscription => {
            store
                .create_subscription(&new_subscription(owner_id, "fixture sub", 2_990), created_at)
                .await
                .expect("create subscription")
                .id
        }
        EntityKind::FixedBill => {
            store
                .create_fixed_bill(&new_fixed_bill(owner_id, "fixture bill", 90_000), created_at)
                .await
                .expect("create fixed bill")
                .id
        }
        EntityKind::Card => {
            store
                .create_card(&new_card(owner_id, "fixture card"), created_at)
                .await
                .expect("create card")
                .id
        }
        EntityKind::InstallmentPurchase => {
            store
                .create_installment_purchase(
                    &new_installment_purchase(owner_id, "fixture purchase", 6, 10_000, ANCHOR_DAY),
                    created_at,
                )
                .await
                .expect("create installment purchase")
                .id
        }
        EntityKind::FuelLog => {
            store
                .create_fuel_log(&new_fuel_log(owner_id, 18_000), created_at)
                .await
                .expect("create fuel log")
                .id
        }
        EntityKind::Goal => {
            store
                .create_goal(&new_goal(owner_id, "fixture goal"), created_at)
                .await
                .expect("create goal")
                .id
        }
        EntityKind::Investment => {
            store
                .create_investment(&new_investment(owner_id, "fixture investment"), created_at)
                .await
                .expect("create investment")
                .id
        }
        EntityKind::Debt => {
            store
                .create_debt(&new_debt(owner_id, "fixture debt"), created_at)
                .await
                .expect("create debt")
                .id
        }
        EntityKind::Loan => {
            store
                .create_loan(&new_loan(owner_id, "fixture loan", 50_000), created_at)
                .await
                .expect("create loan")
                .id
        }
        EntityKind::Budget => {
            store
                .create_budget(&new_budget(owner_id, "fixture budget"), created_at)
                .await
                .expect("create budget")
                .id
        }
        EntityKind::Asset => {
            store
                .create_asset(&new_asset(owner_id, "fixture asset"), created_at)
                .await
                .expect("create asset")
                .id
        }
    }
}
