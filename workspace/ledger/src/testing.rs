//! Shared fixtures for the unit tests in this crate.

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use model::entities::payment::{EntryKind, PaymentKind};
use model::entities::{house, payment, rent, room, tenant};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set, Statement};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// An in-memory rent agreement row; the total is derived from the terms.
pub fn rent_row(
    id: i32,
    tenant_id: i32,
    monthly_rent: Decimal,
    months: i32,
    start: &str,
    end: &str,
) -> rent::Model {
    rent::Model {
        id,
        tenant_id,
        room_id: 1,
        monthly_rent,
        months,
        total_rent: monthly_rent * Decimal::from(months),
        start_date: date(start),
        end_date: date(end),
        contract_url: None,
    }
}

/// A minimal ledger row; amount is irrelevant to reference matching.
pub fn payment_row(
    tenant_id: i32,
    kind: PaymentKind,
    rent_id: Option<i32>,
    monthly_service_id: Option<i32>,
    maintenance_request_id: Option<i32>,
) -> payment::Model {
    payment::Model {
        id: 0,
        tenant_id,
        kind,
        rent_id,
        monthly_service_id,
        maintenance_request_id,
        entry: EntryKind::Payment,
        amount: Decimal::new(100, 2),
        balance_after: Decimal::ZERO,
        paid_on: date("2025-06-01"),
        idempotency_key: None,
        note: None,
    }
}

/// A ledger row with a concrete entry kind and amount.
pub fn ledger_row(
    tenant_id: i32,
    kind: PaymentKind,
    rent_id: Option<i32>,
    entry: EntryKind,
    amount: Decimal,
) -> payment::Model {
    payment::Model {
        entry,
        amount,
        ..payment_row(tenant_id, kind, rent_id, None, None)
    }
}

/// Fresh in-memory database with the full schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON;",
    ))
    .await
    .expect("enable foreign keys");
    Migrator::up(&db, None).await.expect("apply migrations");
    db
}

pub async fn seed_room(db: &DatabaseConnection) -> i32 {
    let house = house::ActiveModel {
        name: Set("Elm House".to_owned()),
        address: Set("12 Elm Street".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert house");

    room::ActiveModel {
        house_id: Set(house.id),
        name: Set("A1".to_owned()),
        monthly_rent: Set(Decimal::new(50000, 2)),
        status: Set(room::RoomStatus::Available),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert room")
    .id
}

pub async fn seed_tenant(db: &DatabaseConnection, name: &str) -> i32 {
    tenant::ActiveModel {
        name: Set(name.to_owned()),
        phone: Set("555-0100".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert tenant")
    .id
}

pub async fn seed_rent(
    db: &DatabaseConnection,
    tenant_id: i32,
    room_id: i32,
    monthly_rent: Decimal,
    months: i32,
    start: &str,
    end: &str,
) -> rent::Model {
    rent::ActiveModel {
        tenant_id: Set(tenant_id),
        room_id: Set(room_id),
        monthly_rent: Set(monthly_rent),
        months: Set(months),
        total_rent: Set(monthly_rent * Decimal::from(months)),
        start_date: Set(date(start)),
        end_date: Set(date(end)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert rent")
}
