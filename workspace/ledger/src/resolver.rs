use chrono::NaiveDate;
use model::entities::payment::PaymentKind;
use model::entities::{maintenance_request, monthly_service, payment, rent};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder};
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::Obligation;

/// Find the rent agreement a tenant's activity on `as_of` belongs to.
///
/// Agreements whose window contains the date win; when several overlap the
/// most recently started one is taken. A tenant with agreements but none
/// covering the date falls back to the most recently started agreement, so
/// late payments on an expired contract still land somewhere sensible.
#[instrument(skip(db))]
pub async fn resolve_active_rent<C: ConnectionTrait>(
    db: &C,
    tenant_id: i32,
    as_of: NaiveDate,
) -> Result<Option<rent::Model>> {
    let rents = rent::Entity::find()
        .filter(rent::Column::TenantId.eq(tenant_id))
        .order_by_asc(rent::Column::StartDate)
        .all(db)
        .await?;

    let active = rents
        .iter()
        .filter(|r| r.start_date <= as_of && as_of <= r.end_date)
        .next_back()
        .cloned();

    if let Some(rent) = active {
        debug!(rent_id = rent.id, "resolved active rent");
        return Ok(Some(rent));
    }

    let fallback = rents.into_iter().next_back();
    if let Some(rent) = &fallback {
        warn!(
            rent_id = rent.id,
            "no agreement covers the date, falling back to most recent"
        );
    }
    Ok(fallback)
}

/// The tenant's full payment ledger, oldest first.
pub async fn payments_for<C: ConnectionTrait>(
    db: &C,
    tenant_id: i32,
) -> Result<Vec<payment::Model>> {
    Ok(payment::Entity::find()
        .filter(payment::Column::TenantId.eq(tenant_id))
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await?)
}

/// Everything a tenant can owe money on: their rent agreements, the
/// service bills for the months those agreements cover, and their
/// maintenance requests.
#[instrument(skip(db))]
pub async fn obligations_for<C: ConnectionTrait>(
    db: &C,
    tenant_id: i32,
) -> Result<Vec<Obligation>> {
    let rents = rent::Entity::find()
        .filter(rent::Column::TenantId.eq(tenant_id))
        .order_by_asc(rent::Column::StartDate)
        .all(db)
        .await?;

    let mut obligations: Vec<Obligation> = rents.iter().map(Obligation::from_rent).collect();

    // Service bills attach to rooms; a bill is the tenant's when one of
    // their agreements covers both the room and the billing month.
    for rent in &rents {
        let services = monthly_service::Entity::find()
            .filter(monthly_service::Column::RoomId.eq(rent.room_id))
            .filter(monthly_service::Column::Month.between(rent.start_date, rent.end_date))
            .order_by_asc(monthly_service::Column::Month)
            .all(db)
            .await?;
        for service in &services {
            let obligation = Obligation::from_service(service, tenant_id);
            if !obligations.contains(&obligation) {
                obligations.push(obligation);
            }
        }
    }

    let requests = maintenance_request::Entity::find()
        .filter(maintenance_request::Column::TenantId.eq(tenant_id))
        .order_by_asc(maintenance_request::Column::Id)
        .all(db)
        .await?;
    obligations.extend(requests.iter().map(Obligation::from_maintenance));

    debug!(count = obligations.len(), "collected obligations");
    Ok(obligations)
}

/// Load the obligation a ledger entry explicitly references. `None` means
/// the referenced row does not exist.
pub async fn find_obligation<C: ConnectionTrait>(
    db: &C,
    kind: PaymentKind,
    reference_id: i32,
    tenant_id: i32,
) -> Result<Option<Obligation>> {
    let obligation = match kind {
        PaymentKind::Rent => rent::Entity::find_by_id(reference_id)
            .one(db)
            .await?
            .map(|r| Obligation::from_rent(&r)),
        PaymentKind::Service => monthly_service::Entity::find_by_id(reference_id)
            .one(db)
            .await?
            .map(|s| Obligation::from_service(&s, tenant_id)),
        PaymentKind::Maintenance => maintenance_request::Entity::find_by_id(reference_id)
            .one(db)
            .await?
            .map(|m| Obligation::from_maintenance(&m)),
    };
    Ok(obligation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{seed_rent, seed_room, seed_tenant, setup_db};
    use rust_decimal::Decimal;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn picks_the_agreement_covering_the_date() {
        let db = setup_db().await;
        let room = seed_room(&db).await;
        let tenant = seed_tenant(&db, "Alice").await;

        let monthly = Decimal::new(50000, 2);
        seed_rent(&db, tenant, room, monthly, 12, "2024-01-01", "2024-12-31").await;
        let current = seed_rent(&db, tenant, room, monthly, 12, "2025-01-01", "2025-12-31").await;

        let resolved = resolve_active_rent(&db, tenant, date("2025-06-15"))
            .await
            .unwrap();
        assert_eq!(resolved.map(|r| r.id), Some(current.id));
    }

    #[tokio::test]
    async fn overlapping_agreements_resolve_to_latest_start() {
        let db = setup_db().await;
        let room = seed_room(&db).await;
        let tenant = seed_tenant(&db, "Alice").await;

        let monthly = Decimal::new(50000, 2);
        seed_rent(&db, tenant, room, monthly, 12, "2025-01-01", "2025-12-31").await;
        let renewal = seed_rent(&db, tenant, room, monthly, 12, "2025-06-01", "2026-05-31").await;

        let resolved = resolve_active_rent(&db, tenant, date("2025-07-01"))
            .await
            .unwrap();
        assert_eq!(resolved.map(|r| r.id), Some(renewal.id));
    }

    #[tokio::test]
    async fn falls_back_to_most_recent_when_nothing_covers_the_date() {
        let db = setup_db().await;
        let room = seed_room(&db).await;
        let tenant = seed_tenant(&db, "Alice").await;

        let monthly = Decimal::new(50000, 2);
        seed_rent(&db, tenant, room, monthly, 6, "2023-01-01", "2023-06-30").await;
        let latest = seed_rent(&db, tenant, room, monthly, 6, "2024-01-01", "2024-06-30").await;

        let resolved = resolve_active_rent(&db, tenant, date("2025-06-15"))
            .await
            .unwrap();
        assert_eq!(resolved.map(|r| r.id), Some(latest.id));
    }

    #[tokio::test]
    async fn tenant_without_agreements_resolves_to_none() {
        let db = setup_db().await;
        let tenant = seed_tenant(&db, "Alice").await;

        let resolved = resolve_active_rent(&db, tenant, date("2025-06-15"))
            .await
            .unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn obligations_include_services_within_the_agreement_window() {
        use model::entities::monthly_service;
        use sea_orm::{ActiveModelTrait, Set};

        let db = setup_db().await;
        let room = seed_room(&db).await;
        let tenant = seed_tenant(&db, "Alice").await;
        let other = seed_tenant(&db, "Bob").await;

        let monthly = Decimal::new(50000, 2);
        let rent = seed_rent(&db, tenant, room, monthly, 12, "2025-01-01", "2025-12-31").await;
        seed_rent(&db, other, room, monthly, 12, "2024-01-01", "2024-12-31").await;

        for month in ["2024-06-01", "2025-06-01"] {
            monthly_service::ActiveModel {
                room_id: Set(room),
                month: Set(date(month)),
                water_total: Set(Decimal::new(3000, 2)),
                electricity_total: Set(Decimal::new(6000, 2)),
                trash_fee: Set(Decimal::new(1000, 2)),
                maintenance_fee: Set(Decimal::ZERO),
                total_amount: Set(Decimal::new(10000, 2)),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let obligations = obligations_for(&db, tenant).await.unwrap();
        let rents: Vec<_> = obligations
            .iter()
            .filter(|o| o.kind == common::ObligationKind::Rent)
            .collect();
        let services: Vec<_> = obligations
            .iter()
            .filter(|o| o.kind == common::ObligationKind::Service)
            .collect();

        assert_eq!(rents.len(), 1);
        assert_eq!(rents[0].id, rent.id);
        // Only the bill inside this tenant's window.
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].due_date, date("2025-06-01"));
        assert_eq!(services[0].tenant_id, tenant);
    }
}
