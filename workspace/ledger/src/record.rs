use chrono::NaiveDate;
use model::entities::payment::{self, EntryKind, PaymentKind};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, QueryOrder, Set, TransactionTrait};
use tracing::{info, instrument};

use crate::balance::compute_balance;
use crate::error::{LedgerError, Result};
use crate::validator::validate_entry;

/// A ledger entry to be appended.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub tenant_id: i32,
    pub kind: PaymentKind,
    /// Id of the rent, service bill or maintenance request being paid.
    pub reference_id: i32,
    pub entry: EntryKind,
    pub amount: Decimal,
    pub paid_on: NaiveDate,
    /// Client-supplied key making retries safe; a repeat returns the row
    /// recorded the first time instead of a duplicate.
    pub idempotency_key: Option<String>,
    pub note: Option<String>,
}

/// Append a ledger entry.
///
/// The obligation lookup, overpayment check and insert run inside one
/// transaction, so two simultaneous payments against the same nearly
/// settled obligation cannot both slip past the balance check.
#[instrument(skip(db, new), fields(tenant_id = new.tenant_id, kind = %new.kind))]
pub async fn record_payment(db: &DatabaseConnection, new: NewPayment) -> Result<payment::Model> {
    if let Some(key) = &new.idempotency_key {
        let existing = payment::Entity::find()
            .filter(payment::Column::IdempotencyKey.eq(key.clone()))
            .one(db)
            .await?;
        if let Some(row) = existing {
            info!(payment_id = row.id, "idempotency key seen before, replaying");
            return Ok(row);
        }
    }

    let txn = db.begin().await?;

    let obligation =
        crate::resolver::find_obligation(&txn, new.kind, new.reference_id, new.tenant_id)
            .await?
            .ok_or_else(|| {
                LedgerError::validation(
                    "reference_id",
                    format!("no {} with id {}", new.kind, new.reference_id),
                )
            })?;

    if obligation.tenant_id != new.tenant_id {
        return Err(LedgerError::validation(
            "tenant_id",
            format!(
                "{} {} belongs to tenant {}",
                new.kind, new.reference_id, obligation.tenant_id
            ),
        ));
    }

    let (rent_id, monthly_service_id, maintenance_request_id) = obligation.reference_columns();

    let prior = payment::Entity::find()
        .filter(payment::Column::TenantId.eq(new.tenant_id))
        .filter(payment::Column::Kind.eq(new.kind))
        .order_by_asc(payment::Column::Id)
        .all(&txn)
        .await?;

    validate_entry(&obligation, &prior, new.entry, new.amount, new.paid_on)?;

    let balance_after =
        (compute_balance(&obligation, &prior, new.paid_on).balance - new.amount).max(Decimal::ZERO);

    let row = payment::ActiveModel {
        tenant_id: Set(new.tenant_id),
        kind: Set(new.kind),
        rent_id: Set(rent_id),
        monthly_service_id: Set(monthly_service_id),
        maintenance_request_id: Set(maintenance_request_id),
        entry: Set(new.entry),
        amount: Set(new.amount),
        balance_after: Set(balance_after),
        paid_on: Set(new.paid_on),
        idempotency_key: Set(new.idempotency_key.clone()),
        note: Set(new.note.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(payment_id = row.id, %balance_after, "ledger entry recorded");
    Ok(row)
}
