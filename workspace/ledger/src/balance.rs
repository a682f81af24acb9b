use chrono::NaiveDate;
use common::{BalanceSummary, PaymentStatus, TenantBalanceReport};
use model::entities::payment;
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use tracing::{instrument, trace};

use crate::Obligation;
use crate::amount_tolerance;
use crate::error::Result;
use crate::resolver;

/// Compute the balance of a single obligation from the ledger rows that
/// reference it.
///
/// `Payment` rows add to the paid total, `Adjustment` rows are signed and
/// may subtract (a refund or correction). Rows that do not reference the
/// obligation are ignored, so callers may pass a tenant's whole ledger.
///
/// Status derivation:
/// - paid within tolerance of the total -> `Paid`
/// - some money received -> `Partial`
/// - nothing received and `as_of` is past the due date -> `Overdue`
/// - otherwise -> `Pending`
#[instrument(skip(payments), fields(kind = %obligation.kind, id = obligation.id))]
pub fn compute_balance(
    obligation: &Obligation,
    payments: &[payment::Model],
    as_of: NaiveDate,
) -> BalanceSummary {
    let tolerance = amount_tolerance();

    // Adjustment rows carry a signed amount, so a plain sum covers both
    // entry kinds.
    let total_paid: Decimal = payments
        .iter()
        .filter(|p| obligation.matches(p))
        .map(|p| p.amount)
        .sum();

    let outstanding = obligation.total_amount - total_paid;

    let status = if outstanding <= tolerance {
        PaymentStatus::Paid
    } else if total_paid > Decimal::ZERO {
        PaymentStatus::Partial
    } else if as_of > obligation.due_date {
        PaymentStatus::Overdue
    } else {
        PaymentStatus::Pending
    };

    // Overpaid obligations report a zero balance, never a negative one.
    let balance = outstanding.max(Decimal::ZERO);

    trace!(%total_paid, %balance, ?status, "computed obligation balance");

    BalanceSummary {
        kind: obligation.kind,
        obligation_id: obligation.id,
        total_due: obligation.total_amount,
        total_paid,
        balance,
        status,
    }
}

/// Full reconciliation for one tenant: every obligation scored against
/// the tenant's ledger, with grand totals.
#[instrument(skip(db))]
pub async fn tenant_balance_report<C: ConnectionTrait>(
    db: &C,
    tenant_id: i32,
    as_of: NaiveDate,
) -> Result<TenantBalanceReport> {
    let obligations = resolver::obligations_for(db, tenant_id).await?;
    let payments = resolver::payments_for(db, tenant_id).await?;

    let summaries = obligations
        .iter()
        .map(|o| compute_balance(o, &payments, as_of))
        .collect();

    Ok(TenantBalanceReport::new(tenant_id, summaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ledger_row, rent_row};
    use model::entities::payment::{EntryKind, PaymentKind};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn rent_obligation() -> Obligation {
        // 500.00 monthly for 12 months, ending 2025-12-31.
        Obligation::from_rent(&rent_row(
            1,
            7,
            Decimal::new(50000, 2),
            12,
            "2025-01-01",
            "2025-12-31",
        ))
    }

    #[test]
    fn untouched_obligation_is_pending_before_due_date() {
        let summary = compute_balance(&rent_obligation(), &[], date("2025-06-01"));

        assert_eq!(summary.total_paid, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::new(600000, 2));
        assert_eq!(summary.status, PaymentStatus::Pending);
    }

    #[test]
    fn untouched_obligation_turns_overdue_after_due_date() {
        let summary = compute_balance(&rent_obligation(), &[], date("2026-01-01"));
        assert_eq!(summary.status, PaymentStatus::Overdue);
    }

    #[test]
    fn partial_payment_reduces_balance() {
        let rows = vec![ledger_row(
            7,
            PaymentKind::Rent,
            Some(1),
            EntryKind::Payment,
            Decimal::new(200000, 2),
        )];
        let summary = compute_balance(&rent_obligation(), &rows, date("2025-06-01"));

        assert_eq!(summary.total_paid, Decimal::new(200000, 2));
        assert_eq!(summary.balance, Decimal::new(400000, 2));
        assert_eq!(summary.status, PaymentStatus::Partial);
    }

    #[test]
    fn partial_stays_partial_past_due_date() {
        // Money received but not settled; overdue applies only to untouched
        // obligations.
        let rows = vec![ledger_row(
            7,
            PaymentKind::Rent,
            Some(1),
            EntryKind::Payment,
            Decimal::new(100, 2),
        )];
        let summary = compute_balance(&rent_obligation(), &rows, date("2026-02-01"));
        assert_eq!(summary.status, PaymentStatus::Partial);
    }

    #[test]
    fn full_payment_is_paid_within_tolerance() {
        // 0.01 short of the total still counts as settled.
        let rows = vec![ledger_row(
            7,
            PaymentKind::Rent,
            Some(1),
            EntryKind::Payment,
            Decimal::new(599999, 2),
        )];
        let summary = compute_balance(&rent_obligation(), &rows, date("2025-06-01"));

        assert_eq!(summary.status, PaymentStatus::Paid);
        assert_eq!(summary.balance, Decimal::new(1, 2));
    }

    #[test]
    fn adjustment_can_reopen_a_settled_obligation() {
        let rows = vec![
            ledger_row(
                7,
                PaymentKind::Rent,
                Some(1),
                EntryKind::Payment,
                Decimal::new(600000, 2),
            ),
            // Refund of one month.
            ledger_row(
                7,
                PaymentKind::Rent,
                Some(1),
                EntryKind::Adjustment,
                Decimal::new(-50000, 2),
            ),
        ];
        let summary = compute_balance(&rent_obligation(), &rows, date("2025-06-01"));

        assert_eq!(summary.total_paid, Decimal::new(550000, 2));
        assert_eq!(summary.balance, Decimal::new(50000, 2));
        assert_eq!(summary.status, PaymentStatus::Partial);
    }

    #[test]
    fn unrelated_ledger_rows_are_ignored() {
        let rows = vec![
            // Different rent.
            ledger_row(
                7,
                PaymentKind::Rent,
                Some(2),
                EntryKind::Payment,
                Decimal::new(600000, 2),
            ),
            // Different kind, same id.
            ledger_row(
                7,
                PaymentKind::Service,
                None,
                EntryKind::Payment,
                Decimal::new(600000, 2),
            ),
        ];
        let summary = compute_balance(&rent_obligation(), &rows, date("2025-06-01"));
        assert_eq!(summary.total_paid, Decimal::ZERO);
    }
}
