use chrono::NaiveDate;
use model::entities::payment;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::amount_tolerance;
use crate::balance::compute_balance;
use crate::error::{LedgerError, Result};
use crate::Obligation;

/// Validate a prospective ledger entry against the obligation it targets
/// and the rows already recorded for it.
///
/// `Payment` entries must be positive, must target an unsettled obligation
/// and must not push the paid total past the amount owed. `Adjustment`
/// entries are signed and may take any value that keeps the cumulative
/// paid total within `[0, total_due]` (plus tolerance on both ends).
#[instrument(skip(existing), fields(kind = %obligation.kind, id = obligation.id))]
pub fn validate_entry(
    obligation: &Obligation,
    existing: &[payment::Model],
    entry: payment::EntryKind,
    amount: Decimal,
    as_of: NaiveDate,
) -> Result<()> {
    let tolerance = amount_tolerance();
    let summary = compute_balance(obligation, existing, as_of);

    match entry {
        payment::EntryKind::Payment => {
            if amount <= Decimal::ZERO {
                return Err(LedgerError::validation(
                    "amount",
                    "payment amount must be positive",
                ));
            }
            if summary.balance <= Decimal::ZERO {
                return Err(LedgerError::validation(
                    "amount",
                    format!("{} {} is already settled", obligation.kind, obligation.id),
                ));
            }
            if amount > summary.balance + tolerance {
                return Err(LedgerError::validation(
                    "amount",
                    format!(
                        "amount {} exceeds remaining balance {}",
                        amount, summary.balance
                    ),
                ));
            }
        }
        payment::EntryKind::Adjustment => {
            let after = summary.total_paid + amount;
            if after < -tolerance || after > obligation.total_amount + tolerance {
                return Err(LedgerError::validation(
                    "amount",
                    format!(
                        "adjustment would move paid total to {}, outside 0..{}",
                        after, obligation.total_amount
                    ),
                ));
            }
        }
    }

    debug!(%amount, balance = %summary.balance, "ledger entry accepted");
    Ok(())
}

/// A rent agreement's stored total must equal its monthly rate times the
/// agreed number of months. Checked at creation and again on every edit.
pub fn validate_rent_terms(
    monthly_rent: Decimal,
    months: i32,
    total_rent: Decimal,
) -> Result<()> {
    if months <= 0 {
        return Err(LedgerError::validation("months", "must be at least 1"));
    }
    if monthly_rent <= Decimal::ZERO {
        return Err(LedgerError::validation("monthly_rent", "must be positive"));
    }
    let expected = monthly_rent * Decimal::from(months);
    if (total_rent - expected).abs() > amount_tolerance() {
        return Err(LedgerError::validation(
            "total_rent",
            format!("expected {} ({} x {})", expected, monthly_rent, months),
        ));
    }
    Ok(())
}

/// A service bill's stored total must equal the sum of its components.
pub fn validate_service_components(
    water_total: Decimal,
    electricity_total: Decimal,
    trash_fee: Decimal,
    maintenance_fee: Decimal,
    total_amount: Decimal,
) -> Result<()> {
    for (field, value) in [
        ("water_total", water_total),
        ("electricity_total", electricity_total),
        ("trash_fee", trash_fee),
        ("maintenance_fee", maintenance_fee),
    ] {
        if value < Decimal::ZERO {
            return Err(LedgerError::validation(field, "must not be negative"));
        }
    }
    let expected = water_total + electricity_total + trash_fee + maintenance_fee;
    if (total_amount - expected).abs() > amount_tolerance() {
        return Err(LedgerError::validation(
            "total_amount",
            format!("expected component sum {}", expected),
        ));
    }
    Ok(())
}

/// A maintenance request's total must equal the sum of its line-item
/// price snapshots.
pub fn validate_maintenance_total(line_prices: &[Decimal], total_price: Decimal) -> Result<()> {
    if line_prices.is_empty() {
        return Err(LedgerError::validation(
            "issues",
            "a request needs at least one issue",
        ));
    }
    let expected: Decimal = line_prices.iter().copied().sum();
    if (total_price - expected).abs() > amount_tolerance() {
        return Err(LedgerError::validation(
            "total_price",
            format!("expected line-item sum {}", expected),
        ));
    }
    Ok(())
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
        Obligation::from_rent(&rent_row(
            1,
            7,
            Decimal::new(50000, 2),
            12,
            "2025-01-01",
            "2025-12-31",
        ))
    }

    fn paid(amount: Decimal) -> payment::Model {
        ledger_row(7, PaymentKind::Rent, Some(1), EntryKind::Payment, amount)
    }

    #[test]
    fn accepts_payment_within_balance() {
        let result = validate_entry(
            &rent_obligation(),
            &[],
            EntryKind::Payment,
            Decimal::new(100000, 2),
            date("2025-06-01"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_non_positive_payment() {
        let err = validate_entry(
            &rent_obligation(),
            &[],
            EntryKind::Payment,
            Decimal::ZERO,
            date("2025-06-01"),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "amount", .. }));
    }

    #[test]
    fn rejects_overpayment() {
        let existing = vec![paid(Decimal::new(500000, 2))];
        let err = validate_entry(
            &rent_obligation(),
            &existing,
            EntryKind::Payment,
            Decimal::new(200000, 2),
            date("2025-06-01"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds remaining balance"));
    }

    #[test]
    fn rejects_payment_against_settled_obligation() {
        let existing = vec![paid(Decimal::new(600000, 2))];
        let err = validate_entry(
            &rent_obligation(),
            &existing,
            EntryKind::Payment,
            Decimal::new(100, 2),
            date("2025-06-01"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("already settled"));
    }

    #[test]
    fn allows_exact_settlement_within_tolerance() {
        let existing = vec![paid(Decimal::new(599999, 2))];
        // One cent over the mathematical remainder, inside tolerance.
        let result = validate_entry(
            &rent_obligation(),
            &existing,
            EntryKind::Payment,
            Decimal::new(2, 2),
            date("2025-06-01"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn adjustment_may_refund_but_not_below_zero() {
        let existing = vec![paid(Decimal::new(100000, 2))];

        let refund = validate_entry(
            &rent_obligation(),
            &existing,
            EntryKind::Adjustment,
            Decimal::new(-100000, 2),
            date("2025-06-01"),
        );
        assert!(refund.is_ok());

        let too_deep = validate_entry(
            &rent_obligation(),
            &existing,
            EntryKind::Adjustment,
            Decimal::new(-100002, 2),
            date("2025-06-01"),
        );
        assert!(too_deep.is_err());
    }

    #[test]
    fn rent_terms_must_multiply_out() {
        assert!(validate_rent_terms(Decimal::new(50000, 2), 12, Decimal::new(600000, 2)).is_ok());
        // One cent of rounding slack is accepted, two cents is not.
        assert!(validate_rent_terms(Decimal::new(50000, 2), 12, Decimal::new(600001, 2)).is_ok());
        assert!(validate_rent_terms(Decimal::new(50000, 2), 12, Decimal::new(600002, 2)).is_err());
        assert!(validate_rent_terms(Decimal::new(50000, 2), 0, Decimal::ZERO).is_err());
    }

    #[test]
    fn service_components_must_sum() {
        let ok = validate_service_components(
            Decimal::new(3050, 2),
            Decimal::new(8000, 2),
            Decimal::new(1000, 2),
            Decimal::ZERO,
            Decimal::new(12050, 2),
        );
        assert!(ok.is_ok());

        let off = validate_service_components(
            Decimal::new(3050, 2),
            Decimal::new(8000, 2),
            Decimal::new(1000, 2),
            Decimal::ZERO,
            Decimal::new(12000, 2),
        );
        assert!(off.is_err());
    }

    #[test]
    fn maintenance_total_must_match_snapshots() {
        let prices = [Decimal::new(2500, 2), Decimal::new(7500, 2)];
        assert!(validate_maintenance_total(&prices, Decimal::new(10000, 2)).is_ok());
        assert!(validate_maintenance_total(&prices, Decimal::new(9000, 2)).is_err());
        assert!(validate_maintenance_total(&[], Decimal::ZERO).is_err());
    }
}
