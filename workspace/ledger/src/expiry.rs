use chrono::{Months, NaiveDate};
use common::{ContractStanding, ContractStatus};
use model::entities::rent;
use tracing::instrument;

/// Classify a rent agreement relative to a reference date.
///
/// An agreement is `Expired` strictly after its end date, `ExpiringSoon`
/// when the end date falls within the next calendar month, and `Active`
/// otherwise. A contract ending today is expiring, never expired.
#[instrument(fields(rent_id = rent.id))]
pub fn classify_contract(rent: &rent::Model, as_of: NaiveDate) -> ContractStanding {
    let status = if rent.end_date < as_of {
        ContractStatus::Expired
    } else if rent.end_date < as_of + Months::new(1) {
        ContractStatus::ExpiringSoon
    } else {
        ContractStatus::Active
    };

    ContractStanding {
        rent_id: rent.id,
        tenant_id: rent.tenant_id,
        end_date: rent.end_date,
        status,
        days_remaining: (rent.end_date - as_of).num_days(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::rent_row;
    use rust_decimal::Decimal;

    fn rent_ending(end: &str) -> rent::Model {
        rent_row(1, 7, Decimal::new(50000, 2), 12, "2024-04-01", end)
    }

    fn classify(end: &str, as_of: &str) -> ContractStanding {
        classify_contract(&rent_ending(end), as_of.parse().unwrap())
    }

    #[test]
    fn past_end_date_is_expired() {
        let standing = classify("2025-03-14", "2025-03-15");
        assert_eq!(standing.status, ContractStatus::Expired);
        assert_eq!(standing.days_remaining, -1);
    }

    #[test]
    fn ending_today_is_expiring_not_expired() {
        let standing = classify("2025-03-15", "2025-03-15");
        assert_eq!(standing.status, ContractStatus::ExpiringSoon);
        assert_eq!(standing.days_remaining, 0);
    }

    #[test]
    fn within_a_month_is_expiring() {
        let standing = classify("2025-04-13", "2025-03-15");
        assert_eq!(standing.status, ContractStatus::ExpiringSoon);
        assert_eq!(standing.days_remaining, 29);
    }

    #[test]
    fn boundary_uses_calendar_month_not_thirty_days() {
        // 2025-03-15 + one calendar month is 2025-04-15; the 15th itself is
        // the first day that is no longer "soon".
        assert_eq!(classify("2025-04-14", "2025-03-15").status, ContractStatus::ExpiringSoon);
        assert_eq!(classify("2025-04-15", "2025-03-15").status, ContractStatus::Active);
    }

    #[test]
    fn month_end_window_is_calendar_based() {
        // From Feb 1 the window closes on Mar 1, not Feb 1 + 30 days; an
        // agreement ending Mar 2 (29 days out) is still active.
        assert_eq!(classify("2025-03-02", "2025-02-01").status, ContractStatus::Active);
        assert_eq!(classify("2025-02-28", "2025-02-01").status, ContractStatus::ExpiringSoon);
    }

    #[test]
    fn far_future_is_active() {
        let standing = classify("2026-03-15", "2025-03-15");
        assert_eq!(standing.status, ContractStatus::Active);
        assert_eq!(standing.days_remaining, 365);
    }
}
