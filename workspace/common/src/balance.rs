use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The kind of chargeable obligation a payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    /// A rent agreement (the whole lease term).
    Rent,
    /// A monthly utility service bill.
    Service,
    /// A maintenance request.
    Maintenance,
}

impl std::fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObligationKind::Rent => write!(f, "rent"),
            ObligationKind::Service => write!(f, "service"),
            ObligationKind::Maintenance => write!(f, "maintenance"),
        }
    }
}

/// Aggregate payment status of one obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No payments recorded yet.
    Pending,
    /// Some, but not all, of the total has been paid.
    Partial,
    /// The remaining balance is zero (within tolerance).
    Paid,
    /// Not fully paid and the due date has passed.
    Overdue,
}

/// The computed balance view of one obligation.
///
/// `balance` is clamped at zero: an overpaid obligation reports a zero
/// balance, never a negative one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BalanceSummary {
    /// Which kind of obligation this summary describes.
    pub kind: ObligationKind,
    /// Id of the underlying rent / service / maintenance record.
    pub obligation_id: i32,
    /// Total amount owed for the obligation.
    pub total_due: Decimal,
    /// Sum of all ledger entries recorded against the obligation.
    pub total_paid: Decimal,
    /// Remaining unpaid amount, never negative.
    pub balance: Decimal,
    /// Derived status.
    pub status: PaymentStatus,
}

/// Per-tenant roll-up of all open obligations, served by the report
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TenantBalanceReport {
    pub tenant_id: i32,
    /// One summary per open obligation.
    pub obligations: Vec<BalanceSummary>,
    /// Sum of `total_due` across obligations.
    pub total_due: Decimal,
    /// Sum of `total_paid` across obligations.
    pub total_paid: Decimal,
    /// Sum of `balance` across obligations.
    pub outstanding: Decimal,
}

impl TenantBalanceReport {
    /// Builds the roll-up from individual summaries.
    pub fn new(tenant_id: i32, obligations: Vec<BalanceSummary>) -> Self {
        let total_due = obligations.iter().map(|o| o.total_due).sum();
        let total_paid = obligations.iter().map(|o| o.total_paid).sum();
        let outstanding = obligations.iter().map(|o| o.balance).sum();
        Self {
            tenant_id,
            obligations,
            total_due,
            total_paid,
            outstanding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_sums_obligations() {
        let report = TenantBalanceReport::new(
            7,
            vec![
                BalanceSummary {
                    kind: ObligationKind::Rent,
                    obligation_id: 1,
                    total_due: Decimal::new(120000, 2),
                    total_paid: Decimal::new(50000, 2),
                    balance: Decimal::new(70000, 2),
                    status: PaymentStatus::Partial,
                },
                BalanceSummary {
                    kind: ObligationKind::Service,
                    obligation_id: 3,
                    total_due: Decimal::new(4000, 2),
                    total_paid: Decimal::ZERO,
                    balance: Decimal::new(4000, 2),
                    status: PaymentStatus::Pending,
                },
            ],
        );

        assert_eq!(report.total_due, Decimal::new(124000, 2));
        assert_eq!(report.total_paid, Decimal::new(50000, 2));
        assert_eq!(report.outstanding, Decimal::new(74000, 2));
    }

    #[test]
    fn obligation_kind_round_trips_through_json() {
        let json = serde_json::to_string(&ObligationKind::Service).unwrap();
        assert_eq!(json, "\"service\"");
        let back: ObligationKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ObligationKind::Service);
    }
}
