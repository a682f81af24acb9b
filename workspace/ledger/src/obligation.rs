use chrono::NaiveDate;
use common::ObligationKind;
use model::entities::{maintenance_request, monthly_service, payment, rent};
use rust_decimal::Decimal;

/// Uniform representation of any chargeable obligation, so the balance
/// calculator never special-cases rent vs. service vs. maintenance.
///
/// Construction is a pure mapping from the three source entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Obligation {
    pub kind: ObligationKind,
    /// Id of the underlying rent / service / maintenance row.
    pub id: i32,
    pub tenant_id: i32,
    pub total_amount: Decimal,
    /// Date after which an unpaid obligation counts as overdue: the rent
    /// end date, the service billing month, or the request date.
    pub due_date: NaiveDate,
}

impl Obligation {
    pub fn from_rent(rent: &rent::Model) -> Self {
        Self {
            kind: ObligationKind::Rent,
            id: rent.id,
            tenant_id: rent.tenant_id,
            total_amount: rent.total_rent,
            due_date: rent.end_date,
        }
    }

    /// Service bills are stored per room; the owing tenant comes from the
    /// rent agreement the caller resolved.
    pub fn from_service(service: &monthly_service::Model, tenant_id: i32) -> Self {
        Self {
            kind: ObligationKind::Service,
            id: service.id,
            tenant_id,
            total_amount: service.total_amount,
            due_date: service.month,
        }
    }

    pub fn from_maintenance(request: &maintenance_request::Model) -> Self {
        Self {
            kind: ObligationKind::Maintenance,
            id: request.id,
            tenant_id: request.tenant_id,
            total_amount: request.total_price,
            due_date: request.requested_on,
        }
    }

    /// Whether a ledger row settles this obligation. Matching is strictly
    /// by kind and the explicit foreign key; two rents with an identical
    /// monthly rent can never have their payments merged.
    pub fn matches(&self, payment: &payment::Model) -> bool {
        match self.kind {
            ObligationKind::Rent => {
                payment.kind == payment::PaymentKind::Rent && payment.rent_id == Some(self.id)
            }
            ObligationKind::Service => {
                payment.kind == payment::PaymentKind::Service
                    && payment.monthly_service_id == Some(self.id)
            }
            ObligationKind::Maintenance => {
                payment.kind == payment::PaymentKind::Maintenance
                    && payment.maintenance_request_id == Some(self.id)
            }
        }
    }

    /// The entity-level tag to store on a ledger row for this obligation.
    pub fn payment_kind(&self) -> payment::PaymentKind {
        match self.kind {
            ObligationKind::Rent => payment::PaymentKind::Rent,
            ObligationKind::Service => payment::PaymentKind::Service,
            ObligationKind::Maintenance => payment::PaymentKind::Maintenance,
        }
    }

    /// The `(rent_id, monthly_service_id, maintenance_request_id)` triple
    /// to store on a ledger row; exactly one is set.
    pub fn reference_columns(&self) -> (Option<i32>, Option<i32>, Option<i32>) {
        match self.kind {
            ObligationKind::Rent => (Some(self.id), None, None),
            ObligationKind::Service => (None, Some(self.id), None),
            ObligationKind::Maintenance => (None, None, Some(self.id)),
        }
    }
}
