//! Common transport-layer types shared between the backend handlers and the
//! ledger engine. These structs mirror the API payloads so report endpoints
//! and the reconciliation engine agree on one shape for balances and
//! contract standing.

mod balance;
mod contract;

pub use balance::{BalanceSummary, ObligationKind, PaymentStatus, TenantBalanceReport};
pub use contract::{ContractStanding, ContractStatus};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
