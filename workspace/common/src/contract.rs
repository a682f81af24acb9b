use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification of a rent agreement relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// End date is more than one month away.
    Active,
    /// End date falls within the next month but has not passed.
    ExpiringSoon,
    /// End date is strictly in the past. A contract ending exactly on the
    /// reference date is not expired.
    Expired,
}

/// Result of classifying one rent agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContractStanding {
    pub rent_id: i32,
    pub tenant_id: i32,
    pub end_date: NaiveDate,
    pub status: ContractStatus,
    /// Days until the end date; negative once it has passed, zero on the
    /// end date itself.
    pub days_remaining: i64,
}
