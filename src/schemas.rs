use chrono::NaiveDate;
use common::{
    BalanceSummary, ContractStanding, ContractStatus, ObligationKind, PaymentStatus,
    TenantBalanceReport,
};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for report endpoints
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Outstanding(Vec<TenantBalanceReport>),
    Expiring(Vec<ContractStanding>),
}

/// Query parameters for balance and expiry endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct AsOfQuery {
    /// Reference date for the calculation (YYYY-MM-DD), defaults to today
    pub as_of: Option<NaiveDate>,
}

/// Query parameters for listing ledger entries
#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentListQuery {
    /// Restrict the listing to one tenant
    pub tenant_id: Option<i32>,
    /// Restrict the listing to one obligation kind
    pub kind: Option<ObligationKind>,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::payments::create_payment,
        crate::handlers::payments::get_payments,
        crate::handlers::payments::get_payment,
        crate::handlers::reports::get_tenant_balance,
        crate::handlers::reports::get_outstanding_report,
        crate::handlers::rents::get_expiring_rents,
    ),
    components(
        schemas(
            ApiResponse<TenantBalanceReport>,
            ApiResponse<Vec<TenantBalanceReport>>,
            ApiResponse<Vec<ContractStanding>>,
            ApiResponse<crate::handlers::payments::PaymentResponse>,
            ApiResponse<Vec<crate::handlers::payments::PaymentResponse>>,
            ErrorResponse,
            HealthResponse,
            AsOfQuery,
            PaymentListQuery,
            ObligationKind,
            PaymentStatus,
            BalanceSummary,
            TenantBalanceReport,
            ContractStatus,
            ContractStanding,
            crate::handlers::payments::CreatePaymentRequest,
            crate::handlers::payments::PaymentResponse,
            crate::handlers::payments::LedgerEntryKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Administrator account endpoints"),
        (name = "houses", description = "House management endpoints"),
        (name = "rooms", description = "Room management endpoints"),
        (name = "tenants", description = "Tenant management endpoints"),
        (name = "rents", description = "Rent agreement endpoints"),
        (name = "monthly-services", description = "Monthly service bill endpoints"),
        (name = "maintenance", description = "Maintenance issue and request endpoints"),
        (name = "payments", description = "Payment ledger endpoints"),
        (name = "reports", description = "Balance and outstanding report endpoints"),
    ),
    info(
        title = "RentRust API",
        description = "Rental property management API with a reconciled payment ledger",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
