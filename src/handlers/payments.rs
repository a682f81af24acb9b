use crate::schemas::{ApiResponse, AppState, ErrorResponse, PaymentListQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use common::ObligationKind;
use ledger::{LedgerError, NewPayment};
use model::entities::payment::{self, EntryKind, PaymentKind};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

/// Ledger entry variant exposed over the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryKind {
    Payment,
    Adjustment,
}

impl From<LedgerEntryKind> for EntryKind {
    fn from(kind: LedgerEntryKind) -> Self {
        match kind {
            LedgerEntryKind::Payment => EntryKind::Payment,
            LedgerEntryKind::Adjustment => EntryKind::Adjustment,
        }
    }
}

impl From<EntryKind> for LedgerEntryKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Payment => LedgerEntryKind::Payment,
            EntryKind::Adjustment => LedgerEntryKind::Adjustment,
        }
    }
}

fn obligation_kind(kind: PaymentKind) -> ObligationKind {
    match kind {
        PaymentKind::Rent => ObligationKind::Rent,
        PaymentKind::Service => ObligationKind::Service,
        PaymentKind::Maintenance => ObligationKind::Maintenance,
    }
}

fn payment_kind(kind: ObligationKind) -> PaymentKind {
    match kind {
        ObligationKind::Rent => PaymentKind::Rent,
        ObligationKind::Service => PaymentKind::Service,
        ObligationKind::Maintenance => PaymentKind::Maintenance,
    }
}

/// Stable rejection code for a refused ledger entry, keyed off the
/// validator's phrasing.
fn rejection_code(reason: &str) -> &'static str {
    if reason.contains("exceeds remaining balance") {
        "EXCEEDS_REMAINING_BALANCE"
    } else if reason.contains("already settled") {
        "BALANCE_ALREADY_ZERO"
    } else if reason.contains("must be positive") {
        "INVALID_AMOUNT"
    } else {
        "VALIDATION_ERROR"
    }
}

/// Request body for appending a ledger entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub tenant_id: i32,
    /// What kind of obligation the entry settles
    pub kind: ObligationKind,
    /// Id of the rent agreement, service bill or maintenance request
    pub reference_id: i32,
    /// Defaults to a regular payment
    pub entry: Option<LedgerEntryKind>,
    pub amount: Decimal,
    /// Defaults to today
    pub paid_on: Option<NaiveDate>,
    /// Client-supplied key making retries safe
    pub idempotency_key: Option<String>,
    pub note: Option<String>,
}

/// Ledger entry response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i32,
    pub tenant_id: i32,
    pub kind: ObligationKind,
    pub rent_id: Option<i32>,
    pub monthly_service_id: Option<i32>,
    pub maintenance_request_id: Option<i32>,
    pub entry: LedgerEntryKind,
    pub amount: Decimal,
    /// Remaining balance of the obligation right after this entry
    pub balance_after: Decimal,
    pub paid_on: NaiveDate,
    pub idempotency_key: Option<String>,
    pub note: Option<String>,
}

impl From<payment::Model> for PaymentResponse {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id,
            tenant_id: model.tenant_id,
            kind: obligation_kind(model.kind),
            rent_id: model.rent_id,
            monthly_service_id: model.monthly_service_id,
            maintenance_request_id: model.maintenance_request_id,
            entry: model.entry.into(),
            amount: model.amount,
            balance_after: model.balance_after,
            paid_on: model.paid_on,
            idempotency_key: model.idempotency_key,
            note: model.note,
        }
    }
}

/// Append a ledger entry
///
/// The ledger is append-only; there is no update or delete. Corrections
/// are submitted as `adjustment` entries. Submitting the same
/// idempotency key twice returns the original entry.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Ledger entry recorded", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Entry rejected by validation", body = ErrorResponse),
        (status = 404, description = "Referenced obligation not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Recording {} payment: tenant {} reference {}",
        request.kind, request.tenant_id, request.reference_id
    );

    let new_payment = NewPayment {
        tenant_id: request.tenant_id,
        kind: payment_kind(request.kind),
        reference_id: request.reference_id,
        entry: request.entry.unwrap_or(LedgerEntryKind::Payment).into(),
        amount: request.amount,
        paid_on: request.paid_on.unwrap_or_else(|| Utc::now().date_naive()),
        idempotency_key: request.idempotency_key,
        note: request.note,
    };

    match ledger::record_payment(&state.db, new_payment).await {
        Ok(row) => {
            state.cache.invalidate_all();
            info!("Ledger entry {} recorded", row.id);
            let response = ApiResponse {
                data: PaymentResponse::from(row),
                message: "Ledger entry recorded".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(LedgerError::Validation { field, reason }) if field == "reference_id" => {
            warn!("Unknown obligation: {}", reason);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("REFERENCE_NOT_FOUND", reason)),
            ))
        }
        Err(LedgerError::Validation { field, reason }) => {
            warn!("Ledger entry rejected on '{}': {}", field, reason);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(rejection_code(&reason), reason)),
            ))
        }
        Err(e) => {
            error!("Failed to record ledger entry: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while recording ledger entry",
                )),
            ))
        }
    }
}

/// List ledger entries, optionally for one tenant
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "payments",
    params(
        ("tenant_id" = Option<i32>, Query, description = "Restrict to one tenant"),
        ("kind" = Option<ObligationKind>, Query, description = "Restrict to one obligation kind"),
    ),
    responses(
        (status = 200, description = "Ledger entries retrieved successfully", body = ApiResponse<Vec<PaymentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_payments(
    Query(query): Query<PaymentListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PaymentResponse>>>, StatusCode> {
    let mut select = payment::Entity::find().order_by_asc(payment::Column::Id);
    if let Some(tenant_id) = query.tenant_id {
        select = select.filter(payment::Column::TenantId.eq(tenant_id));
    }
    if let Some(kind) = query.kind {
        select = select.filter(payment::Column::Kind.eq(payment_kind(kind)));
    }

    match select.all(&state.db).await {
        Ok(payments) => {
            debug!("Retrieved {} ledger entries", payments.len());
            let response = ApiResponse {
                data: payments.into_iter().map(PaymentResponse::from).collect(),
                message: "Ledger entries retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve ledger entries: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific ledger entry by ID
#[utoipa::path(
    get,
    path = "/api/v1/payments/{payment_id}",
    tag = "payments",
    params(
        ("payment_id" = i32, Path, description = "Ledger entry ID"),
    ),
    responses(
        (status = 200, description = "Ledger entry retrieved successfully", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Ledger entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_payment(
    Path(payment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PaymentResponse>>, StatusCode> {
    match payment::Entity::find_by_id(payment_id).one(&state.db).await {
        Ok(Some(payment_model)) => {
            let response = ApiResponse {
                data: PaymentResponse::from(payment_model),
                message: "Ledger entry retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Ledger entry with ID {} not found", payment_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve ledger entry {}: {}", payment_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
