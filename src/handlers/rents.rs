use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, AsOfQuery, CachedData, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Days, Months, NaiveDate, Utc};
use common::{ContractStanding, ContractStatus};
use ledger::validator::validate_rent_terms;
use model::entities::room::{self, RoomStatus};
use model::entities::rent;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for creating a new rent agreement
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateRentRequest {
    pub tenant_id: i32,
    pub room_id: i32,
    /// Agreed monthly rent
    pub monthly_rent: Decimal,
    /// Number of months the agreement runs
    pub months: i32,
    /// Total over the whole term; derived from the monthly rent when
    /// omitted, validated against it when supplied
    pub total_rent: Option<Decimal>,
    pub start_date: NaiveDate,
    /// Last day of the agreement; derived from the start and term when
    /// omitted
    pub end_date: Option<NaiveDate>,
    /// URL of the signed contract document
    pub contract_url: Option<String>,
}

/// Request body for updating a rent agreement
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateRentRequest {
    pub monthly_rent: Option<Decimal>,
    pub months: Option<i32>,
    pub total_rent: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub contract_url: Option<String>,
}

/// Rent agreement response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RentResponse {
    pub id: i32,
    pub tenant_id: i32,
    pub room_id: i32,
    pub monthly_rent: Decimal,
    pub months: i32,
    pub total_rent: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub contract_url: Option<String>,
}

impl From<rent::Model> for RentResponse {
    fn from(model: rent::Model) -> Self {
        Self {
            id: model.id,
            tenant_id: model.tenant_id,
            room_id: model.room_id,
            monthly_rent: model.monthly_rent,
            months: model.months,
            total_rent: model.total_rent,
            start_date: model.start_date,
            end_date: model.end_date,
            contract_url: model.contract_url,
        }
    }
}

fn derived_end_date(start: NaiveDate, months: i32) -> NaiveDate {
    (start + Months::new(months.max(0) as u32)) - Days::new(1)
}

/// Create a new rent agreement
///
/// The room is flipped to occupied in the same transaction.
#[utoipa::path(
    post,
    path = "/api/v1/rents",
    tag = "rents",
    request_body = CreateRentRequest,
    responses(
        (status = 201, description = "Rent agreement created successfully", body = ApiResponse<RentResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_rent(
    State(state): State<AppState>,
    Json(request): Json<CreateRentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RentResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!(
        "Creating rent agreement: tenant {} room {}",
        request.tenant_id, request.room_id
    );

    let total_rent = request
        .total_rent
        .unwrap_or_else(|| request.monthly_rent * Decimal::from(request.months));
    if let Err(e) = validate_rent_terms(request.monthly_rent, request.months, total_rent) {
        warn!("Invalid rent terms: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
        ));
    }
    let end_date = request
        .end_date
        .unwrap_or_else(|| derived_end_date(request.start_date, request.months));
    if end_date < request.start_date {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "VALIDATION_ERROR",
                "end_date precedes start_date",
            )),
        ));
    }

    let txn = match state.db.begin().await {
        Ok(txn) => txn,
        Err(db_error) => {
            error!("Failed to open transaction: {}", db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    let insert_result = rent::ActiveModel {
        tenant_id: Set(request.tenant_id),
        room_id: Set(request.room_id),
        monthly_rent: Set(request.monthly_rent),
        months: Set(request.months),
        total_rent: Set(total_rent),
        start_date: Set(request.start_date),
        end_date: Set(end_date),
        contract_url: Set(request.contract_url),
        ..Default::default()
    }
    .insert(&txn)
    .await;

    let rent_model = match insert_result {
        Ok(model) => model,
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Rent references missing tenant or room: {}", db_error);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "REFERENCE_NOT_FOUND",
                    "Tenant or room does not exist",
                )),
            ));
        }
        Err(db_error) => {
            error!("Failed to create rent agreement: {}", db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    let occupy = room::ActiveModel {
        id: Set(rent_model.room_id),
        status: Set(RoomStatus::Occupied),
        ..Default::default()
    }
    .update(&txn)
    .await;

    if let Err(db_error) = occupy {
        error!("Failed to mark room occupied: {}", db_error);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
        ));
    }

    if let Err(db_error) = txn.commit().await {
        error!("Failed to commit rent creation: {}", db_error);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
        ));
    }

    state.cache.invalidate_all();
    info!("Rent agreement created with ID: {}", rent_model.id);
    let response = ApiResponse {
        data: RentResponse::from(rent_model),
        message: "Rent agreement created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all rent agreements
#[utoipa::path(
    get,
    path = "/api/v1/rents",
    tag = "rents",
    responses(
        (status = 200, description = "Rent agreements retrieved successfully", body = ApiResponse<Vec<RentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_rents(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RentResponse>>>, StatusCode> {
    match rent::Entity::find().all(&state.db).await {
        Ok(rents) => {
            debug!("Retrieved {} rent agreements", rents.len());
            let response = ApiResponse {
                data: rents.into_iter().map(RentResponse::from).collect(),
                message: "Rent agreements retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve rent agreements: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific rent agreement by ID
#[utoipa::path(
    get,
    path = "/api/v1/rents/{rent_id}",
    tag = "rents",
    params(
        ("rent_id" = i32, Path, description = "Rent agreement ID"),
    ),
    responses(
        (status = 200, description = "Rent agreement retrieved successfully", body = ApiResponse<RentResponse>),
        (status = 404, description = "Rent agreement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_rent(
    Path(rent_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RentResponse>>, StatusCode> {
    match rent::Entity::find_by_id(rent_id).one(&state.db).await {
        Ok(Some(rent_model)) => {
            let response = ApiResponse {
                data: RentResponse::from(rent_model),
                message: "Rent agreement retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Rent agreement with ID {} not found", rent_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve rent agreement {}: {}", rent_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a rent agreement
///
/// The term invariant (total = monthly x months) is re-checked with the
/// resulting values; the total is re-derived when the terms change and no
/// explicit total is supplied.
#[utoipa::path(
    put,
    path = "/api/v1/rents/{rent_id}",
    tag = "rents",
    params(
        ("rent_id" = i32, Path, description = "Rent agreement ID"),
    ),
    request_body = UpdateRentRequest,
    responses(
        (status = 200, description = "Rent agreement updated successfully", body = ApiResponse<RentResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Rent agreement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_rent(
    Path(rent_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateRentRequest>,
) -> Result<Json<ApiResponse<RentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let existing = match rent::Entity::find_by_id(rent_id).one(&state.db).await {
        Ok(Some(rent)) => rent,
        Ok(None) => {
            warn!("Rent agreement with ID {} not found for update", rent_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "RENT_NOT_FOUND",
                    format!("Rent agreement {} not found", rent_id),
                )),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup rent agreement {}: {}", rent_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    let monthly_rent = request.monthly_rent.unwrap_or(existing.monthly_rent);
    let months = request.months.unwrap_or(existing.months);
    let terms_changed = monthly_rent != existing.monthly_rent || months != existing.months;
    let total_rent = match request.total_rent {
        Some(total) => total,
        None if terms_changed => monthly_rent * Decimal::from(months),
        None => existing.total_rent,
    };

    if let Err(e) = validate_rent_terms(monthly_rent, months, total_rent) {
        warn!("Invalid rent terms on update: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
        ));
    }

    let start_date = request.start_date.unwrap_or(existing.start_date);
    let end_date = request.end_date.unwrap_or(existing.end_date);
    if end_date < start_date {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "VALIDATION_ERROR",
                "end_date precedes start_date",
            )),
        ));
    }

    let mut rent_active: rent::ActiveModel = existing.into();
    rent_active.monthly_rent = Set(monthly_rent);
    rent_active.months = Set(months);
    rent_active.total_rent = Set(total_rent);
    rent_active.start_date = Set(start_date);
    rent_active.end_date = Set(end_date);
    if let Some(contract_url) = request.contract_url {
        rent_active.contract_url = Set(Some(contract_url));
    }

    match rent_active.update(&state.db).await {
        Ok(updated) => {
            state.cache.invalidate_all();
            info!("Rent agreement with ID {} updated", rent_id);
            let response = ApiResponse {
                data: RentResponse::from(updated),
                message: "Rent agreement updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update rent agreement {}: {}", rent_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ))
        }
    }
}

/// Delete a rent agreement
///
/// Refused while ledger entries reference the agreement. The room is
/// released back to available.
#[utoipa::path(
    delete,
    path = "/api/v1/rents/{rent_id}",
    tag = "rents",
    params(
        ("rent_id" = i32, Path, description = "Rent agreement ID"),
    ),
    responses(
        (status = 200, description = "Rent agreement deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Rent agreement not found", body = ErrorResponse),
        (status = 409, description = "Rent agreement has ledger entries", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_rent(
    Path(rent_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    let existing = match rent::Entity::find_by_id(rent_id).one(&state.db).await {
        Ok(Some(rent)) => rent,
        Ok(None) => {
            warn!("Rent agreement with ID {} not found for deletion", rent_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "RENT_NOT_FOUND",
                    format!("Rent agreement {} not found", rent_id),
                )),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup rent agreement {}: {}", rent_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    let txn = match state.db.begin().await {
        Ok(txn) => txn,
        Err(db_error) => {
            error!("Failed to open transaction: {}", db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    match rent::Entity::delete_by_id(rent_id).exec(&txn).await {
        Ok(_) => {}
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Rent agreement {} still referenced: {}", rent_id, db_error);
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "RENT_HAS_PAYMENTS",
                    "Rent agreement has ledger entries",
                )),
            ));
        }
        Err(db_error) => {
            error!("Failed to delete rent agreement {}: {}", rent_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    }

    let release = room::ActiveModel {
        id: Set(existing.room_id),
        status: Set(RoomStatus::Available),
        ..Default::default()
    }
    .update(&txn)
    .await;
    if let Err(db_error) = release {
        error!("Failed to release room: {}", db_error);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
        ));
    }

    if let Err(db_error) = txn.commit().await {
        error!("Failed to commit rent deletion: {}", db_error);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
        ));
    }

    state.cache.invalidate_all();
    info!("Rent agreement with ID {} deleted", rent_id);
    let response = ApiResponse {
        data: format!("Rent agreement {} deleted", rent_id),
        message: "Rent agreement deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// List contracts that are expired or about to expire
///
/// Classifies every agreement against the reference date and returns the
/// ones that are not comfortably active.
#[utoipa::path(
    get,
    path = "/api/v1/rents/expiring",
    tag = "rents",
    params(
        ("as_of" = Option<NaiveDate>, Query, description = "Reference date (YYYY-MM-DD), defaults to today"),
    ),
    responses(
        (status = 200, description = "Expiring contracts retrieved successfully", body = ApiResponse<Vec<ContractStanding>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expiring_rents(
    Query(query): Query<AsOfQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ContractStanding>>>, StatusCode> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let cache_key = format!("expiring:{}", as_of);

    if let Some(CachedData::Expiring(standings)) = state.cache.get(&cache_key).await {
        debug!("Returning cached expiring contracts for {}", as_of);
        return Ok(Json(ApiResponse {
            data: standings,
            message: "Expiring contracts retrieved successfully".to_string(),
            success: true,
        }));
    }

    let rents = match rent::Entity::find().all(&state.db).await {
        Ok(rents) => rents,
        Err(db_error) => {
            error!("Failed to retrieve rent agreements: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let standings: Vec<ContractStanding> = rents
        .iter()
        .map(|rent| ledger::classify_contract(rent, as_of))
        .filter(|standing| standing.status != ContractStatus::Active)
        .collect();

    state
        .cache
        .insert(cache_key, CachedData::Expiring(standings.clone()))
        .await;

    let response = ApiResponse {
        data: standings,
        message: "Expiring contracts retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Resolve which agreement a tenant's activity on a date belongs to
///
/// Agreements whose window contains the date win; a tenant with no
/// agreements at all resolves to null data, not an error.
#[utoipa::path(
    get,
    path = "/api/v1/tenants/{tenant_id}/active-rent",
    tag = "rents",
    params(
        ("tenant_id" = i32, Path, description = "Tenant ID"),
        ("as_of" = Option<NaiveDate>, Query, description = "Reference date (YYYY-MM-DD), defaults to today"),
    ),
    responses(
        (status = 200, description = "Active rent resolved", body = ApiResponse<Option<RentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_active_rent(
    Path(tenant_id): Path<i32>,
    Query(query): Query<AsOfQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<RentResponse>>>, StatusCode> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    match ledger::resolver::resolve_active_rent(&state.db, tenant_id, as_of).await {
        Ok(rent) => {
            debug!(resolved = rent.is_some(), "active rent lookup");
            Ok(Json(ApiResponse {
                data: rent.map(RentResponse::from),
                message: "Active rent resolved".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            error!("Failed to resolve active rent for tenant {}: {}", tenant_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
