use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Datelike, NaiveDate};
use ledger::validator::validate_service_components;
use model::entities::monthly_service;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for creating a monthly service bill
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateMonthlyServiceRequest {
    pub room_id: i32,
    /// Billing month; any day within the month is accepted and normalized
    /// to the first
    pub month: NaiveDate,
    pub water_total: Decimal,
    pub electricity_total: Decimal,
    pub trash_fee: Decimal,
    pub maintenance_fee: Decimal,
    /// Derived from the components when omitted, validated against them
    /// when supplied
    pub total_amount: Option<Decimal>,
}

/// Request body for updating a monthly service bill
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateMonthlyServiceRequest {
    pub water_total: Option<Decimal>,
    pub electricity_total: Option<Decimal>,
    pub trash_fee: Option<Decimal>,
    pub maintenance_fee: Option<Decimal>,
    pub total_amount: Option<Decimal>,
}

/// Monthly service bill response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyServiceResponse {
    pub id: i32,
    pub room_id: i32,
    pub month: NaiveDate,
    pub water_total: Decimal,
    pub electricity_total: Decimal,
    pub trash_fee: Decimal,
    pub maintenance_fee: Decimal,
    pub total_amount: Decimal,
}

impl From<monthly_service::Model> for MonthlyServiceResponse {
    fn from(model: monthly_service::Model) -> Self {
        Self {
            id: model.id,
            room_id: model.room_id,
            month: model.month,
            water_total: model.water_total,
            electricity_total: model.electricity_total,
            trash_fee: model.trash_fee,
            maintenance_fee: model.maintenance_fee,
            total_amount: model.total_amount,
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Create a monthly service bill
///
/// One bill per room and month; a second submission for the same month is
/// rejected with a conflict.
#[utoipa::path(
    post,
    path = "/api/v1/monthly-services",
    tag = "monthly-services",
    request_body = CreateMonthlyServiceRequest,
    responses(
        (status = 201, description = "Service bill created successfully", body = ApiResponse<MonthlyServiceResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Bill already exists for this room and month", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_monthly_service(
    State(state): State<AppState>,
    Json(request): Json<CreateMonthlyServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MonthlyServiceResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    debug!(
        "Creating service bill: room {} month {}",
        request.room_id, request.month
    );

    let total_amount = request.total_amount.unwrap_or(
        request.water_total + request.electricity_total + request.trash_fee
            + request.maintenance_fee,
    );
    if let Err(e) = validate_service_components(
        request.water_total,
        request.electricity_total,
        request.trash_fee,
        request.maintenance_fee,
        total_amount,
    ) {
        warn!("Invalid service bill: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
        ));
    }

    let new_service = monthly_service::ActiveModel {
        room_id: Set(request.room_id),
        month: Set(first_of_month(request.month)),
        water_total: Set(request.water_total),
        electricity_total: Set(request.electricity_total),
        trash_fee: Set(request.trash_fee),
        maintenance_fee: Set(request.maintenance_fee),
        total_amount: Set(total_amount),
        ..Default::default()
    };

    match new_service.insert(&state.db).await {
        Ok(service_model) => {
            state.cache.invalidate_all();
            info!("Service bill created with ID: {}", service_model.id);
            let response = ApiResponse {
                data: MonthlyServiceResponse::from(service_model),
                message: "Service bill created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Service bill conflict: {}", db_error);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "SERVICE_ALREADY_BILLED",
                    "A bill already exists for this room and month, or the room does not exist",
                )),
            ))
        }
        Err(db_error) => {
            error!("Failed to create service bill: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while creating service bill",
                )),
            ))
        }
    }
}

/// Get all monthly service bills
#[utoipa::path(
    get,
    path = "/api/v1/monthly-services",
    tag = "monthly-services",
    responses(
        (status = 200, description = "Service bills retrieved successfully", body = ApiResponse<Vec<MonthlyServiceResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_monthly_services(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MonthlyServiceResponse>>>, StatusCode> {
    match monthly_service::Entity::find().all(&state.db).await {
        Ok(services) => {
            debug!("Retrieved {} service bills", services.len());
            let response = ApiResponse {
                data: services
                    .into_iter()
                    .map(MonthlyServiceResponse::from)
                    .collect(),
                message: "Service bills retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve service bills: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific monthly service bill by ID
#[utoipa::path(
    get,
    path = "/api/v1/monthly-services/{service_id}",
    tag = "monthly-services",
    params(
        ("service_id" = i32, Path, description = "Service bill ID"),
    ),
    responses(
        (status = 200, description = "Service bill retrieved successfully", body = ApiResponse<MonthlyServiceResponse>),
        (status = 404, description = "Service bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_monthly_service(
    Path(service_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MonthlyServiceResponse>>, StatusCode> {
    match monthly_service::Entity::find_by_id(service_id)
        .one(&state.db)
        .await
    {
        Ok(Some(service_model)) => {
            let response = ApiResponse {
                data: MonthlyServiceResponse::from(service_model),
                message: "Service bill retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Service bill with ID {} not found", service_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve service bill {}: {}", service_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a monthly service bill
///
/// The component-sum invariant is re-checked with the resulting values;
/// the total is re-derived when components change and no explicit total
/// is supplied.
#[utoipa::path(
    put,
    path = "/api/v1/monthly-services/{service_id}",
    tag = "monthly-services",
    params(
        ("service_id" = i32, Path, description = "Service bill ID"),
    ),
    request_body = UpdateMonthlyServiceRequest,
    responses(
        (status = 200, description = "Service bill updated successfully", body = ApiResponse<MonthlyServiceResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Service bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_monthly_service(
    Path(service_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMonthlyServiceRequest>,
) -> Result<Json<ApiResponse<MonthlyServiceResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let existing = match monthly_service::Entity::find_by_id(service_id)
        .one(&state.db)
        .await
    {
        Ok(Some(service)) => service,
        Ok(None) => {
            warn!("Service bill with ID {} not found for update", service_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "SERVICE_NOT_FOUND",
                    format!("Service bill {} not found", service_id),
                )),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup service bill {}: {}", service_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    let water_total = request.water_total.unwrap_or(existing.water_total);
    let electricity_total = request
        .electricity_total
        .unwrap_or(existing.electricity_total);
    let trash_fee = request.trash_fee.unwrap_or(existing.trash_fee);
    let maintenance_fee = request.maintenance_fee.unwrap_or(existing.maintenance_fee);
    let components_changed = water_total != existing.water_total
        || electricity_total != existing.electricity_total
        || trash_fee != existing.trash_fee
        || maintenance_fee != existing.maintenance_fee;
    let total_amount = match request.total_amount {
        Some(total) => total,
        None if components_changed => {
            water_total + electricity_total + trash_fee + maintenance_fee
        }
        None => existing.total_amount,
    };

    if let Err(e) = validate_service_components(
        water_total,
        electricity_total,
        trash_fee,
        maintenance_fee,
        total_amount,
    ) {
        warn!("Invalid service bill on update: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
        ));
    }

    let mut service_active: monthly_service::ActiveModel = existing.into();
    service_active.water_total = Set(water_total);
    service_active.electricity_total = Set(electricity_total);
    service_active.trash_fee = Set(trash_fee);
    service_active.maintenance_fee = Set(maintenance_fee);
    service_active.total_amount = Set(total_amount);

    match service_active.update(&state.db).await {
        Ok(updated) => {
            state.cache.invalidate_all();
            info!("Service bill with ID {} updated", service_id);
            let response = ApiResponse {
                data: MonthlyServiceResponse::from(updated),
                message: "Service bill updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update service bill {}: {}", service_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ))
        }
    }
}

/// Delete a monthly service bill
#[utoipa::path(
    delete,
    path = "/api/v1/monthly-services/{service_id}",
    tag = "monthly-services",
    params(
        ("service_id" = i32, Path, description = "Service bill ID"),
    ),
    responses(
        (status = 200, description = "Service bill deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Service bill not found", body = ErrorResponse),
        (status = 409, description = "Service bill has ledger entries", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_monthly_service(
    Path(service_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match monthly_service::Entity::delete_by_id(service_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            state.cache.invalidate_all();
            info!("Service bill with ID {} deleted", service_id);
            let response = ApiResponse {
                data: format!("Service bill {} deleted", service_id),
                message: "Service bill deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(_) => {
            warn!("Service bill with ID {} not found for deletion", service_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "SERVICE_NOT_FOUND",
                    format!("Service bill {} not found", service_id),
                )),
            ))
        }
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Service bill {} still referenced: {}", service_id, db_error);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "SERVICE_HAS_PAYMENTS",
                    "Service bill has ledger entries",
                )),
            ))
        }
        Err(db_error) => {
            error!("Failed to delete service bill {}: {}", service_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while deleting service bill",
                )),
            ))
        }
    }
}
