use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use ledger::validator::validate_maintenance_total;
use model::entities::maintenance_request::{self, RequestStatus};
use model::entities::{maintenance_issue, maintenance_request_issue};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

fn status_label(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Open => "open",
        RequestStatus::InProgress => "in_progress",
        RequestStatus::Done => "done",
    }
}

fn parse_status(label: &str) -> Option<RequestStatus> {
    match label {
        "open" => Some(RequestStatus::Open),
        "in_progress" => Some(RequestStatus::InProgress),
        "done" => Some(RequestStatus::Done),
        _ => None,
    }
}

/// Request body for creating a maintenance issue catalog entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateMaintenanceIssueRequest {
    pub name: String,
    /// Current catalog price; requests snapshot it at filing time
    pub price: Decimal,
}

/// Request body for updating a maintenance issue catalog entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateMaintenanceIssueRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

/// Maintenance issue response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceIssueResponse {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
}

impl From<maintenance_issue::Model> for MaintenanceIssueResponse {
    fn from(model: maintenance_issue::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

/// Request body for filing a maintenance request
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateMaintenanceRequestRequest {
    pub tenant_id: i32,
    pub room_id: i32,
    /// Catalog issues to include; prices are snapshotted at filing time
    pub issue_ids: Vec<i32>,
    /// Defaults to today
    pub requested_on: Option<NaiveDate>,
    /// Validated against the snapshot sum when supplied
    pub total_price: Option<Decimal>,
}

/// Request body for updating a maintenance request
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateMaintenanceRequestRequest {
    /// "open", "in_progress" or "done"
    pub status: String,
}

/// One line of a maintenance request with its snapshotted price
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestIssueLine {
    pub issue_id: i32,
    pub price: Decimal,
}

/// Maintenance request response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceRequestResponse {
    pub id: i32,
    pub tenant_id: i32,
    pub room_id: i32,
    pub total_price: Decimal,
    pub status: String,
    pub requested_on: NaiveDate,
    /// Included on detail lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<RequestIssueLine>>,
}

impl MaintenanceRequestResponse {
    fn from_model(model: maintenance_request::Model, issues: Option<Vec<RequestIssueLine>>) -> Self {
        Self {
            id: model.id,
            tenant_id: model.tenant_id,
            room_id: model.room_id,
            total_price: model.total_price,
            status: status_label(model.status).to_string(),
            requested_on: model.requested_on,
            issues,
        }
    }
}

/// Create a maintenance issue catalog entry
#[utoipa::path(
    post,
    path = "/api/v1/maintenance-issues",
    tag = "maintenance",
    request_body = CreateMaintenanceIssueRequest,
    responses(
        (status = 201, description = "Issue created successfully", body = ApiResponse<MaintenanceIssueResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_maintenance_issue(
    State(state): State<AppState>,
    Json(request): Json<CreateMaintenanceIssueRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<MaintenanceIssueResponse>>),
    (StatusCode, Json<ErrorResponse>),
> {
    if request.price < Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "VALIDATION_ERROR",
                "price must not be negative",
            )),
        ));
    }

    let new_issue = maintenance_issue::ActiveModel {
        name: Set(request.name),
        price: Set(request.price),
        ..Default::default()
    };

    match new_issue.insert(&state.db).await {
        Ok(issue_model) => {
            info!("Maintenance issue created with ID: {}", issue_model.id);
            let response = ApiResponse {
                data: MaintenanceIssueResponse::from(issue_model),
                message: "Issue created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create maintenance issue: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ))
        }
    }
}

/// Get all maintenance issue catalog entries
#[utoipa::path(
    get,
    path = "/api/v1/maintenance-issues",
    tag = "maintenance",
    responses(
        (status = 200, description = "Issues retrieved successfully", body = ApiResponse<Vec<MaintenanceIssueResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_maintenance_issues(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MaintenanceIssueResponse>>>, StatusCode> {
    match maintenance_issue::Entity::find().all(&state.db).await {
        Ok(issues) => {
            let response = ApiResponse {
                data: issues
                    .into_iter()
                    .map(MaintenanceIssueResponse::from)
                    .collect(),
                message: "Issues retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve maintenance issues: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific maintenance issue by ID
#[utoipa::path(
    get,
    path = "/api/v1/maintenance-issues/{issue_id}",
    tag = "maintenance",
    params(
        ("issue_id" = i32, Path, description = "Issue ID"),
    ),
    responses(
        (status = 200, description = "Issue retrieved successfully", body = ApiResponse<MaintenanceIssueResponse>),
        (status = 404, description = "Issue not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_maintenance_issue(
    Path(issue_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MaintenanceIssueResponse>>, StatusCode> {
    match maintenance_issue::Entity::find_by_id(issue_id)
        .one(&state.db)
        .await
    {
        Ok(Some(issue_model)) => {
            let response = ApiResponse {
                data: MaintenanceIssueResponse::from(issue_model),
                message: "Issue retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Maintenance issue with ID {} not found", issue_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve maintenance issue {}: {}", issue_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a maintenance issue catalog entry
///
/// Price changes never touch the snapshots on already-filed requests.
#[utoipa::path(
    put,
    path = "/api/v1/maintenance-issues/{issue_id}",
    tag = "maintenance",
    params(
        ("issue_id" = i32, Path, description = "Issue ID"),
    ),
    request_body = UpdateMaintenanceIssueRequest,
    responses(
        (status = 200, description = "Issue updated successfully", body = ApiResponse<MaintenanceIssueResponse>),
        (status = 404, description = "Issue not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_maintenance_issue(
    Path(issue_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMaintenanceIssueRequest>,
) -> Result<Json<ApiResponse<MaintenanceIssueResponse>>, StatusCode> {
    let existing = match maintenance_issue::Entity::find_by_id(issue_id)
        .one(&state.db)
        .await
    {
        Ok(Some(issue)) => issue,
        Ok(None) => {
            warn!("Maintenance issue with ID {} not found for update", issue_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup maintenance issue {}: {}", issue_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut issue_active: maintenance_issue::ActiveModel = existing.into();
    if let Some(name) = request.name {
        issue_active.name = Set(name);
    }
    if let Some(price) = request.price {
        issue_active.price = Set(price);
    }

    match issue_active.update(&state.db).await {
        Ok(updated) => {
            info!("Maintenance issue with ID {} updated", issue_id);
            let response = ApiResponse {
                data: MaintenanceIssueResponse::from(updated),
                message: "Issue updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update maintenance issue {}: {}", issue_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a maintenance issue catalog entry
#[utoipa::path(
    delete,
    path = "/api/v1/maintenance-issues/{issue_id}",
    tag = "maintenance",
    params(
        ("issue_id" = i32, Path, description = "Issue ID"),
    ),
    responses(
        (status = 200, description = "Issue deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Issue not found", body = ErrorResponse),
        (status = 409, description = "Issue is referenced by requests", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_maintenance_issue(
    Path(issue_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match maintenance_issue::Entity::delete_by_id(issue_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Maintenance issue with ID {} deleted", issue_id);
            let response = ApiResponse {
                data: format!("Issue {} deleted", issue_id),
                message: "Issue deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(_) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "ISSUE_NOT_FOUND",
                format!("Issue {} not found", issue_id),
            )),
        )),
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Maintenance issue {} still referenced: {}", issue_id, db_error);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "ISSUE_IN_USE",
                    "Issue is referenced by maintenance requests",
                )),
            ))
        }
        Err(db_error) => {
            error!("Failed to delete maintenance issue {}: {}", issue_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ))
        }
    }
}

/// File a maintenance request
///
/// Catalog prices are snapshotted onto the request lines; later catalog
/// edits do not change what was billed.
#[utoipa::path(
    post,
    path = "/api/v1/maintenance-requests",
    tag = "maintenance",
    request_body = CreateMaintenanceRequestRequest,
    responses(
        (status = 201, description = "Request filed successfully", body = ApiResponse<MaintenanceRequestResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_maintenance_request(
    State(state): State<AppState>,
    Json(request): Json<CreateMaintenanceRequestRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<MaintenanceRequestResponse>>),
    (StatusCode, Json<ErrorResponse>),
> {
    debug!(
        "Filing maintenance request: tenant {} room {} ({} issues)",
        request.tenant_id,
        request.room_id,
        request.issue_ids.len()
    );

    let issues = match maintenance_issue::Entity::find()
        .filter(maintenance_issue::Column::Id.is_in(request.issue_ids.clone()))
        .all(&state.db)
        .await
    {
        Ok(issues) => issues,
        Err(db_error) => {
            error!("Failed to load issues: {}", db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };
    if issues.len() != request.issue_ids.len() {
        warn!("Some requested issues do not exist");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "ISSUE_NOT_FOUND",
                "One or more issues do not exist",
            )),
        ));
    }

    let snapshot_prices: Vec<Decimal> = issues.iter().map(|issue| issue.price).collect();
    let total_price = request
        .total_price
        .unwrap_or_else(|| snapshot_prices.iter().copied().sum());
    if let Err(e) = validate_maintenance_total(&snapshot_prices, total_price) {
        warn!("Invalid maintenance request: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
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

    let insert_result = maintenance_request::ActiveModel {
        tenant_id: Set(request.tenant_id),
        room_id: Set(request.room_id),
        total_price: Set(total_price),
        status: Set(RequestStatus::Open),
        requested_on: Set(request
            .requested_on
            .unwrap_or_else(|| Utc::now().date_naive())),
        ..Default::default()
    }
    .insert(&txn)
    .await;

    let request_model = match insert_result {
        Ok(model) => model,
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Request references missing tenant or room: {}", db_error);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "REFERENCE_NOT_FOUND",
                    "Tenant or room does not exist",
                )),
            ));
        }
        Err(db_error) => {
            error!("Failed to create maintenance request: {}", db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    let mut lines = Vec::with_capacity(issues.len());
    for issue in &issues {
        let line = maintenance_request_issue::ActiveModel {
            request_id: Set(request_model.id),
            issue_id: Set(issue.id),
            price: Set(issue.price),
        }
        .insert(&txn)
        .await;
        match line {
            Ok(line) => lines.push(RequestIssueLine {
                issue_id: line.issue_id,
                price: line.price,
            }),
            Err(db_error) => {
                error!("Failed to snapshot request line: {}", db_error);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
                ));
            }
        }
    }

    if let Err(db_error) = txn.commit().await {
        error!("Failed to commit maintenance request: {}", db_error);
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
        ));
    }

    state.cache.invalidate_all();
    info!("Maintenance request filed with ID: {}", request_model.id);
    let response = ApiResponse {
        data: MaintenanceRequestResponse::from_model(request_model, Some(lines)),
        message: "Request filed successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all maintenance requests
#[utoipa::path(
    get,
    path = "/api/v1/maintenance-requests",
    tag = "maintenance",
    responses(
        (status = 200, description = "Requests retrieved successfully", body = ApiResponse<Vec<MaintenanceRequestResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_maintenance_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MaintenanceRequestResponse>>>, StatusCode> {
    match maintenance_request::Entity::find().all(&state.db).await {
        Ok(requests) => {
            let response = ApiResponse {
                data: requests
                    .into_iter()
                    .map(|model| MaintenanceRequestResponse::from_model(model, None))
                    .collect(),
                message: "Requests retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve maintenance requests: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific maintenance request with its price-snapshot lines
#[utoipa::path(
    get,
    path = "/api/v1/maintenance-requests/{request_id}",
    tag = "maintenance",
    params(
        ("request_id" = i32, Path, description = "Request ID"),
    ),
    responses(
        (status = 200, description = "Request retrieved successfully", body = ApiResponse<MaintenanceRequestResponse>),
        (status = 404, description = "Request not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_maintenance_request(
    Path(request_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MaintenanceRequestResponse>>, StatusCode> {
    let request_model = match maintenance_request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Maintenance request with ID {} not found", request_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to retrieve maintenance request {}: {}", request_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let lines = match maintenance_request_issue::Entity::find()
        .filter(maintenance_request_issue::Column::RequestId.eq(request_id))
        .all(&state.db)
        .await
    {
        Ok(lines) => lines
            .into_iter()
            .map(|line| RequestIssueLine {
                issue_id: line.issue_id,
                price: line.price,
            })
            .collect(),
        Err(db_error) => {
            error!("Failed to load request lines: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let response = ApiResponse {
        data: MaintenanceRequestResponse::from_model(request_model, Some(lines)),
        message: "Request retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update a maintenance request's workflow status
#[utoipa::path(
    put,
    path = "/api/v1/maintenance-requests/{request_id}",
    tag = "maintenance",
    params(
        ("request_id" = i32, Path, description = "Request ID"),
    ),
    request_body = UpdateMaintenanceRequestRequest,
    responses(
        (status = 200, description = "Request updated successfully", body = ApiResponse<MaintenanceRequestResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_maintenance_request(
    Path(request_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateMaintenanceRequestRequest>,
) -> Result<Json<ApiResponse<MaintenanceRequestResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let status = match parse_status(&request.status) {
        Some(status) => status,
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "VALIDATION_ERROR",
                    format!("unknown request status '{}'", request.status),
                )),
            ));
        }
    };

    let existing = match maintenance_request::Entity::find_by_id(request_id)
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Maintenance request with ID {} not found for update", request_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "REQUEST_NOT_FOUND",
                    format!("Request {} not found", request_id),
                )),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup maintenance request {}: {}", request_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    let mut request_active: maintenance_request::ActiveModel = existing.into();
    request_active.status = Set(status);

    match request_active.update(&state.db).await {
        Ok(updated) => {
            info!("Maintenance request with ID {} updated", request_id);
            let response = ApiResponse {
                data: MaintenanceRequestResponse::from_model(updated, None),
                message: "Request updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update maintenance request {}: {}", request_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ))
        }
    }
}

/// Delete a maintenance request
///
/// Price-snapshot lines go with it; refused while ledger entries
/// reference the request.
#[utoipa::path(
    delete,
    path = "/api/v1/maintenance-requests/{request_id}",
    tag = "maintenance",
    params(
        ("request_id" = i32, Path, description = "Request ID"),
    ),
    responses(
        (status = 200, description = "Request deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Request not found", body = ErrorResponse),
        (status = 409, description = "Request has ledger entries", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_maintenance_request(
    Path(request_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match maintenance_request::Entity::delete_by_id(request_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            state.cache.invalidate_all();
            info!("Maintenance request with ID {} deleted", request_id);
            let response = ApiResponse {
                data: format!("Request {} deleted", request_id),
                message: "Request deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(_) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "REQUEST_NOT_FOUND",
                format!("Request {} not found", request_id),
            )),
        )),
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Maintenance request {} still referenced: {}", request_id, db_error);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "REQUEST_HAS_PAYMENTS",
                    "Request has ledger entries",
                )),
            ))
        }
        Err(db_error) => {
            error!("Failed to delete maintenance request {}: {}", request_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ))
        }
    }
}
