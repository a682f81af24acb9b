use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::tenant;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new tenant
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateTenantRequest {
    /// Tenant full name
    #[validate(length(min = 1))]
    pub name: String,
    /// Contact phone number
    #[validate(length(min = 1))]
    pub phone: String,
    /// Contact email
    #[validate(email)]
    pub email: Option<String>,
    /// Government ID card number
    pub id_card_number: Option<String>,
    /// URL of the tenant's photo
    pub photo_url: Option<String>,
}

/// Request body for updating a tenant
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateTenantRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub id_card_number: Option<String>,
    pub photo_url: Option<String>,
}

/// Tenant response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TenantResponse {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub id_card_number: Option<String>,
    pub photo_url: Option<String>,
}

impl From<tenant::Model> for TenantResponse {
    fn from(model: tenant::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            id_card_number: model.id_card_number,
            photo_url: model.photo_url,
        }
    }
}

/// Create a new tenant
#[utoipa::path(
    post,
    path = "/api/v1/tenants",
    tag = "tenants",
    request_body = CreateTenantRequest,
    responses(
        (status = 201, description = "Tenant created successfully", body = ApiResponse<TenantResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_tenant(
    State(state): State<AppState>,
    Json(request): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TenantResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating tenant '{}'", request.name);

    if let Err(e) = request.validate() {
        warn!("Invalid tenant payload: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
        ));
    }

    let new_tenant = tenant::ActiveModel {
        name: Set(request.name),
        phone: Set(request.phone),
        email: Set(request.email),
        id_card_number: Set(request.id_card_number),
        photo_url: Set(request.photo_url),
        ..Default::default()
    };

    match new_tenant.insert(&state.db).await {
        Ok(tenant_model) => {
            info!("Tenant created with ID: {}", tenant_model.id);
            let response = ApiResponse {
                data: TenantResponse::from(tenant_model),
                message: "Tenant created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create tenant: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while creating tenant",
                )),
            ))
        }
    }
}

/// Get all tenants
#[utoipa::path(
    get,
    path = "/api/v1/tenants",
    tag = "tenants",
    responses(
        (status = 200, description = "Tenants retrieved successfully", body = ApiResponse<Vec<TenantResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_tenants(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TenantResponse>>>, StatusCode> {
    match tenant::Entity::find().all(&state.db).await {
        Ok(tenants) => {
            debug!("Retrieved {} tenants", tenants.len());
            let response = ApiResponse {
                data: tenants.into_iter().map(TenantResponse::from).collect(),
                message: "Tenants retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve tenants: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific tenant by ID
#[utoipa::path(
    get,
    path = "/api/v1/tenants/{tenant_id}",
    tag = "tenants",
    params(
        ("tenant_id" = i32, Path, description = "Tenant ID"),
    ),
    responses(
        (status = 200, description = "Tenant retrieved successfully", body = ApiResponse<TenantResponse>),
        (status = 404, description = "Tenant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_tenant(
    Path(tenant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TenantResponse>>, StatusCode> {
    match tenant::Entity::find_by_id(tenant_id).one(&state.db).await {
        Ok(Some(tenant_model)) => {
            let response = ApiResponse {
                data: TenantResponse::from(tenant_model),
                message: "Tenant retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Tenant with ID {} not found", tenant_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve tenant {}: {}", tenant_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a tenant
#[utoipa::path(
    put,
    path = "/api/v1/tenants/{tenant_id}",
    tag = "tenants",
    params(
        ("tenant_id" = i32, Path, description = "Tenant ID"),
    ),
    request_body = UpdateTenantRequest,
    responses(
        (status = 200, description = "Tenant updated successfully", body = ApiResponse<TenantResponse>),
        (status = 404, description = "Tenant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_tenant(
    Path(tenant_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateTenantRequest>,
) -> Result<Json<ApiResponse<TenantResponse>>, StatusCode> {
    let existing = match tenant::Entity::find_by_id(tenant_id).one(&state.db).await {
        Ok(Some(tenant)) => tenant,
        Ok(None) => {
            warn!("Tenant with ID {} not found for update", tenant_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup tenant {}: {}", tenant_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut tenant_active: tenant::ActiveModel = existing.into();
    if let Some(name) = request.name {
        tenant_active.name = Set(name);
    }
    if let Some(phone) = request.phone {
        tenant_active.phone = Set(phone);
    }
    if let Some(email) = request.email {
        tenant_active.email = Set(Some(email));
    }
    if let Some(id_card_number) = request.id_card_number {
        tenant_active.id_card_number = Set(Some(id_card_number));
    }
    if let Some(photo_url) = request.photo_url {
        tenant_active.photo_url = Set(Some(photo_url));
    }

    match tenant_active.update(&state.db).await {
        Ok(updated) => {
            info!("Tenant with ID {} updated", tenant_id);
            let response = ApiResponse {
                data: TenantResponse::from(updated),
                message: "Tenant updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update tenant {}: {}", tenant_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a tenant
///
/// Refused while the tenant still has rent agreements, maintenance
/// requests or ledger entries.
#[utoipa::path(
    delete,
    path = "/api/v1/tenants/{tenant_id}",
    tag = "tenants",
    params(
        ("tenant_id" = i32, Path, description = "Tenant ID"),
    ),
    responses(
        (status = 200, description = "Tenant deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Tenant not found", body = ErrorResponse),
        (status = 409, description = "Tenant still has active records", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_tenant(
    Path(tenant_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match tenant::Entity::delete_by_id(tenant_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Tenant with ID {} deleted", tenant_id);
            let response = ApiResponse {
                data: format!("Tenant {} deleted", tenant_id),
                message: "Tenant deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(_) => {
            warn!("Tenant with ID {} not found for deletion", tenant_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "TENANT_NOT_FOUND",
                    format!("Tenant {} not found", tenant_id),
                )),
            ))
        }
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Tenant {} still referenced: {}", tenant_id, db_error);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "TENANT_HAS_RECORDS",
                    "Tenant has rent agreements, requests or ledger entries",
                )),
            ))
        }
        Err(db_error) => {
            error!("Failed to delete tenant {}: {}", tenant_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while deleting tenant",
                )),
            ))
        }
    }
}
