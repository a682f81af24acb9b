use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::house;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new house
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateHouseRequest {
    /// House name
    #[validate(length(min = 1))]
    pub name: String,
    /// Street address
    #[validate(length(min = 1))]
    pub address: String,
    /// Free-form description
    pub description: Option<String>,
}

/// Request body for updating a house
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateHouseRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// House response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HouseResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

impl From<house::Model> for HouseResponse {
    fn from(model: house::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            description: model.description,
        }
    }
}

/// Create a new house
#[utoipa::path(
    post,
    path = "/api/v1/houses",
    tag = "houses",
    request_body = CreateHouseRequest,
    responses(
        (status = 201, description = "House created successfully", body = ApiResponse<HouseResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_house(
    State(state): State<AppState>,
    Json(request): Json<CreateHouseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HouseResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating house '{}'", request.name);

    if let Err(e) = request.validate() {
        warn!("Invalid house payload: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
        ));
    }

    let new_house = house::ActiveModel {
        name: Set(request.name),
        address: Set(request.address),
        description: Set(request.description),
        ..Default::default()
    };

    match new_house.insert(&state.db).await {
        Ok(house_model) => {
            info!("House created with ID: {}", house_model.id);
            let response = ApiResponse {
                data: HouseResponse::from(house_model),
                message: "House created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create house: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while creating house",
                )),
            ))
        }
    }
}

/// Get all houses
#[utoipa::path(
    get,
    path = "/api/v1/houses",
    tag = "houses",
    responses(
        (status = 200, description = "Houses retrieved successfully", body = ApiResponse<Vec<HouseResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_houses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<HouseResponse>>>, StatusCode> {
    match house::Entity::find().all(&state.db).await {
        Ok(houses) => {
            debug!("Retrieved {} houses", houses.len());
            let response = ApiResponse {
                data: houses.into_iter().map(HouseResponse::from).collect(),
                message: "Houses retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve houses: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific house by ID
#[utoipa::path(
    get,
    path = "/api/v1/houses/{house_id}",
    tag = "houses",
    params(
        ("house_id" = i32, Path, description = "House ID"),
    ),
    responses(
        (status = 200, description = "House retrieved successfully", body = ApiResponse<HouseResponse>),
        (status = 404, description = "House not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_house(
    Path(house_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HouseResponse>>, StatusCode> {
    match house::Entity::find_by_id(house_id).one(&state.db).await {
        Ok(Some(house_model)) => {
            let response = ApiResponse {
                data: HouseResponse::from(house_model),
                message: "House retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("House with ID {} not found", house_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve house {}: {}", house_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a house
#[utoipa::path(
    put,
    path = "/api/v1/houses/{house_id}",
    tag = "houses",
    params(
        ("house_id" = i32, Path, description = "House ID"),
    ),
    request_body = UpdateHouseRequest,
    responses(
        (status = 200, description = "House updated successfully", body = ApiResponse<HouseResponse>),
        (status = 404, description = "House not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_house(
    Path(house_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateHouseRequest>,
) -> Result<Json<ApiResponse<HouseResponse>>, StatusCode> {
    let existing = match house::Entity::find_by_id(house_id).one(&state.db).await {
        Ok(Some(house)) => house,
        Ok(None) => {
            warn!("House with ID {} not found for update", house_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup house {}: {}", house_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut house_active: house::ActiveModel = existing.into();
    if let Some(name) = request.name {
        house_active.name = Set(name);
    }
    if let Some(address) = request.address {
        house_active.address = Set(address);
    }
    if let Some(description) = request.description {
        house_active.description = Set(Some(description));
    }

    match house_active.update(&state.db).await {
        Ok(updated) => {
            info!("House with ID {} updated", house_id);
            let response = ApiResponse {
                data: HouseResponse::from(updated),
                message: "House updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update house {}: {}", house_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a house
///
/// Rooms under the house are removed with it; the delete is refused while
/// any of those rooms still has rent agreements or service bills.
#[utoipa::path(
    delete,
    path = "/api/v1/houses/{house_id}",
    tag = "houses",
    params(
        ("house_id" = i32, Path, description = "House ID"),
    ),
    responses(
        (status = 200, description = "House deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "House not found", body = ErrorResponse),
        (status = 409, description = "House still has active records", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_house(
    Path(house_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match house::Entity::delete_by_id(house_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("House with ID {} deleted", house_id);
            let response = ApiResponse {
                data: format!("House {} deleted", house_id),
                message: "House deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(_) => {
            warn!("House with ID {} not found for deletion", house_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "HOUSE_NOT_FOUND",
                    format!("House {} not found", house_id),
                )),
            ))
        }
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("House {} still referenced: {}", house_id, db_error);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "HOUSE_IN_USE",
                    "House has rooms with rent agreements or service bills",
                )),
            ))
        }
        Err(db_error) => {
            error!("Failed to delete house {}: {}", house_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while deleting house",
                )),
            ))
        }
    }
}
