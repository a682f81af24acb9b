use crate::handlers::is_constraint_violation;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::room::{self, RoomStatus};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

pub(crate) fn status_label(status: RoomStatus) -> &'static str {
    match status {
        RoomStatus::Available => "available",
        RoomStatus::Occupied => "occupied",
    }
}

fn parse_status(label: &str) -> Option<RoomStatus> {
    match label {
        "available" => Some(RoomStatus::Available),
        "occupied" => Some(RoomStatus::Occupied),
        _ => None,
    }
}

/// Request body for creating a new room
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateRoomRequest {
    /// House the room belongs to
    pub house_id: i32,
    /// Room name or number
    pub name: String,
    /// Nominal monthly rent (asking price)
    pub monthly_rent: Decimal,
}

/// Request body for updating a room
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub monthly_rent: Option<Decimal>,
    /// "available" or "occupied"
    pub status: Option<String>,
}

/// Room response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomResponse {
    pub id: i32,
    pub house_id: i32,
    pub name: String,
    pub monthly_rent: Decimal,
    pub status: String,
}

impl From<room::Model> for RoomResponse {
    fn from(model: room::Model) -> Self {
        Self {
            id: model.id,
            house_id: model.house_id,
            name: model.name,
            monthly_rent: model.monthly_rent,
            status: status_label(model.status).to_string(),
        }
    }
}

/// Create a new room
///
/// New rooms start out available; agreements flip them to occupied.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created successfully", body = ApiResponse<RoomResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomResponse>>), (StatusCode, Json<ErrorResponse>)> {
    debug!("Creating room '{}' in house {}", request.name, request.house_id);

    if request.monthly_rent <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "VALIDATION_ERROR",
                "monthly_rent must be positive",
            )),
        ));
    }

    let new_room = room::ActiveModel {
        house_id: Set(request.house_id),
        name: Set(request.name),
        monthly_rent: Set(request.monthly_rent),
        status: Set(RoomStatus::Available),
        ..Default::default()
    };

    match new_room.insert(&state.db).await {
        Ok(room_model) => {
            info!("Room created with ID: {}", room_model.id);
            let response = ApiResponse {
                data: RoomResponse::from(room_model),
                message: "Room created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Room references missing house: {}", db_error);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "HOUSE_NOT_FOUND",
                    format!("House {} does not exist", request.house_id),
                )),
            ))
        }
        Err(db_error) => {
            error!("Failed to create room: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while creating room",
                )),
            ))
        }
    }
}

/// Get all rooms
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "rooms",
    responses(
        (status = 200, description = "Rooms retrieved successfully", body = ApiResponse<Vec<RoomResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_rooms(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RoomResponse>>>, StatusCode> {
    match room::Entity::find().all(&state.db).await {
        Ok(rooms) => {
            debug!("Retrieved {} rooms", rooms.len());
            let response = ApiResponse {
                data: rooms.into_iter().map(RoomResponse::from).collect(),
                message: "Rooms retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve rooms: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific room by ID
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_id}",
    tag = "rooms",
    params(
        ("room_id" = i32, Path, description = "Room ID"),
    ),
    responses(
        (status = 200, description = "Room retrieved successfully", body = ApiResponse<RoomResponse>),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_room(
    Path(room_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RoomResponse>>, StatusCode> {
    match room::Entity::find_by_id(room_id).one(&state.db).await {
        Ok(Some(room_model)) => {
            let response = ApiResponse {
                data: RoomResponse::from(room_model),
                message: "Room retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Room with ID {} not found", room_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve room {}: {}", room_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a room
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{room_id}",
    tag = "rooms",
    params(
        ("room_id" = i32, Path, description = "Room ID"),
    ),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated successfully", body = ApiResponse<RoomResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_room(
    Path(room_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<RoomResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let existing = match room::Entity::find_by_id(room_id).one(&state.db).await {
        Ok(Some(room)) => room,
        Ok(None) => {
            warn!("Room with ID {} not found for update", room_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "ROOM_NOT_FOUND",
                    format!("Room {} not found", room_id),
                )),
            ));
        }
        Err(db_error) => {
            error!("Failed to lookup room {}: {}", room_id, db_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ));
        }
    };

    let mut room_active: room::ActiveModel = existing.into();
    if let Some(name) = request.name {
        room_active.name = Set(name);
    }
    if let Some(monthly_rent) = request.monthly_rent {
        room_active.monthly_rent = Set(monthly_rent);
    }
    if let Some(status) = request.status {
        match parse_status(&status) {
            Some(parsed) => room_active.status = Set(parsed),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        "VALIDATION_ERROR",
                        format!("unknown room status '{}'", status),
                    )),
                ));
            }
        }
    }

    match room_active.update(&state.db).await {
        Ok(updated) => {
            info!("Room with ID {} updated", room_id);
            let response = ApiResponse {
                data: RoomResponse::from(updated),
                message: "Room updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update room {}: {}", room_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("DATABASE_ERROR", "Internal server error")),
            ))
        }
    }
}

/// Delete a room
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{room_id}",
    tag = "rooms",
    params(
        ("room_id" = i32, Path, description = "Room ID"),
    ),
    responses(
        (status = 200, description = "Room deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Room not found", body = ErrorResponse),
        (status = 409, description = "Room still has active records", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_room(
    Path(room_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    match room::Entity::delete_by_id(room_id).exec(&state.db).await {
        Ok(delete_result) if delete_result.rows_affected > 0 => {
            info!("Room with ID {} deleted", room_id);
            let response = ApiResponse {
                data: format!("Room {} deleted", room_id),
                message: "Room deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(_) => {
            warn!("Room with ID {} not found for deletion", room_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    "ROOM_NOT_FOUND",
                    format!("Room {} not found", room_id),
                )),
            ))
        }
        Err(db_error) if is_constraint_violation(&db_error) => {
            warn!("Room {} still referenced: {}", room_id, db_error);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(
                    "ROOM_IN_USE",
                    "Room has rent agreements or service bills",
                )),
            ))
        }
        Err(db_error) => {
            error!("Failed to delete room {}: {}", room_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "DATABASE_ERROR",
                    "Internal server error while deleting room",
                )),
            ))
        }
    }
}
