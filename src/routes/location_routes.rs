use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use crate::controllers::location_controller::LocationController;
use crate::dto::location_dto::{CreateLocationRequest, LocationResponse, UpdateLocationRequest};
use crate::dto::{ApiResponse, ListQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{IdPath, JsonBody, QueryParams};
use crate::utils::pagination::Paginated;

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route("/type/:location_type", get(locations_by_type))
        .route("/:id", get(get_location).put(update_location).delete(delete_location))
}

fn controller(state: &AppState) -> LocationController {
    LocationController::new(state.pool.clone(), state.response_cache())
}

async fn list_locations(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Paginated<LocationResponse>>, AppError> {
    Ok(Json(controller(&state).list(query).await?))
}

async fn create_location(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateLocationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LocationResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_location(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<LocationResponse>, AppError> {
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn update_location(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateLocationRequest>,
) -> Result<Json<ApiResponse<LocationResponse>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_location(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}

/// Lugares activos de un tipo (`A`, `airport`...)
async fn locations_by_type(
    State(state): State<AppState>,
    Path(location_type): Path<String>,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    Ok(Json(controller(&state).by_type(&location_type).await?))
}
