use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use crate::controllers::zone_controller::ZoneController;
use crate::dto::zone_dto::{CreateZoneRequest, ZoneResponse, UpdateZoneRequest};
use crate::dto::{ApiResponse, ListQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{IdPath, JsonBody, QueryParams};
use crate::utils::pagination::Paginated;

pub fn create_zone_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_zones).post(create_zone))
        .route("/:id", get(get_zone).put(update_zone).delete(delete_zone))
}

fn controller(state: &AppState) -> ZoneController {
    ZoneController::new(state.pool.clone(), state.response_cache())
}

async fn list_zones(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Paginated<ZoneResponse>>, AppError> {
    Ok(Json(controller(&state).list(query).await?))
}

async fn create_zone(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateZoneRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ZoneResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_zone(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ZoneResponse>, AppError> {
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn update_zone(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateZoneRequest>,
) -> Result<Json<ApiResponse<ZoneResponse>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_zone(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}
