use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use crate::controllers::vehicle_type_controller::VehicleTypeController;
use crate::dto::vehicle_type_dto::{CreateVehicleTypeRequest, VehicleTypeResponse, UpdateVehicleTypeRequest};
use crate::dto::{ApiResponse, ListQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{IdPath, JsonBody, QueryParams};
use crate::utils::pagination::Paginated;

pub fn create_vehicle_type_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicle_types).post(create_vehicle_type))
        .route("/:id", get(get_vehicle_type).put(update_vehicle_type).delete(delete_vehicle_type))
}

fn controller(state: &AppState) -> VehicleTypeController {
    VehicleTypeController::new(state.pool.clone(), state.response_cache())
}

async fn list_vehicle_types(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Paginated<VehicleTypeResponse>>, AppError> {
    Ok(Json(controller(&state).list(query).await?))
}

async fn create_vehicle_type(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateVehicleTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleTypeResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle_type(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<VehicleTypeResponse>, AppError> {
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn update_vehicle_type(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateVehicleTypeRequest>,
) -> Result<Json<ApiResponse<VehicleTypeResponse>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_vehicle_type(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}
