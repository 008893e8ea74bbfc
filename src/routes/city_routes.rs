use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use crate::controllers::city_controller::CityController;
use crate::dto::city_dto::{CityDetailsResponse, CityResponse, CreateCityRequest, UpdateCityRequest};
use crate::dto::location_dto::LocationResponse;
use crate::dto::zone_dto::ZoneResponse;
use crate::dto::{ApiResponse, ListQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{IdPath, JsonBody, QueryParams};
use crate::utils::pagination::Paginated;

pub fn create_city_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cities).post(create_city))
        .route("/:id", get(get_city).put(update_city).delete(delete_city))
        .route("/:id/details", get(city_details))
        .route("/:id/zones", get(city_zones))
        .route("/:id/locations", get(city_locations))
}

fn controller(state: &AppState) -> CityController {
    CityController::new(state.pool.clone(), state.response_cache())
}

async fn list_cities(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Paginated<CityResponse>>, AppError> {
    Ok(Json(controller(&state).list(query).await?))
}

async fn create_city(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CityResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_city(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<CityResponse>, AppError> {
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn update_city(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateCityRequest>,
) -> Result<Json<ApiResponse<CityResponse>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_city(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}

async fn city_details(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<CityDetailsResponse>, AppError> {
    Ok(Json(controller(&state).details(id).await?))
}

async fn city_zones(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Vec<ZoneResponse>>, AppError> {
    Ok(Json(controller(&state).zones(id).await?))
}

async fn city_locations(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Vec<LocationResponse>>, AppError> {
    Ok(Json(controller(&state).locations(id).await?))
}
