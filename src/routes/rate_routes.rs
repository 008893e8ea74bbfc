use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use crate::controllers::rate_controller::RateController;
use crate::dto::rate_dto::{CreateRateRequest, RateResponse, UpdateRateRequest};
use crate::dto::{ApiResponse, ListQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{IdPath, JsonBody, QueryParams};
use crate::utils::pagination::Paginated;

pub fn create_rate_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rates).post(create_rate))
        .route("/:id", get(get_rate).put(update_rate).delete(delete_rate))
}

fn controller(state: &AppState) -> RateController {
    RateController::new(
        state.pool.clone(),
        state.response_cache(),
        state.config.default_currency.clone(),
    )
}

async fn list_rates(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Paginated<RateResponse>>, AppError> {
    Ok(Json(controller(&state).list(query).await?))
}

async fn create_rate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateRateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RateResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_rate(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<RateResponse>, AppError> {
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn update_rate(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateRateRequest>,
) -> Result<Json<ApiResponse<RateResponse>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_rate(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}
