use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use crate::controllers::service_feature_controller::ServiceFeatureController;
use crate::dto::service_feature_dto::{CreateServiceFeatureRequest, ServiceFeatureResponse, UpdateServiceFeatureRequest};
use crate::dto::{ApiResponse, ListQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::{IdPath, JsonBody, QueryParams};
use crate::utils::pagination::Paginated;

pub fn create_service_feature_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_service_features).post(create_service_feature))
        .route("/:id", get(get_service_feature).put(update_service_feature).delete(delete_service_feature))
}

fn controller(state: &AppState) -> ServiceFeatureController {
    ServiceFeatureController::new(state.pool.clone(), state.response_cache())
}

async fn list_service_features(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Paginated<ServiceFeatureResponse>>, AppError> {
    Ok(Json(controller(&state).list(query).await?))
}

async fn create_service_feature(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateServiceFeatureRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceFeatureResponse>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_service_feature(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ServiceFeatureResponse>, AppError> {
    Ok(Json(controller(&state).get_by_id(id).await?))
}

async fn update_service_feature(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(request): JsonBody<UpdateServiceFeatureRequest>,
) -> Result<Json<ApiResponse<ServiceFeatureResponse>>, AppError> {
    Ok(Json(controller(&state).update(id, request).await?))
}

async fn delete_service_feature(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>, AppError> {
    Ok(Json(controller(&state).delete(id).await?))
}
