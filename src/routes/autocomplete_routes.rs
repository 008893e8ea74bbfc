use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use crate::controllers::autocomplete_controller::AutocompleteController;
use crate::dto::autocomplete_dto::{AutocompleteItem, AutocompleteQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::QueryParams;

pub fn create_autocomplete_router() -> Router<AppState> {
    Router::new().route("/", get(autocomplete))
}

async fn autocomplete(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AutocompleteQuery>,
) -> Result<Json<Vec<AutocompleteItem>>, AppError> {
    let controller = AutocompleteController::new(state.pool.clone(), state.response_cache());
    Ok(Json(controller.search(query).await?))
}
