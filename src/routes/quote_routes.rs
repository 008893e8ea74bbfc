use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use crate::controllers::quote_controller::QuoteController;
use crate::dto::quote_dto::{QuoteQuery, QuoteResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extract::QueryParams;

pub fn create_quote_router() -> Router<AppState> {
    Router::new().route("/", get(quote))
}

async fn quote(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<QuoteQuery>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone(), state.response_cache());
    Ok(Json(controller.quote(query).await?))
}
