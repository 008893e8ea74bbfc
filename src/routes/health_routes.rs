use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::database::ping;
use crate::i18n::{self, keys};
use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Estado de la base de datos y del cache; 503 si la base de datos no responde
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database_ok = ping(&state.pool).await.is_ok();

    let (cache, cache_key) = match &state.cache {
        None => ("disabled", keys::CACHE_DISABLED),
        Some(client) if client.is_connected().await => ("ok", keys::CACHE_ENABLED),
        Some(_) => ("unavailable", keys::CACHE_UNAVAILABLE),
    };

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if database_ok { "healthy" } else { "degraded" },
            "database": if database_ok { "ok" } else { "unavailable" },
            "cache": cache,
            "cache_message": i18n::t(cache_key),
            "locale": i18n::current_locale().code(),
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
