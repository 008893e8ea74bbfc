//! Transfer Admin
//!
//! Backend de administración para reservas de traslados: ciudades, zonas,
//! lugares, tipos de vehículo, servicios, tarifas y presupuestos, con
//! mensajes traducidos según el idioma del request.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn, middleware::from_fn_with_state, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::i18n::keys;
use crate::middleware::{cors_layer, locale_middleware, rate_limit_middleware};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router completo de la aplicación con sus capas
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes::create_health_router())
        .nest("/api/v1", routes::create_api_v1_router())
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .layer(from_fn(locale_middleware))
        .layer(cors_layer(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound(keys::NOT_FOUND)
}
