//! Routers de la API
//!
//! Un router por recurso, montados bajo `/api/v1`.

pub mod autocomplete_routes;
pub mod city_routes;
pub mod health_routes;
pub mod location_routes;
pub mod quote_routes;
pub mod rate_routes;
pub mod service_feature_routes;
pub mod vehicle_type_routes;
pub mod zone_routes;

use axum::Router;

use crate::state::AppState;

/// Router de la API v1
pub fn create_api_v1_router() -> Router<AppState> {
    Router::new()
        .nest("/cities", city_routes::create_city_router())
        .nest("/zones", zone_routes::create_zone_router())
        .nest("/locations", location_routes::create_location_router())
        .nest("/vehicle-types", vehicle_type_routes::create_vehicle_type_router())
        .nest("/service-features", service_feature_routes::create_service_feature_router())
        .nest("/rates", rate_routes::create_rate_router())
        .nest("/autocomplete", autocomplete_routes::create_autocomplete_router())
        .nest("/quote", quote_routes::create_quote_router())
}
