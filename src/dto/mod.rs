//! DTOs de la API
//!
//! Cuerpos de request y response de cada recurso.

pub mod autocomplete_dto;
pub mod city_dto;
pub mod common_dto;
pub mod location_dto;
pub mod quote_dto;
pub mod rate_dto;
pub mod service_feature_dto;
pub mod vehicle_type_dto;
pub mod zone_dto;

pub use common_dto::{ApiResponse, ListQuery};
