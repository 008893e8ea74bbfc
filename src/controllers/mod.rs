//! Controllers
//!
//! Orquestación de cada request: validación, comprobaciones de
//! existencia, mensajes localizados y conversión a DTOs.

pub mod autocomplete_controller;
pub mod city_controller;
pub mod location_controller;
pub mod quote_controller;
pub mod rate_controller;
pub mod service_feature_controller;
pub mod vehicle_type_controller;
pub mod zone_controller;
