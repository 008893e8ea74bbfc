//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL de `migrations/`.

pub mod city;
pub mod location;
pub mod rate;
pub mod service_feature;
pub mod vehicle_type;
pub mod zone;

pub use city::City;
pub use location::{Location, LocationType, LocationTypeCount, LocationWithNames};
pub use rate::{Rate, RateCandidate};
pub use service_feature::{ServiceFeature, VehicleTypeFeature};
pub use vehicle_type::VehicleType;
pub use zone::{Zone, ZoneWithCount};
