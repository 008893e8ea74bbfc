//! Repositorios
//!
//! Acceso a PostgreSQL por recurso. Cada repositorio recibe el pool
//! compartido; las operaciones de importación reciben una conexión
//! para poder ejecutarse dentro de una transacción.

pub mod city_repository;
pub mod location_repository;
pub mod rate_repository;
pub mod service_feature_repository;
pub mod vehicle_type_repository;
pub mod zone_repository;
