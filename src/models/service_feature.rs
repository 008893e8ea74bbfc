//! Modelo de ServiceFeature
//!
//! Servicios incluidos con un tipo de vehículo (wifi, agua, silla de bebé...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceFeature {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fila de la tabla puente vehicle_type_service_features con el servicio
#[derive(Debug, Clone, FromRow)]
pub struct VehicleTypeFeature {
    pub vehicle_type_id: Uuid,
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
}
