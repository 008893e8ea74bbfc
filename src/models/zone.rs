//! Modelo de Zone
//!
//! Una zona es una subdivisión de una ciudad; las tarifas se definen
//! entre pares de zonas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Zone principal - mapea exactamente a la tabla zones
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Zone {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Zona con el número de lugares que contiene
#[derive(Debug, Clone, FromRow)]
pub struct ZoneWithCount {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub location_count: i64,
}
