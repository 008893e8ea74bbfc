//! Modelo de VehicleType

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// VehicleType principal - mapea exactamente a la tabla vehicle_types
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub max_passengers: i32,
    pub max_luggage: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VehicleType {
    pub fn can_carry(&self, passengers: i32) -> bool {
        self.max_passengers >= passengers
    }
}
