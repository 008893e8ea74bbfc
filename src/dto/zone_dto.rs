use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Zone, ZoneWithCount};
use crate::utils::validation::validate_not_blank;

// Request para crear una zona
#[derive(Debug, Deserialize, Validate)]
pub struct CreateZoneRequest {
    pub city_id: Uuid,

    #[validate(length(min = 1, max = 150), custom = "validate_not_blank")]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub external_id: Option<String>,

    pub is_active: Option<bool>,
}

// Request para actualizar una zona
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateZoneRequest {
    pub city_id: Option<Uuid>,

    #[validate(length(min = 1, max = 150), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub external_id: Option<String>,

    pub is_active: Option<bool>,
}

// Response de zona
#[derive(Debug, Serialize)]
pub struct ZoneResponse {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Zone> for ZoneResponse {
    fn from(zone: Zone) -> Self {
        Self {
            id: zone.id,
            city_id: zone.city_id,
            name: zone.name,
            description: zone.description,
            external_id: zone.external_id,
            is_active: zone.is_active,
            created_at: zone.created_at,
            updated_at: zone.updated_at,
        }
    }
}

// Zona dentro del detalle de una ciudad
#[derive(Debug, Serialize)]
pub struct ZoneSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub locations_count: i64,
}

impl From<ZoneWithCount> for ZoneSummaryResponse {
    fn from(zone: ZoneWithCount) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            description: zone.description,
            external_id: zone.external_id,
            is_active: zone.is_active,
            locations_count: zone.location_count,
        }
    }
}
