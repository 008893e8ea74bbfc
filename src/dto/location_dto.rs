use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Location, LocationType, LocationTypeCount};
use crate::utils::validation::{validate_not_blank, LOCATION_CODE_RE};

fn validate_location_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<LocationType>()
        .map(|_| ())
        .map_err(|_| {
            let mut error = ValidationError::new("location_type");
            error.add_param("value".into(), &value.to_string());
            error.add_param("allowed".into(), &"A, H, B, P".to_string());
            error
        })
}

// Request para crear un lugar
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    pub city_id: Uuid,

    pub zone_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200), custom = "validate_not_blank")]
    pub name: String,

    #[validate(custom = "validate_location_type")]
    pub location_type: String,

    #[validate(regex = "LOCATION_CODE_RE")]
    pub code: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    #[validate(length(min = 1, max = 100))]
    pub external_id: Option<String>,

    pub is_active: Option<bool>,
}

// Request para actualizar un lugar
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    pub city_id: Option<Uuid>,

    pub zone_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[validate(custom = "validate_location_type")]
    pub location_type: Option<String>,

    #[validate(regex = "LOCATION_CODE_RE")]
    pub code: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    #[validate(length(min = 1, max = 100))]
    pub external_id: Option<String>,

    pub is_active: Option<bool>,
}

// Response de lugar
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: Uuid,
    pub city_id: Uuid,
    pub zone_id: Option<Uuid>,
    pub name: String,
    pub location_type: LocationType,
    pub type_code: &'static str,
    pub type_label: &'static str,
    pub code: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        let kind = location.kind();
        Self {
            id: location.id,
            city_id: location.city_id,
            zone_id: location.zone_id,
            name: location.name,
            location_type: kind,
            type_code: kind.code(),
            type_label: kind.label(),
            code: location.code,
            address: location.address,
            latitude: location.latitude,
            longitude: location.longitude,
            external_id: location.external_id,
            is_active: location.is_active,
            created_at: location.created_at,
            updated_at: location.updated_at,
        }
    }
}

// Conteo de lugares por tipo
#[derive(Debug, Serialize)]
pub struct LocationTypeCountResponse {
    pub location_type: LocationType,
    pub total: i64,
}

impl LocationTypeCountResponse {
    /// Un conteo por cada tipo, incluidos los que no tienen lugares
    pub fn complete(counts: Vec<LocationTypeCount>) -> Vec<Self> {
        LocationType::ALL
            .into_iter()
            .map(|kind| Self {
                location_type: kind,
                total: counts
                    .iter()
                    .filter(|c| c.location_type == kind.code())
                    .map(|c| c.total)
                    .sum(),
            })
            .collect()
    }
}
