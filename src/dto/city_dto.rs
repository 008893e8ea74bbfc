use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::location_dto::LocationTypeCountResponse;
use crate::dto::zone_dto::ZoneSummaryResponse;
use crate::models::City;
use crate::utils::validation::{validate_not_blank, COUNTRY_CODE_RE};

// Request para crear una ciudad
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCityRequest {
    #[validate(length(min = 1, max = 150), custom = "validate_not_blank")]
    pub name: String,

    #[validate(regex = "COUNTRY_CODE_RE")]
    pub country_code: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub external_id: Option<String>,

    pub is_active: Option<bool>,
}

// Request para actualizar una ciudad
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCityRequest {
    #[validate(length(min = 1, max = 150), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[validate(regex = "COUNTRY_CODE_RE")]
    pub country_code: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub external_id: Option<String>,

    pub is_active: Option<bool>,
}

// Response de ciudad
#[derive(Debug, Serialize)]
pub struct CityResponse {
    pub id: Uuid,
    pub name: String,
    pub country_code: Option<String>,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            country_code: city.country_code,
            external_id: city.external_id,
            is_active: city.is_active,
            created_at: city.created_at,
            updated_at: city.updated_at,
        }
    }
}

// Response de GET /cities/:id/details
#[derive(Debug, Serialize)]
pub struct CityDetailsResponse {
    #[serde(flatten)]
    pub city: CityResponse,
    pub zones_count: usize,
    pub locations_count: i64,
    pub locations_by_type: Vec<LocationTypeCountResponse>,
    pub zones: Vec<ZoneSummaryResponse>,
}
