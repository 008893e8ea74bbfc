use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{LocationType, LocationWithNames};

pub const MIN_QUERY_LENGTH: usize = 2;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;

// Query de GET /autocomplete
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
    #[serde(rename = "type")]
    pub location_type: Option<String>,
    pub city_id: Option<Uuid>,
}

impl AutocompleteQuery {
    /// Texto buscado, o `None` si es demasiado corto para buscar
    pub fn term(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| q.chars().count() >= MIN_QUERY_LENGTH)
            .map(|q| q.to_string())
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

// Sugerencia de autocompletado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutocompleteItem {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub location_type: LocationType,
    pub type_label: String,
    pub city_id: Uuid,
    pub city_name: String,
    pub zone_id: Option<Uuid>,
    pub zone_name: Option<String>,
    pub label: String,
}

impl From<LocationWithNames> for AutocompleteItem {
    fn from(location: LocationWithNames) -> Self {
        let location_type =
            LocationType::from_code(&location.location_type).unwrap_or(LocationType::Generic);
        let label = format!("{}, {}", location.name, location.city_name);
        Self {
            id: location.id,
            name: location.name,
            code: location.code,
            location_type,
            type_label: location_type.label().to_string(),
            city_id: location.city_id,
            city_name: location.city_name,
            zone_id: location.zone_id,
            zone_name: location.zone_name,
            label,
        }
    }
}
