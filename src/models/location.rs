//! Modelo de Location
//!
//! Un lugar es un punto de interés (aeropuerto, hotel, empresa o genérico)
//! que puede usarse como origen o destino de un presupuesto. El tipo se
//! guarda en la base de datos como una letra.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tipo de lugar - mapea a la columna location_type ('A', 'H', 'B', 'P')
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Airport,
    Hotel,
    Business,
    Generic,
}

impl LocationType {
    pub const ALL: [LocationType; 4] = [
        LocationType::Airport,
        LocationType::Hotel,
        LocationType::Business,
        LocationType::Generic,
    ];

    /// Código de una letra almacenado en base de datos
    pub fn code(&self) -> &'static str {
        match self {
            LocationType::Airport => "A",
            LocationType::Hotel => "H",
            LocationType::Business => "B",
            LocationType::Generic => "P",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocationType::Airport => "airport",
            LocationType::Hotel => "hotel",
            LocationType::Business => "business",
            LocationType::Generic => "generic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Airport => "Airport",
            LocationType::Hotel => "Hotel",
            LocationType::Business => "Business",
            LocationType::Generic => "Place",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Acepta el código (`A`) o el nombre (`airport`), sin distinguir mayúsculas
impl FromStr for LocationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(value) || t.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("Unknown location type '{}'", value))
    }
}

/// Location principal - mapea exactamente a la tabla locations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub city_id: Uuid,
    pub zone_id: Option<Uuid>,
    pub name: String,
    pub location_type: String,
    pub code: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub external_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Tipo del lugar; un código desconocido se trata como genérico
    pub fn kind(&self) -> LocationType {
        LocationType::from_code(&self.location_type).unwrap_or(LocationType::Generic)
    }
}

/// Lugar con los nombres de su ciudad y zona (autocompletado, presupuestos)
#[derive(Debug, Clone, FromRow)]
pub struct LocationWithNames {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub location_type: String,
    pub city_id: Uuid,
    pub city_name: String,
    pub zone_id: Option<Uuid>,
    pub zone_name: Option<String>,
}

/// Conteo de lugares por tipo en una ciudad
#[derive(Debug, Clone, FromRow)]
pub struct LocationTypeCount {
    pub location_type: String,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_code_and_name() {
        assert_eq!("A".parse::<LocationType>().unwrap(), LocationType::Airport);
        assert_eq!("h".parse::<LocationType>().unwrap(), LocationType::Hotel);
        assert_eq!("Business".parse::<LocationType>().unwrap(), LocationType::Business);
        assert_eq!("p".parse::<LocationType>().unwrap(), LocationType::Generic);
        assert_eq!("generic".parse::<LocationType>().unwrap(), LocationType::Generic);
        assert!("station".parse::<LocationType>().is_err());
        assert!("".parse::<LocationType>().is_err());
    }

    #[test]
    fn test_code_round_trip() {
        for kind in LocationType::ALL {
            assert_eq!(LocationType::from_code(kind.code()), Some(kind));
        }
        assert_eq!(LocationType::from_code("Z"), None);
    }
}
