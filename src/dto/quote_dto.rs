use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::dto::vehicle_type_dto::FeatureSummary;
use crate::models::{LocationType, LocationWithNames};

/// Tipo de trayecto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::OneWay => "one_way",
            TripType::RoundTrip => "round_trip",
        }
    }
}

impl FromStr for TripType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one_way" | "oneway" | "one-way" => Ok(TripType::OneWay),
            "round_trip" | "roundtrip" | "round-trip" => Ok(TripType::RoundTrip),
            _ => Err(()),
        }
    }
}

// Query de GET /quote tal como llega; se interpreta en el controller
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub passengers: Option<String>,
    pub trip_type: Option<String>,
    pub vehicle_type_id: Option<String>,
}

/// Parámetros de presupuesto ya validados
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub from: Uuid,
    pub to: Uuid,
    pub passengers: i32,
    pub trip_type: TripType,
    pub vehicle_type_id: Option<Uuid>,
}

// Extremo (origen o destino) de un presupuesto
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteEndpoint {
    pub id: Uuid,
    pub name: String,
    pub location_type: LocationType,
    pub city_id: Uuid,
    pub city_name: String,
    pub zone_id: Option<Uuid>,
    pub zone_name: Option<String>,
}

impl From<LocationWithNames> for QuoteEndpoint {
    fn from(location: LocationWithNames) -> Self {
        let location_type =
            LocationType::from_code(&location.location_type).unwrap_or(LocationType::Generic);
        Self {
            id: location.id,
            name: location.name,
            location_type,
            city_id: location.city_id,
            city_name: location.city_name,
            zone_id: location.zone_id,
            zone_name: location.zone_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteVehicle {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub max_passengers: i32,
    pub max_luggage: i32,
}

// Una opción de precio para un tipo de vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteOption {
    pub rate_id: Uuid,
    pub vehicle_type: QuoteVehicle,
    pub price: Decimal,
    pub currency: String,
    pub service_features: Vec<FeatureSummary>,
    #[serde(skip)]
    pub sort_order: i32,
}

// Response de GET /quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub from: QuoteEndpoint,
    pub to: QuoteEndpoint,
    pub trip_type: TripType,
    pub passengers: i32,
    pub options: Vec<QuoteOption>,
}
