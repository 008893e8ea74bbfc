//! Modelo de Rate
//!
//! Una tarifa asocia un par de zonas (origen, destino) y un tipo de
//! vehículo con un precio de ida y, opcionalmente, de ida y vuelta.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Rate principal - mapea exactamente a la tabla rates
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rate {
    pub id: Uuid,
    pub from_zone_id: Uuid,
    pub to_zone_id: Uuid,
    pub vehicle_type_id: Uuid,
    pub one_way_price: Decimal,
    pub round_trip_price: Option<Decimal>,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tarifa candidata para un presupuesto, unida a su tipo de vehículo
#[derive(Debug, Clone, FromRow)]
pub struct RateCandidate {
    pub rate_id: Uuid,
    pub from_zone_id: Uuid,
    pub to_zone_id: Uuid,
    pub one_way_price: Decimal,
    pub round_trip_price: Option<Decimal>,
    pub currency: String,
    pub vehicle_type_id: Uuid,
    pub vehicle_type_name: String,
    pub vehicle_type_description: Option<String>,
    pub max_passengers: i32,
    pub max_luggage: i32,
    pub sort_order: i32,
}
