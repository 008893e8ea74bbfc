use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Rate;
use crate::utils::validation::{validate_non_negative_price, CURRENCY_RE};

// Request para crear una tarifa
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRateRequest {
    pub from_zone_id: Uuid,
    pub to_zone_id: Uuid,
    pub vehicle_type_id: Uuid,

    #[validate(custom = "validate_non_negative_price")]
    pub one_way_price: Decimal,

    #[validate(custom = "validate_non_negative_price")]
    pub round_trip_price: Option<Decimal>,

    #[validate(regex = "CURRENCY_RE")]
    pub currency: Option<String>,

    pub is_active: Option<bool>,
}

// Request para actualizar una tarifa
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRateRequest {
    pub from_zone_id: Option<Uuid>,
    pub to_zone_id: Option<Uuid>,
    pub vehicle_type_id: Option<Uuid>,

    #[validate(custom = "validate_non_negative_price")]
    pub one_way_price: Option<Decimal>,

    #[validate(custom = "validate_non_negative_price")]
    pub round_trip_price: Option<Decimal>,

    #[validate(regex = "CURRENCY_RE")]
    pub currency: Option<String>,

    pub is_active: Option<bool>,
}

// Response de tarifa
#[derive(Debug, Serialize)]
pub struct RateResponse {
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

impl From<Rate> for RateResponse {
    fn from(rate: Rate) -> Self {
        Self {
            id: rate.id,
            from_zone_id: rate.from_zone_id,
            to_zone_id: rate.to_zone_id,
            vehicle_type_id: rate.vehicle_type_id,
            one_way_price: rate.one_way_price,
            round_trip_price: rate.round_trip_price,
            currency: rate.currency,
            is_active: rate.is_active,
            created_at: rate.created_at,
            updated_at: rate.updated_at,
        }
    }
}
