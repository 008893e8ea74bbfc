use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{VehicleType, VehicleTypeFeature};
use crate::utils::validation::validate_not_blank;

// Request para crear un tipo de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleTypeRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 60))]
    pub max_passengers: i32,

    #[validate(range(min = 0, max = 100))]
    pub max_luggage: Option<i32>,

    pub sort_order: Option<i32>,

    pub is_active: Option<bool>,

    pub service_feature_ids: Option<Vec<Uuid>>,
}

// Request para actualizar un tipo de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleTypeRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 60))]
    pub max_passengers: Option<i32>,

    #[validate(range(min = 0, max = 100))]
    pub max_luggage: Option<i32>,

    pub sort_order: Option<i32>,

    pub is_active: Option<bool>,

    /// Si viene, reemplaza el conjunto completo de servicios
    pub service_feature_ids: Option<Vec<Uuid>>,
}

// Servicio resumido dentro de un tipo de vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
}

impl From<VehicleTypeFeature> for FeatureSummary {
    fn from(feature: VehicleTypeFeature) -> Self {
        Self {
            id: feature.id,
            name: feature.name,
            icon: feature.icon,
        }
    }
}

// Response de tipo de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub max_passengers: i32,
    pub max_luggage: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub service_features: Vec<FeatureSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VehicleTypeResponse {
    pub fn new(vehicle_type: VehicleType, features: Vec<FeatureSummary>) -> Self {
        Self {
            id: vehicle_type.id,
            name: vehicle_type.name,
            description: vehicle_type.description,
            max_passengers: vehicle_type.max_passengers,
            max_luggage: vehicle_type.max_luggage,
            sort_order: vehicle_type.sort_order,
            is_active: vehicle_type.is_active,
            service_features: features,
            created_at: vehicle_type.created_at,
            updated_at: vehicle_type.updated_at,
        }
    }
}
