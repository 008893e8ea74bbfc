use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ServiceFeature;
use crate::utils::validation::validate_not_blank;

// Request para crear un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceFeatureRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub icon: Option<String>,

    pub is_active: Option<bool>,
}

// Request para actualizar un servicio
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceFeatureRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub icon: Option<String>,

    pub is_active: Option<bool>,
}

// Response de servicio
#[derive(Debug, Serialize)]
pub struct ServiceFeatureResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceFeature> for ServiceFeatureResponse {
    fn from(feature: ServiceFeature) -> Self {
        Self {
            id: feature.id,
            name: feature.name,
            description: feature.description,
            icon: feature.icon,
            is_active: feature.is_active,
            created_at: feature.created_at,
            updated_at: feature.updated_at,
        }
    }
}
