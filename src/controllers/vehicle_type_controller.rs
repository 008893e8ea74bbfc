use std::collections::HashMap;

use crate::dto::vehicle_type_dto::{
    CreateVehicleTypeRequest, FeatureSummary, UpdateVehicleTypeRequest, VehicleTypeResponse,
};
use crate::dto::{ApiResponse, ListQuery};
use crate::i18n::keys;
use crate::models::VehicleType;
use crate::repositories::service_feature_repository::ServiceFeatureRepository;
use crate::repositories::vehicle_type_repository::{VehicleTypeFields, VehicleTypeRepository};
use crate::services::response_cache::{ResponseCache, PRICING_PREFIXES};
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleTypeController {
    repository: VehicleTypeRepository,
    features: ServiceFeatureRepository,
    cache: ResponseCache,
}

/// Ids sin repetir, conservando el orden recibido
fn unique_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

impl VehicleTypeController {
    pub fn new(pool: PgPool, cache: ResponseCache) -> Self {
        Self {
            repository: VehicleTypeRepository::new(pool.clone()),
            features: ServiceFeatureRepository::new(pool),
            cache,
        }
    }

    async fn find(&self, id: Uuid) -> Result<VehicleType, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::VEHICLE_TYPE_NOT_FOUND))
    }

    async fn check_features(&self, ids: &[Uuid]) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }
        if self.features.count_existing(ids).await? != ids.len() as i64 {
            return Err(AppError::Unprocessable(keys::FEATURE_IDS_INVALID));
        }
        Ok(())
    }

    async fn features_by_vehicle(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<FeatureSummary>>, AppError> {
        let mut grouped: HashMap<Uuid, Vec<FeatureSummary>> = HashMap::new();
        for feature in self.repository.features_for(ids).await? {
            grouped
                .entry(feature.vehicle_type_id)
                .or_default()
                .push(feature.into());
        }
        Ok(grouped)
    }

    async fn to_response(&self, vehicle_type: VehicleType) -> Result<VehicleTypeResponse, AppError> {
        let mut features = self.features_by_vehicle(&[vehicle_type.id]).await?;
        let own = features.remove(&vehicle_type.id).unwrap_or_default();
        Ok(VehicleTypeResponse::new(vehicle_type, own))
    }

    pub async fn create(&self, request: CreateVehicleTypeRequest) -> Result<ApiResponse<VehicleTypeResponse>, AppError> {
        request.validate()?;

        let feature_ids = unique_ids(request.service_feature_ids.unwrap_or_default());
        self.check_features(&feature_ids).await?;

        let fields = VehicleTypeFields {
            name: request.name.trim().to_string(),
            description: request.description,
            max_passengers: request.max_passengers,
            max_luggage: request.max_luggage.unwrap_or(0),
            sort_order: request.sort_order.unwrap_or(0),
            is_active: request.is_active.unwrap_or(true),
        };
        let vehicle_type = self.repository.create(fields, &feature_ids).await?;

        log::info!("🚐 Tipo de vehículo creado: {} ({} plazas)", vehicle_type.name, vehicle_type.max_passengers);
        self.cache.invalidate(PRICING_PREFIXES).await;

        Ok(ApiResponse::created(self.to_response(vehicle_type).await?))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleTypeResponse, AppError> {
        let vehicle_type = self.find(id).await?;
        self.to_response(vehicle_type).await
    }

    pub async fn list(&self, query: ListQuery) -> Result<Paginated<VehicleTypeResponse>, AppError> {
        let (vehicle_types, total) = self.repository.list(&query).await?;

        let ids: Vec<Uuid> = vehicle_types.iter().map(|vt| vt.id).collect();
        let mut features = self.features_by_vehicle(&ids).await?;

        Ok(Paginated::new(vehicle_types, &query.page_params(), total).map(|vt| {
            let own = features.remove(&vt.id).unwrap_or_default();
            VehicleTypeResponse::new(vt, own)
        }))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleTypeRequest,
    ) -> Result<ApiResponse<VehicleTypeResponse>, AppError> {
        request.validate()?;
        let current = self.find(id).await?;

        let feature_ids = request.service_feature_ids.map(unique_ids);
        if let Some(ids) = &feature_ids {
            self.check_features(ids).await?;
        }

        let fields = VehicleTypeFields {
            name: request
                .name
                .map(|name| name.trim().to_string())
                .unwrap_or(current.name),
            description: request.description.or(current.description),
            max_passengers: request.max_passengers.unwrap_or(current.max_passengers),
            max_luggage: request.max_luggage.unwrap_or(current.max_luggage),
            sort_order: request.sort_order.unwrap_or(current.sort_order),
            is_active: request.is_active.unwrap_or(current.is_active),
        };
        let vehicle_type = self
            .repository
            .update(id, fields, feature_ids.as_deref())
            .await?;

        self.cache.invalidate(PRICING_PREFIXES).await;

        Ok(ApiResponse::updated(self.to_response(vehicle_type).await?))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(keys::VEHICLE_TYPE_NOT_FOUND));
        }

        log::info!("🗑️ Tipo de vehículo eliminado: {}", id);
        self.cache.invalidate(PRICING_PREFIXES).await;

        Ok(ApiResponse::deleted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_keeps_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(unique_ids(vec![b, a, b, a]), vec![b, a]);
        assert!(unique_ids(Vec::new()).is_empty());
    }
}
