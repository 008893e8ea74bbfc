use crate::dto::service_feature_dto::{
    CreateServiceFeatureRequest, ServiceFeatureResponse, UpdateServiceFeatureRequest,
};
use crate::dto::{ApiResponse, ListQuery};
use crate::i18n::keys;
use crate::repositories::service_feature_repository::ServiceFeatureRepository;
use crate::services::response_cache::{ResponseCache, PRICING_PREFIXES};
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ServiceFeatureController {
    repository: ServiceFeatureRepository,
    cache: ResponseCache,
}

impl ServiceFeatureController {
    pub fn new(pool: PgPool, cache: ResponseCache) -> Self {
        Self {
            repository: ServiceFeatureRepository::new(pool),
            cache,
        }
    }

    pub async fn create(
        &self,
        request: CreateServiceFeatureRequest,
    ) -> Result<ApiResponse<ServiceFeatureResponse>, AppError> {
        request.validate()?;

        let feature = self
            .repository
            .create(
                request.name.trim().to_string(),
                request.description,
                request.icon,
                request.is_active.unwrap_or(true),
            )
            .await?;

        Ok(ApiResponse::created(feature.into()))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ServiceFeatureResponse, AppError> {
        let feature = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::SERVICE_FEATURE_NOT_FOUND))?;

        Ok(feature.into())
    }

    pub async fn list(&self, query: ListQuery) -> Result<Paginated<ServiceFeatureResponse>, AppError> {
        let (features, total) = self.repository.list(&query).await?;
        Ok(Paginated::new(features, &query.page_params(), total).map(ServiceFeatureResponse::from))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateServiceFeatureRequest,
    ) -> Result<ApiResponse<ServiceFeatureResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::SERVICE_FEATURE_NOT_FOUND))?;

        let feature = self
            .repository
            .update(
                current,
                request.name.map(|name| name.trim().to_string()),
                request.description,
                request.icon,
                request.is_active,
            )
            .await?;

        self.cache.invalidate(PRICING_PREFIXES).await;

        Ok(ApiResponse::updated(feature.into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(keys::SERVICE_FEATURE_NOT_FOUND));
        }

        self.cache.invalidate(PRICING_PREFIXES).await;

        Ok(ApiResponse::deleted())
    }
}
