use crate::dto::city_dto::{CityDetailsResponse, CityResponse, CreateCityRequest, UpdateCityRequest};
use crate::dto::location_dto::{LocationResponse, LocationTypeCountResponse};
use crate::dto::zone_dto::{ZoneResponse, ZoneSummaryResponse};
use crate::dto::{ApiResponse, ListQuery};
use crate::i18n::keys;
use crate::models::City;
use crate::repositories::city_repository::CityRepository;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::zone_repository::ZoneRepository;
use crate::services::response_cache::{ResponseCache, LOCATION_PREFIXES};
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct CityController {
    repository: CityRepository,
    zones: ZoneRepository,
    locations: LocationRepository,
    cache: ResponseCache,
}

impl CityController {
    pub fn new(pool: PgPool, cache: ResponseCache) -> Self {
        Self {
            repository: CityRepository::new(pool.clone()),
            zones: ZoneRepository::new(pool.clone()),
            locations: LocationRepository::new(pool),
            cache,
        }
    }

    async fn find(&self, id: Uuid) -> Result<City, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::CITY_NOT_FOUND))
    }

    async fn ensure_exists(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.exists(id).await? {
            return Err(AppError::NotFound(keys::CITY_NOT_FOUND));
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateCityRequest) -> Result<ApiResponse<CityResponse>, AppError> {
        request.validate()?;

        let city = self
            .repository
            .create(
                request.name.trim().to_string(),
                request.country_code,
                request.external_id,
                request.is_active.unwrap_or(true),
            )
            .await?;

        log::info!("🏙️ Ciudad creada: {} ({})", city.name, city.id);
        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::created(city.into()))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CityResponse, AppError> {
        Ok(self.find(id).await?.into())
    }

    pub async fn list(&self, query: ListQuery) -> Result<Paginated<CityResponse>, AppError> {
        let (cities, total) = self.repository.list(&query).await?;
        Ok(Paginated::new(cities, &query.page_params(), total).map(CityResponse::from))
    }

    pub async fn update(&self, id: Uuid, request: UpdateCityRequest) -> Result<ApiResponse<CityResponse>, AppError> {
        request.validate()?;
        let current = self.find(id).await?;

        let city = self
            .repository
            .update(
                current,
                request.name.map(|name| name.trim().to_string()),
                request.country_code,
                request.external_id,
                request.is_active,
            )
            .await?;

        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::updated(city.into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(keys::CITY_NOT_FOUND));
        }

        log::info!("🗑️ Ciudad eliminada: {}", id);
        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::deleted())
    }

    /// Ciudad con sus zonas y el recuento de lugares por tipo
    pub async fn details(&self, id: Uuid) -> Result<CityDetailsResponse, AppError> {
        let city = self.find(id).await?;
        let zones = self.zones.find_by_city_with_counts(id).await?;
        let counts = self.locations.count_by_type(id).await?;

        let locations_count = counts.iter().map(|c| c.total).sum();
        let zones: Vec<ZoneSummaryResponse> = zones.into_iter().map(Into::into).collect();

        Ok(CityDetailsResponse {
            city: city.into(),
            zones_count: zones.len(),
            locations_count,
            locations_by_type: LocationTypeCountResponse::complete(counts),
            zones,
        })
    }

    pub async fn zones(&self, id: Uuid) -> Result<Vec<ZoneResponse>, AppError> {
        self.ensure_exists(id).await?;
        let zones = self.zones.find_by_city(id).await?;
        Ok(zones.into_iter().map(Into::into).collect())
    }

    pub async fn locations(&self, id: Uuid) -> Result<Vec<LocationResponse>, AppError> {
        self.ensure_exists(id).await?;
        let locations = self.locations.find_by_city(id).await?;
        Ok(locations.into_iter().map(Into::into).collect())
    }
}
