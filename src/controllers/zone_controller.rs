use crate::dto::zone_dto::{CreateZoneRequest, UpdateZoneRequest, ZoneResponse};
use crate::dto::{ApiResponse, ListQuery};
use crate::i18n::keys;
use crate::repositories::city_repository::CityRepository;
use crate::repositories::zone_repository::ZoneRepository;
use crate::services::response_cache::{ResponseCache, LOCATION_PREFIXES};
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ZoneController {
    repository: ZoneRepository,
    cities: CityRepository,
    cache: ResponseCache,
}

impl ZoneController {
    pub fn new(pool: PgPool, cache: ResponseCache) -> Self {
        Self {
            repository: ZoneRepository::new(pool.clone()),
            cities: CityRepository::new(pool),
            cache,
        }
    }

    async fn ensure_city(&self, city_id: Uuid) -> Result<(), AppError> {
        if !self.cities.exists(city_id).await? {
            return Err(AppError::NotFound(keys::CITY_NOT_FOUND));
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateZoneRequest) -> Result<ApiResponse<ZoneResponse>, AppError> {
        request.validate()?;
        self.ensure_city(request.city_id).await?;

        let zone = self
            .repository
            .create(
                request.city_id,
                request.name.trim().to_string(),
                request.description,
                request.external_id,
                request.is_active.unwrap_or(true),
            )
            .await?;

        log::info!("🗺️ Zona creada: {} en ciudad {}", zone.name, zone.city_id);
        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::created(zone.into()))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ZoneResponse, AppError> {
        let zone = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::ZONE_NOT_FOUND))?;

        Ok(zone.into())
    }

    pub async fn list(&self, query: ListQuery) -> Result<Paginated<ZoneResponse>, AppError> {
        let (zones, total) = self.repository.list(&query).await?;
        Ok(Paginated::new(zones, &query.page_params(), total).map(ZoneResponse::from))
    }

    /// Actualizar; una zona con lugares no puede pasar a otra ciudad
    pub async fn update(&self, id: Uuid, request: UpdateZoneRequest) -> Result<ApiResponse<ZoneResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::ZONE_NOT_FOUND))?;

        if let Some(city_id) = request.city_id.filter(|city_id| *city_id != current.city_id) {
            self.ensure_city(city_id).await?;
            if self.repository.count_locations_outside_city(id, city_id).await? > 0 {
                return Err(AppError::Unprocessable(keys::ZONE_CITY_MISMATCH));
            }
        }

        let zone = self
            .repository
            .update(
                current,
                request.city_id,
                request.name.map(|name| name.trim().to_string()),
                request.description,
                request.external_id,
                request.is_active,
            )
            .await?;

        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::updated(zone.into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(keys::ZONE_NOT_FOUND));
        }

        log::info!("🗑️ Zona eliminada: {}", id);
        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::deleted())
    }
}
