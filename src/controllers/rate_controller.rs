use crate::dto::rate_dto::{CreateRateRequest, RateResponse, UpdateRateRequest};
use crate::dto::{ApiResponse, ListQuery};
use crate::i18n::keys;
use crate::repositories::rate_repository::{RateFields, RateRepository};
use crate::repositories::vehicle_type_repository::VehicleTypeRepository;
use crate::repositories::zone_repository::ZoneRepository;
use crate::services::response_cache::{ResponseCache, PRICING_PREFIXES};
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct RateController {
    repository: RateRepository,
    zones: ZoneRepository,
    vehicle_types: VehicleTypeRepository,
    cache: ResponseCache,
    default_currency: String,
}

impl RateController {
    pub fn new(pool: PgPool, cache: ResponseCache, default_currency: String) -> Self {
        Self {
            repository: RateRepository::new(pool.clone()),
            zones: ZoneRepository::new(pool.clone()),
            vehicle_types: VehicleTypeRepository::new(pool),
            cache,
            default_currency,
        }
    }

    /// Las dos zonas y el tipo de vehículo deben existir
    async fn check_references(&self, fields: &RateFields) -> Result<(), AppError> {
        for zone_id in [fields.from_zone_id, fields.to_zone_id] {
            if self.zones.find_by_id(zone_id).await?.is_none() {
                return Err(AppError::NotFound(keys::ZONE_NOT_FOUND));
            }
        }
        if !self.vehicle_types.exists(fields.vehicle_type_id).await? {
            return Err(AppError::NotFound(keys::VEHICLE_TYPE_NOT_FOUND));
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateRateRequest) -> Result<ApiResponse<RateResponse>, AppError> {
        request.validate()?;

        let fields = RateFields {
            from_zone_id: request.from_zone_id,
            to_zone_id: request.to_zone_id,
            vehicle_type_id: request.vehicle_type_id,
            one_way_price: request.one_way_price,
            round_trip_price: request.round_trip_price,
            currency: request
                .currency
                .unwrap_or_else(|| self.default_currency.clone()),
            is_active: request.is_active.unwrap_or(true),
        };
        self.check_references(&fields).await?;

        let rate = self.repository.create(fields).await?;

        log::info!(
            "💶 Tarifa creada: {} -> {} ({} {})",
            rate.from_zone_id,
            rate.to_zone_id,
            rate.one_way_price,
            rate.currency
        );
        self.cache.invalidate(PRICING_PREFIXES).await;

        Ok(ApiResponse::created(rate.into()))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RateResponse, AppError> {
        let rate = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::RATE_NOT_FOUND))?;

        Ok(rate.into())
    }

    pub async fn list(&self, query: ListQuery) -> Result<Paginated<RateResponse>, AppError> {
        let (rates, total) = self.repository.list(&query).await?;
        Ok(Paginated::new(rates, &query.page_params(), total).map(RateResponse::from))
    }

    pub async fn update(&self, id: Uuid, request: UpdateRateRequest) -> Result<ApiResponse<RateResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::RATE_NOT_FOUND))?;

        let fields = RateFields {
            from_zone_id: request.from_zone_id.unwrap_or(current.from_zone_id),
            to_zone_id: request.to_zone_id.unwrap_or(current.to_zone_id),
            vehicle_type_id: request.vehicle_type_id.unwrap_or(current.vehicle_type_id),
            one_way_price: request.one_way_price.unwrap_or(current.one_way_price),
            round_trip_price: request.round_trip_price.or(current.round_trip_price),
            currency: request.currency.unwrap_or(current.currency),
            is_active: request.is_active.unwrap_or(current.is_active),
        };
        self.check_references(&fields).await?;

        let rate = self.repository.update(id, fields).await?;
        self.cache.invalidate(PRICING_PREFIXES).await;

        Ok(ApiResponse::updated(rate.into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(keys::RATE_NOT_FOUND));
        }

        self.cache.invalidate(PRICING_PREFIXES).await;

        Ok(ApiResponse::deleted())
    }
}
