use crate::dto::location_dto::{CreateLocationRequest, LocationResponse, UpdateLocationRequest};
use crate::dto::{ApiResponse, ListQuery};
use crate::i18n::keys;
use crate::models::{Location, LocationType};
use crate::repositories::city_repository::CityRepository;
use crate::repositories::location_repository::{LocationFields, LocationRepository};
use crate::repositories::zone_repository::ZoneRepository;
use crate::services::response_cache::{ResponseCache, LOCATION_PREFIXES};
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;
use crate::utils::validation::{field_error, validate_coordinate_pair, validate_iata_code};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct LocationController {
    repository: LocationRepository,
    cities: CityRepository,
    zones: ZoneRepository,
    cache: ResponseCache,
}

/// Interpretar el tipo de lugar recibido en la ruta o el cuerpo
pub fn parse_location_type(value: &str) -> Result<LocationType, AppError> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(keys::INVALID_LOCATION_TYPE))
}

impl LocationController {
    pub fn new(pool: PgPool, cache: ResponseCache) -> Self {
        Self {
            repository: LocationRepository::new(pool.clone()),
            cities: CityRepository::new(pool.clone()),
            zones: ZoneRepository::new(pool),
            cache,
        }
    }

    async fn find(&self, id: Uuid) -> Result<Location, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(keys::LOCATION_NOT_FOUND))
    }

    /// Comprobaciones que dependen de otros campos o de la base de datos
    async fn check_fields(&self, fields: &LocationFields) -> Result<(), AppError> {
        validate_coordinate_pair(fields.latitude, fields.longitude).map_err(|e| field_error("coordinates", e))?;

        if let (LocationType::Airport, Some(code)) = (fields.location_type, &fields.code) {
            validate_iata_code(code).map_err(|e| field_error("code", e))?;
        }

        if !self.cities.exists(fields.city_id).await? {
            return Err(AppError::NotFound(keys::CITY_NOT_FOUND));
        }

        if let Some(zone_id) = fields.zone_id {
            let zone = self
                .zones
                .find_by_id(zone_id)
                .await?
                .ok_or(AppError::NotFound(keys::ZONE_NOT_FOUND))?;
            if zone.city_id != fields.city_id {
                return Err(AppError::Unprocessable(keys::ZONE_CITY_MISMATCH));
            }
        }

        Ok(())
    }

    pub async fn create(&self, request: CreateLocationRequest) -> Result<ApiResponse<LocationResponse>, AppError> {
        request.validate()?;

        let fields = LocationFields {
            city_id: request.city_id,
            zone_id: request.zone_id,
            name: request.name.trim().to_string(),
            location_type: parse_location_type(&request.location_type)?,
            code: request.code,
            address: request.address,
            latitude: request.latitude,
            longitude: request.longitude,
            external_id: request.external_id,
            is_active: request.is_active.unwrap_or(true),
        };
        self.check_fields(&fields).await?;

        let location = self.repository.create(fields).await?;

        log::info!("📍 Lugar creado: {} ({})", location.name, location.location_type);
        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::created(location.into()))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<LocationResponse, AppError> {
        Ok(self.find(id).await?.into())
    }

    pub async fn list(&self, query: ListQuery) -> Result<Paginated<LocationResponse>, AppError> {
        let (locations, total) = self.repository.list(&query).await?;
        Ok(Paginated::new(locations, &query.page_params(), total).map(LocationResponse::from))
    }

    pub async fn by_type(&self, location_type: &str) -> Result<Vec<LocationResponse>, AppError> {
        let location_type = parse_location_type(location_type)?;
        let locations = self.repository.find_by_type(location_type).await?;
        Ok(locations.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, id: Uuid, request: UpdateLocationRequest) -> Result<ApiResponse<LocationResponse>, AppError> {
        request.validate()?;
        let current = self.find(id).await?;

        let location_type = match request.location_type.as_deref() {
            Some(value) => parse_location_type(value)?,
            None => current.kind(),
        };

        let fields = LocationFields {
            city_id: request.city_id.unwrap_or(current.city_id),
            zone_id: request.zone_id.or(current.zone_id),
            name: request
                .name
                .map(|name| name.trim().to_string())
                .unwrap_or(current.name),
            location_type,
            code: request.code.or(current.code),
            address: request.address.or(current.address),
            latitude: request.latitude.or(current.latitude),
            longitude: request.longitude.or(current.longitude),
            external_id: request.external_id.or(current.external_id),
            is_active: request.is_active.unwrap_or(current.is_active),
        };
        self.check_fields(&fields).await?;

        let location = self.repository.update(id, fields).await?;
        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::updated(location.into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(keys::LOCATION_NOT_FOUND));
        }

        log::info!("🗑️ Lugar eliminado: {}", id);
        self.cache.invalidate(LOCATION_PREFIXES).await;

        Ok(ApiResponse::deleted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_type() {
        assert_eq!(parse_location_type("airport").unwrap(), LocationType::Airport);
        assert_eq!(parse_location_type("B").unwrap(), LocationType::Business);

        let err = parse_location_type("xyz").unwrap_err();
        assert_eq!(err.status_and_key().1, keys::INVALID_LOCATION_TYPE);
        assert_eq!(err.status_and_key().0, axum::http::StatusCode::BAD_REQUEST);
    }
}
