//! Importación del catálogo
//!
//! Carga ciudades, zonas y lugares desde un fichero JSON. Cada fila se
//! identifica por su `external_id`: si ya existe se reutiliza sin cambios,
//! así que la importación puede repetirse sin crear duplicados. Todo se
//! escribe en una sola transacción; al confirmarla se invalidan las
//! respuestas cacheadas que dependen de los lugares.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::i18n::{self, keys};
use crate::models::LocationType;
use crate::repositories::city_repository::CityRepository;
use crate::repositories::location_repository::{LocationFields, LocationRepository};
use crate::repositories::zone_repository::ZoneRepository;
use crate::services::response_cache::{ResponseCache, LOCATION_PREFIXES};
use crate::utils::errors::AppError;
use crate::utils::validation::{
    validate_coordinate_pair, validate_iata_code, COUNTRY_CODE_RE, LOCATION_CODE_RE,
};

/// Longitud máxima del nombre, igual que en la API
const CITY_NAME_MAX: usize = 150;
const ZONE_NAME_MAX: usize = 150;
const LOCATION_NAME_MAX: usize = 200;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub cities: Vec<CityEntry>,
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityEntry {
    pub external_id: String,
    pub name: String,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneEntry {
    pub external_id: String,
    pub city_external_id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationEntry {
    pub external_id: String,
    pub city_external_id: String,
    pub zone_external_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
    pub code: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Errores de un catálogo que no se puede importar
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("{kind} '{external_id}' is duplicated")]
    DuplicateExternalId { kind: &'static str, external_id: String },

    #[error("{kind} '{external_id}' has an empty {field}")]
    MissingField {
        kind: &'static str,
        external_id: String,
        field: &'static str,
    },

    #[error("{kind} '{external_id}' references unknown city '{city}'")]
    UnknownCity {
        kind: &'static str,
        external_id: String,
        city: String,
    },

    #[error("location '{external_id}' references unknown zone '{zone}'")]
    UnknownZone { external_id: String, zone: String },

    #[error("location '{external_id}' uses zone '{zone}' from another city")]
    ZoneCityMismatch { external_id: String, zone: String },

    #[error("location '{external_id}' has unknown type '{value}'")]
    UnknownLocationType { external_id: String, value: String },

    #[error("{kind} '{external_id}' has invalid {field}")]
    InvalidValue {
        kind: &'static str,
        external_id: String,
        field: &'static str,
    },

    #[error("zone '{zone}' already exists in a city other than '{city}'")]
    ZoneInOtherCity { zone: String, city: String },
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("database error: {0}")]
    Database(#[from] AppError),
}

impl From<sqlx::Error> for ImportError {
    fn from(error: sqlx::Error) -> Self {
        ImportError::Database(AppError::Database(error))
    }
}

/// Filas creadas y reutilizadas por tipo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportCount {
    pub created: usize,
    pub existing: usize,
}

impl ImportCount {
    fn record(&mut self, created: bool) {
        if created {
            self.created += 1;
        } else {
            self.existing += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub cities: ImportCount,
    pub zones: ImportCount,
    pub locations: ImportCount,
}

impl ImportReport {
    pub fn created(&self) -> usize {
        self.cities.created + self.zones.created + self.locations.created
    }

    pub fn existing(&self) -> usize {
        self.cities.existing + self.zones.existing + self.locations.existing
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::MissingField {
                kind,
                external_id: id.to_string(),
                field: "external_id",
            });
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateExternalId {
                kind,
                external_id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

fn ensure_name(kind: &'static str, external_id: &str, name: &str, max: usize) -> Result<(), CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::MissingField {
            kind,
            external_id: external_id.to_string(),
            field: "name",
        });
    }
    if name.chars().count() > max {
        return Err(CatalogError::InvalidValue {
            kind,
            external_id: external_id.to_string(),
            field: "name",
        });
    }
    Ok(())
}

impl CatalogFile {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Comprobar el catálogo completo antes de escribir nada
    pub fn validate(&self) -> Result<(), CatalogError> {
        let cities = ensure_unique("city", self.cities.iter().map(|c| c.external_id.as_str()))?;
        ensure_unique("zone", self.zones.iter().map(|z| z.external_id.as_str()))?;
        ensure_unique("location", self.locations.iter().map(|l| l.external_id.as_str()))?;

        for city in &self.cities {
            ensure_name("city", &city.external_id, &city.name, CITY_NAME_MAX)?;
            if let Some(code) = &city.country_code {
                if !COUNTRY_CODE_RE.is_match(code) {
                    return Err(CatalogError::InvalidValue {
                        kind: "city",
                        external_id: city.external_id.clone(),
                        field: "country_code",
                    });
                }
            }
        }

        let mut zone_city: HashMap<&str, &str> = HashMap::new();
        for zone in &self.zones {
            ensure_name("zone", &zone.external_id, &zone.name, ZONE_NAME_MAX)?;
            if !cities.contains(zone.city_external_id.as_str()) {
                return Err(CatalogError::UnknownCity {
                    kind: "zone",
                    external_id: zone.external_id.clone(),
                    city: zone.city_external_id.clone(),
                });
            }
            zone_city.insert(&zone.external_id, &zone.city_external_id);
        }

        for location in &self.locations {
            self.validate_location(location, &cities, &zone_city)?;
        }

        Ok(())
    }

    fn validate_location(
        &self,
        location: &LocationEntry,
        cities: &HashSet<&str>,
        zone_city: &HashMap<&str, &str>,
    ) -> Result<(), CatalogError> {
        let external_id = location.external_id.clone();
        ensure_name("location", &external_id, &location.name, LOCATION_NAME_MAX)?;

        if !cities.contains(location.city_external_id.as_str()) {
            return Err(CatalogError::UnknownCity {
                kind: "location",
                external_id,
                city: location.city_external_id.clone(),
            });
        }

        if let Some(zone) = &location.zone_external_id {
            match zone_city.get(zone.as_str()) {
                None => {
                    return Err(CatalogError::UnknownZone {
                        external_id,
                        zone: zone.clone(),
                    })
                }
                Some(city) if *city != location.city_external_id => {
                    return Err(CatalogError::ZoneCityMismatch {
                        external_id,
                        zone: zone.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        let kind: LocationType =
            location
                .location_type
                .parse()
                .map_err(|_| CatalogError::UnknownLocationType {
                    external_id: external_id.clone(),
                    value: location.location_type.clone(),
                })?;

        if let Some(code) = &location.code {
            let valid = match kind {
                LocationType::Airport => validate_iata_code(code).is_ok(),
                _ => LOCATION_CODE_RE.is_match(code),
            };
            if !valid {
                return Err(CatalogError::InvalidValue {
                    kind: "location",
                    external_id,
                    field: "code",
                });
            }
        }

        validate_coordinate_pair(location.latitude, location.longitude).map_err(|_| CatalogError::InvalidValue {
            kind: "location",
            external_id,
            field: "coordinates",
        })
    }
}

pub struct ImportService {
    pool: PgPool,
    cache: ResponseCache,
}

impl ImportService {
    pub fn new(pool: PgPool, cache: ResponseCache) -> Self {
        Self { pool, cache }
    }

    /// Validar e importar el catálogo en una transacción
    pub async fn run(&self, catalog: &CatalogFile) -> Result<ImportReport, ImportError> {
        catalog.validate()?;

        let mut report = ImportReport::default();
        let mut tx = self.pool.begin().await?;

        let mut city_ids: HashMap<&str, Uuid> = HashMap::new();
        for entry in &catalog.cities {
            let (city, created) = CityRepository::first_or_create(
                &mut tx,
                &entry.external_id,
                entry.name.trim(),
                entry.country_code.as_deref(),
            )
            .await?;
            report.cities.record(created);
            city_ids.insert(&entry.external_id, city.id);
        }

        let mut zone_ids: HashMap<&str, Uuid> = HashMap::new();
        for entry in &catalog.zones {
            let city_id = city_ids[entry.city_external_id.as_str()];
            let (zone, created) = ZoneRepository::first_or_create(
                &mut tx,
                &entry.external_id,
                city_id,
                entry.name.trim(),
                entry.description.as_deref(),
            )
            .await?;
            if zone.city_id != city_id {
                // la transacción se descarta al salir
                return Err(CatalogError::ZoneInOtherCity {
                    zone: entry.external_id.clone(),
                    city: entry.city_external_id.clone(),
                }
                .into());
            }
            report.zones.record(created);
            zone_ids.insert(&entry.external_id, zone.id);
        }

        for entry in &catalog.locations {
            let fields = LocationFields {
                city_id: city_ids[entry.city_external_id.as_str()],
                zone_id: entry
                    .zone_external_id
                    .as_deref()
                    .and_then(|zone| zone_ids.get(zone).copied()),
                name: entry.name.trim().to_string(),
                location_type: entry.location_type.parse().unwrap_or(LocationType::Generic),
                code: entry.code.clone(),
                address: entry.address.clone(),
                latitude: entry.latitude,
                longitude: entry.longitude,
                external_id: Some(entry.external_id.clone()),
                is_active: true,
            };
            let (_, created) = LocationRepository::first_or_create(&mut tx, &entry.external_id, fields).await?;
            report.locations.record(created);
        }

        tx.commit().await?;

        let removed = self.cache.invalidate(LOCATION_PREFIXES).await;
        if self.cache.is_enabled() {
            info!(
                "🧹 {}",
                i18n::t_with(keys::CACHE_CLEARED, &[("count", &removed.to_string())])
            );
        }

        info!(
            "📦 Catálogo importado: {} creados, {} existentes",
            report.created(),
            report.existing()
        );

        Ok(report)
    }
}
