//! Tests contra PostgreSQL
//!
//! Solo se ejecutan si `TEST_DATABASE_URL` está definido; las migraciones
//! se aplican al empezar. Cada test usa identificadores externos únicos
//! para poder repetirse sobre la misma base de datos.

use axum::http::StatusCode;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use transfer_admin::config::DatabaseConfig;
use transfer_admin::controllers::location_controller::LocationController;
use transfer_admin::database::run_migrations;
use transfer_admin::dto::location_dto::CreateLocationRequest;
use transfer_admin::dto::quote_dto::{QuoteRequest, TripType};
use transfer_admin::dto::ListQuery;
use transfer_admin::i18n::keys;
use transfer_admin::models::LocationType;
use transfer_admin::repositories::city_repository::CityRepository;
use transfer_admin::repositories::location_repository::{LocationFields, LocationRepository};
use transfer_admin::repositories::rate_repository::{RateFields, RateRepository};
use transfer_admin::repositories::vehicle_type_repository::{VehicleTypeFields, VehicleTypeRepository};
use transfer_admin::repositories::zone_repository::ZoneRepository;
use transfer_admin::services::import_service::{CatalogError, ImportError};
use transfer_admin::services::{CatalogFile, ImportService, QuoteService, ResponseCache};

async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            println!("⏭️ TEST_DATABASE_URL no definido, test omitido");
            return None;
        }
    };
    let pool = DatabaseConfig::new(url).create_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();
    Some(pool)
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

fn location(city_id: Uuid, zone_id: Option<Uuid>, name: &str, kind: LocationType) -> LocationFields {
    LocationFields {
        city_id,
        zone_id,
        name: name.to_string(),
        location_type: kind,
        code: None,
        address: None,
        latitude: None,
        longitude: None,
        external_id: None,
        is_active: true,
    }
}

#[tokio::test]
async fn test_city_crud_and_duplicates() {
    let Some(pool) = test_pool().await else { return };
    let cities = CityRepository::new(pool.clone());
    let external_id = unique("city");

    let city = cities
        .create("Nice".to_string(), Some("FR".to_string()), Some(external_id.clone()), true)
        .await
        .unwrap();
    assert!(cities.exists(city.id).await.unwrap());

    let duplicate = cities
        .create("Nice bis".to_string(), None, Some(external_id), true)
        .await
        .unwrap_err();
    assert_eq!(duplicate.status_and_key(), (StatusCode::CONFLICT, keys::DUPLICATE_RESOURCE));

    let updated = cities
        .update(city.clone(), Some("Nizza".to_string()), None, None, Some(false))
        .await
        .unwrap();
    assert_eq!(updated.name, "Nizza");
    assert_eq!(updated.country_code.as_deref(), Some("FR"));
    assert!(!updated.is_active);

    let query = ListQuery {
        search: Some("nizz".to_string()),
        per_page: Some(100),
        ..Default::default()
    };
    let (found, total) = cities.list(&query).await.unwrap();
    assert!(total >= 1);
    assert!(found.iter().any(|c| c.id == city.id));

    assert!(cities.delete(city.id).await.unwrap());
    assert!(!cities.delete(city.id).await.unwrap());
}

#[tokio::test]
async fn test_city_in_use_cannot_be_deleted() {
    let Some(pool) = test_pool().await else { return };
    let cities = CityRepository::new(pool.clone());
    let zones = ZoneRepository::new(pool.clone());

    let city = cities.create(unique("Lyon"), None, None, true).await.unwrap();
    zones
        .create(city.id, "Part-Dieu".to_string(), None, None, true)
        .await
        .unwrap();

    let err = cities.delete(city.id).await.unwrap_err();
    assert_eq!(err.status_and_key(), (StatusCode::CONFLICT, keys::RESOURCE_IN_USE));
}

#[tokio::test]
async fn test_location_zone_must_belong_to_city() {
    let Some(pool) = test_pool().await else { return };
    let cities = CityRepository::new(pool.clone());
    let zones = ZoneRepository::new(pool.clone());

    let nice = cities.create(unique("Nice"), None, None, true).await.unwrap();
    let cannes = cities.create(unique("Cannes"), None, None, true).await.unwrap();
    let croisette = zones
        .create(cannes.id, "Croisette".to_string(), None, None, true)
        .await
        .unwrap();

    let controller = LocationController::new(pool.clone(), ResponseCache::disabled());
    let request = CreateLocationRequest {
        city_id: nice.id,
        zone_id: Some(croisette.id),
        name: "Hôtel Martinez".to_string(),
        location_type: "hotel".to_string(),
        code: None,
        address: None,
        latitude: None,
        longitude: None,
        external_id: None,
        is_active: None,
    };

    let err = controller.create(request).await.unwrap_err();
    assert_eq!(
        err.status_and_key(),
        (StatusCode::UNPROCESSABLE_ENTITY, keys::ZONE_CITY_MISMATCH)
    );
}

#[tokio::test]
async fn test_import_is_idempotent() {
    let Some(pool) = test_pool().await else { return };
    let city = unique("city");
    let zone = unique("zone");
    let airport = unique("loc");

    let catalog = CatalogFile::from_json(&format!(
        r#"{{
            "cities": [{{"external_id": "{city}", "name": "Marseille", "country_code": "FR"}}],
            "zones": [{{"external_id": "{zone}", "city_external_id": "{city}", "name": "Marignane"}}],
            "locations": [{{"external_id": "{airport}", "city_external_id": "{city}",
                            "zone_external_id": "{zone}", "name": "Marseille Provence", "type": "airport",
                            "code": "MRS"}}]
        }}"#
    ))
    .unwrap();

    let service = ImportService::new(pool.clone(), ResponseCache::disabled());

    let first = service.run(&catalog).await.unwrap();
    assert_eq!(first.created(), 3);
    assert_eq!(first.existing(), 0);

    let second = service.run(&catalog).await.unwrap();
    assert_eq!(second.created(), 0);
    assert_eq!(second.existing(), 3);
}

#[tokio::test]
async fn test_quote_end_to_end() {
    let Some(pool) = test_pool().await else { return };
    let cities = CityRepository::new(pool.clone());
    let zones = ZoneRepository::new(pool.clone());
    let locations = LocationRepository::new(pool.clone());
    let vehicle_types = VehicleTypeRepository::new(pool.clone());
    let rates = RateRepository::new(pool.clone());

    let city = cities.create(unique("Casablanca"), None, None, true).await.unwrap();
    let airport_zone = zones
        .create(city.id, "Nouaceur".to_string(), None, None, true)
        .await
        .unwrap();
    let centre = zones
        .create(city.id, "Centre".to_string(), None, None, true)
        .await
        .unwrap();

    let airport = locations
        .create(location(city.id, Some(airport_zone.id), "Mohammed V", LocationType::Airport))
        .await
        .unwrap();
    let hotel = locations
        .create(location(city.id, Some(centre.id), "Hyatt Regency", LocationType::Hotel))
        .await
        .unwrap();

    let sedan = vehicle_types
        .create(
            VehicleTypeFields {
                name: unique("Sedan"),
                description: None,
                max_passengers: 3,
                max_luggage: 3,
                sort_order: 1,
                is_active: true,
            },
            &[],
        )
        .await
        .unwrap();

    rates
        .create(RateFields {
            from_zone_id: centre.id,
            to_zone_id: airport_zone.id,
            vehicle_type_id: sedan.id,
            one_way_price: Decimal::new(4500, 2),
            round_trip_price: None,
            currency: "MAD".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    let service = QuoteService::new(pool.clone());
    let request = QuoteRequest {
        from: airport.id,
        to: hotel.id,
        passengers: 2,
        trip_type: TripType::RoundTrip,
        vehicle_type_id: None,
    };

    let quote = service.quote(&request).await.unwrap();
    assert_eq!(quote.options.len(), 1);
    assert_eq!(quote.options[0].price, Decimal::new(9000, 2));
    assert_eq!(quote.options[0].currency, "MAD");
    assert_eq!(quote.from.city_name, city.name);

    let crowded = QuoteRequest { passengers: 5, ..request };
    let err = service.quote(&crowded).await.unwrap_err();
    assert_eq!(err.status_and_key(), (StatusCode::NOT_FOUND, keys::RATE_NOT_AVAILABLE));
}

#[tokio::test]
async fn test_import_rejects_existing_zone_from_another_city() {
    let Some(pool) = test_pool().await else { return };
    let cities = CityRepository::new(pool.clone());
    let zones = ZoneRepository::new(pool.clone());

    let marseille = cities.create(unique("Marseille"), None, None, true).await.unwrap();
    let zone = unique("zone");
    zones
        .create(marseille.id, "Vieux-Port".to_string(), None, Some(zone.clone()), true)
        .await
        .unwrap();

    let nice = unique("city");
    let hotel = unique("loc");
    let catalog = CatalogFile::from_json(&format!(
        r#"{{
            "cities": [{{"external_id": "{nice}", "name": "Nice"}}],
            "zones": [{{"external_id": "{zone}", "city_external_id": "{nice}", "name": "Vieux-Port"}}],
            "locations": [{{"external_id": "{hotel}", "city_external_id": "{nice}",
                            "zone_external_id": "{zone}", "name": "Hotel Negresco", "type": "hotel"}}]
        }}"#
    ))
    .unwrap();

    let result = ImportService::new(pool.clone(), ResponseCache::disabled())
        .run(&catalog)
        .await;
    assert!(matches!(
        result,
        Err(ImportError::Catalog(CatalogError::ZoneInOtherCity { .. }))
    ));

    // nada de la importación queda escrito
    let written: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM cities WHERE external_id = $1) \
              + (SELECT COUNT(*) FROM locations WHERE external_id = $2)",
    )
    .bind(&nice)
    .bind(&hotel)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(written, 0);
}

#[tokio::test]
async fn test_quote_ignores_inactive_locations() {
    let Some(pool) = test_pool().await else { return };
    let cities = CityRepository::new(pool.clone());
    let zones = ZoneRepository::new(pool.clone());
    let locations = LocationRepository::new(pool.clone());

    let city = cities.create(unique("Agadir"), None, None, true).await.unwrap();
    let zone = zones
        .create(city.id, "Centre".to_string(), None, None, true)
        .await
        .unwrap();
    let airport = locations
        .create(location(city.id, Some(zone.id), "Al Massira", LocationType::Airport))
        .await
        .unwrap();
    let closed = locations
        .create(LocationFields {
            is_active: false,
            ..location(city.id, Some(zone.id), "Hotel fermé", LocationType::Hotel)
        })
        .await
        .unwrap();

    let request = QuoteRequest {
        from: airport.id,
        to: closed.id,
        passengers: 1,
        trip_type: TripType::OneWay,
        vehicle_type_id: None,
    };
    let err = QuoteService::new(pool.clone()).quote(&request).await.unwrap_err();
    assert_eq!(err.status_and_key(), (StatusCode::NOT_FOUND, keys::LOCATION_NOT_FOUND));
}
