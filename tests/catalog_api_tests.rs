//! Tests de los endpoints del catálogo contra PostgreSQL
//!
//! Recorren el router completo con `oneshot`. Solo se ejecutan si
//! `TEST_DATABASE_URL` está definido; los nombres y `external_id` llevan un
//! sufijo aleatorio para poder repetirse sobre la misma base de datos.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use transfer_admin::config::{DatabaseConfig, EnvironmentConfig};
use transfer_admin::create_app;
use transfer_admin::database::run_migrations;
use transfer_admin::state::AppState;

async fn test_app() -> Option<Router> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            println!("⏭️ TEST_DATABASE_URL no definido, test omitido");
            return None;
        }
    };
    let pool = DatabaseConfig::new(url).create_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();
    Some(create_app(AppState::new(pool, EnvironmentConfig::default(), None)))
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ACCEPT_LANGUAGE, "en");
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::POST, uri, Some(body)).await
}

async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::PUT, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::DELETE, uri, None).await
}

/// Crear un recurso y devolver su id
async fn create(app: &Router, uri: &str, body: Value) -> String {
    let (status, body) = post(app, uri, body).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} -> {}", uri, body);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_with_database() {
    let Some(app) = test_app().await else { return };

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    assert_eq!(body["cache"], "disabled");
    assert_eq!(body["cache_message"], "Response cache disabled.");
}

#[tokio::test]
async fn test_unknown_city_is_not_found() {
    let Some(app) = test_app().await else { return };
    let id = Uuid::new_v4();

    for uri in [
        format!("/api/v1/cities/{}", id),
        format!("/api/v1/cities/{}/details", id),
        format!("/api/v1/cities/{}/zones", id),
        format!("/api/v1/cities/{}/locations", id),
    ] {
        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["code"], "CITY_NOT_FOUND");
        assert_eq!(body["message"], "City not found.");
    }
}

#[tokio::test]
async fn test_city_lifecycle() {
    let Some(app) = test_app().await else { return };
    let name = unique("Tanger");
    let external_id = unique("city");

    let (status, body) = post(
        &app,
        "/api/v1/cities",
        json!({"name": name, "country_code": "MA", "external_id": external_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Resource created successfully.");
    assert_eq!(body["data"]["name"], name.as_str());
    assert_eq!(body["data"]["is_active"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(&app, "/api/v1/cities", json!({"name": "Tanger", "external_id": external_id})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_RESOURCE");

    let (status, body) = get(&app, &format!("/api/v1/cities?search={}", name)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["id"], id.as_str());

    let (status, body) = put(&app, &format!("/api/v1/cities/{}", id), json!({"is_active": false})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Resource updated successfully.");
    assert_eq!(body["data"]["is_active"], false);
    assert_eq!(body["data"]["country_code"], "MA");

    let (status, body) = get(&app, &format!("/api/v1/cities/{}/details", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], name.as_str());
    assert_eq!(body["zones_count"], 0);
    assert_eq!(body["locations_count"], 0);
    assert_eq!(body["locations_by_type"].as_array().unwrap().len(), 4);

    let (status, body) = get(&app, &format!("/api/v1/cities/{}/zones", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = delete(&app, &format!("/api/v1/cities/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Resource deleted successfully.");

    let (status, body) = delete(&app, &format!("/api/v1/cities/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CITY_NOT_FOUND");
}

#[tokio::test]
async fn test_zone_and_location_lifecycle() {
    let Some(app) = test_app().await else { return };
    let city = create(&app, "/api/v1/cities", json!({"name": unique("Nice")})).await;
    let other_city = create(&app, "/api/v1/cities", json!({"name": unique("Cannes")})).await;

    let (status, body) = post(
        &app,
        "/api/v1/zones",
        json!({"city_id": city, "name": "Aéroport", "description": "Terminal 1 et 2"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["city_id"], city.as_str());
    let zone = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(&app, "/api/v1/zones", json!({"city_id": Uuid::new_v4(), "name": "Nulle part"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CITY_NOT_FOUND");

    let (status, body) = get(&app, &format!("/api/v1/zones?city_id={}", city)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = post(
        &app,
        "/api/v1/locations",
        json!({
            "city_id": city,
            "zone_id": zone,
            "name": "Nice Côte d'Azur",
            "location_type": "airport",
            "code": "NCE",
            "latitude": 43.6584,
            "longitude": 7.2159
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["location_type"], "airport");
    assert_eq!(body["data"]["type_code"], "A");
    assert_eq!(body["data"]["zone_id"], zone.as_str());
    let location = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = get(&app, "/api/v1/locations/type/A").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .any(|l| l["id"] == location.as_str()));

    let (status, body) = get(&app, &format!("/api/v1/cities/{}/locations", city)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = get(&app, &format!("/api/v1/cities/{}/details", city)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zones_count"], 1);
    assert_eq!(body["locations_count"], 1);
    assert_eq!(body["zones"][0]["locations_count"], 1);

    let (status, body) = put(&app, &format!("/api/v1/locations/{}", location), json!({"name": "Aéroport Nice"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Aéroport Nice");
    assert_eq!(body["data"]["code"], "NCE");

    // una zona con lugares no puede cambiar de ciudad ni borrarse
    let (status, body) = put(&app, &format!("/api/v1/zones/{}", zone), json!({"city_id": other_city})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "ZONE_CITY_MISMATCH");

    let (status, body) = delete(&app, &format!("/api/v1/zones/{}", zone)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_IN_USE");

    let (status, body) = delete(&app, &format!("/api/v1/cities/{}", city)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_IN_USE");

    let (status, _) = delete(&app, &format!("/api/v1/locations/{}", location)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get(&app, &format!("/api/v1/locations/{}", location)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "LOCATION_NOT_FOUND");

    let (status, body) = put(&app, &format!("/api/v1/zones/{}", zone), json!({"name": "Arénas"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Arénas");

    let (status, _) = delete(&app, &format!("/api/v1/zones/{}", zone)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get(&app, &format!("/api/v1/zones/{}", zone)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ZONE_NOT_FOUND");
}

#[tokio::test]
async fn test_vehicle_types_features_and_rates() {
    let Some(app) = test_app().await else { return };
    let city = create(&app, "/api/v1/cities", json!({"name": unique("Marrakech")})).await;
    let medina = create(&app, "/api/v1/zones", json!({"city_id": city, "name": "Médina"})).await;
    let menara = create(&app, "/api/v1/zones", json!({"city_id": city, "name": "Menara"})).await;

    let (status, body) = post(
        &app,
        "/api/v1/service-features",
        json!({"name": unique("Wi-Fi"), "icon": "wifi"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["icon"], "wifi");
    let wifi = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(
        &app,
        "/api/v1/vehicle-types",
        json!({"name": unique("Van"), "max_passengers": 7, "service_feature_ids": [Uuid::new_v4()]}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "SERVICE_FEATURES_INVALID");

    let (status, body) = post(
        &app,
        "/api/v1/vehicle-types",
        json!({"name": unique("Van"), "max_passengers": 7, "max_luggage": 7, "service_feature_ids": [wifi]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["max_passengers"], 7);
    assert_eq!(body["data"]["service_features"][0]["id"], wifi.as_str());
    let van = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = put(&app, &format!("/api/v1/vehicle-types/{}", van), json!({"sort_order": 2})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sort_order"], 2);
    assert_eq!(body["data"]["service_features"].as_array().unwrap().len(), 1);

    let (status, body) = delete(&app, &format!("/api/v1/service-features/{}", wifi)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_IN_USE");

    let rate_body = json!({
        "from_zone_id": medina,
        "to_zone_id": menara,
        "vehicle_type_id": van,
        "one_way_price": "250",
        "round_trip_price": 450
    });
    let (status, body) = post(&app, "/api/v1/rates", rate_body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["one_way_price"], "250.00");
    assert_eq!(body["data"]["round_trip_price"], "450.00");
    assert_eq!(body["data"]["currency"], "EUR");
    let rate = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(&app, "/api/v1/rates", rate_body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_RESOURCE");

    let (status, body) = post(
        &app,
        "/api/v1/rates",
        json!({"from_zone_id": medina, "to_zone_id": Uuid::new_v4(), "vehicle_type_id": van, "one_way_price": 10}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ZONE_NOT_FOUND");

    let (status, body) = get(&app, &format!("/api/v1/rates?vehicle_type_id={}", van)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = put(&app, &format!("/api/v1/rates/{}", rate), json!({"one_way_price": "275.50"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["one_way_price"], "275.50");
    assert_eq!(body["data"]["round_trip_price"], "450.00");

    // el tipo de vehículo sigue teniendo tarifas
    let (status, body) = delete(&app, &format!("/api/v1/vehicle-types/{}", van)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "RESOURCE_IN_USE");
    assert_eq!(body["message"], "This resource is still in use and cannot be deleted.");

    let (status, _) = delete(&app, &format!("/api/v1/rates/{}", rate)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get(&app, &format!("/api/v1/rates/{}", rate)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RATE_NOT_FOUND");

    let (status, _) = delete(&app, &format!("/api/v1/vehicle-types/{}", van)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get(&app, &format!("/api/v1/vehicle-types/{}", van)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "VEHICLE_TYPE_NOT_FOUND");

    let (status, _) = delete(&app, &format!("/api/v1/service-features/{}", wifi)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = get(&app, &format!("/api/v1/service-features/{}", wifi)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SERVICE_FEATURE_NOT_FOUND");
}
