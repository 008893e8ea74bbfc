//! Servicio de presupuestos
//!
//! Calcula las opciones de precio entre dos lugares a partir de las tarifas
//! definidas entre sus zonas. La interpretación de parámetros y el cálculo
//! de opciones son funciones puras; `QuoteService` solo añade el acceso a
//! base de datos.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::dto::quote_dto::{
    QuoteEndpoint, QuoteOption, QuoteQuery, QuoteRequest, QuoteResponse, QuoteVehicle, TripType,
};
use crate::dto::vehicle_type_dto::FeatureSummary;
use crate::i18n::keys;
use crate::models::RateCandidate;
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::rate_repository::RateRepository;
use crate::repositories::vehicle_type_repository::VehicleTypeRepository;
use crate::utils::errors::AppError;

pub const MIN_PASSENGERS: i32 = 1;
pub const MAX_PASSENGERS: i32 = 60;

fn invalid_parameters() -> AppError {
    AppError::Unprocessable(keys::INVALID_PARAMETERS)
}

fn parse_uuid(value: Option<&str>) -> Result<Uuid, AppError> {
    value
        .map(str::trim)
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(invalid_parameters)
}

/// Interpretar la query de GET /quote
pub fn parse_quote_query(query: &QuoteQuery) -> Result<QuoteRequest, AppError> {
    let from = parse_uuid(query.from.as_deref())?;
    let to = parse_uuid(query.to.as_deref())?;
    if from == to {
        return Err(invalid_parameters());
    }

    let passengers = match query.passengers.as_deref().map(str::trim) {
        None | Some("") => MIN_PASSENGERS,
        Some(raw) => raw.parse::<i32>().map_err(|_| invalid_parameters())?,
    };
    if !(MIN_PASSENGERS..=MAX_PASSENGERS).contains(&passengers) {
        return Err(invalid_parameters());
    }

    let trip_type = match query.trip_type.as_deref().map(str::trim) {
        None | Some("") => TripType::default(),
        Some(raw) => raw.parse::<TripType>().map_err(|_| invalid_parameters())?,
    };

    let vehicle_type_id = match query.vehicle_type_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| invalid_parameters())?),
    };

    Ok(QuoteRequest {
        from,
        to,
        passengers,
        trip_type,
        vehicle_type_id,
    })
}

/// Forma canónica de la petición, para la clave de cache
pub fn cache_fingerprint(request: &QuoteRequest) -> String {
    format!(
        "from={}&to={}&passengers={}&trip_type={}&vehicle_type_id={}",
        request.from,
        request.to,
        request.passengers,
        request.trip_type.as_str(),
        request.vehicle_type_id.map(|id| id.to_string()).unwrap_or_default()
    )
}

fn price_for(candidate: &RateCandidate, trip_type: TripType) -> Decimal {
    match trip_type {
        TripType::OneWay => candidate.one_way_price,
        TripType::RoundTrip => candidate
            .round_trip_price
            .unwrap_or(candidate.one_way_price * Decimal::from(2)),
    }
}

/// Opciones de precio a partir de las tarifas candidatas entre dos zonas.
///
/// Una tarifa por tipo de vehículo; la del sentido pedido gana sobre la
/// inversa. Errores: sin candidatas `no_route_found`, sin vehículo que
/// cumpla el filtro `rate_not_available`.
pub fn build_options(
    candidates: Vec<RateCandidate>,
    from_zone: Uuid,
    to_zone: Uuid,
    request: &QuoteRequest,
    features: &HashMap<Uuid, Vec<FeatureSummary>>,
) -> Result<Vec<QuoteOption>, AppError> {
    if candidates.is_empty() {
        return Err(AppError::NotFound(keys::NO_ROUTE_FOUND));
    }

    let is_forward = |c: &RateCandidate| c.from_zone_id == from_zone && c.to_zone_id == to_zone;

    let mut by_vehicle: HashMap<Uuid, RateCandidate> = HashMap::new();
    for candidate in candidates {
        let replace = match by_vehicle.get(&candidate.vehicle_type_id) {
            None => true,
            Some(current) => !is_forward(current) && is_forward(&candidate),
        };
        if replace {
            by_vehicle.insert(candidate.vehicle_type_id, candidate);
        }
    }

    let mut options: Vec<QuoteOption> = by_vehicle
        .into_values()
        .filter(|c| request.vehicle_type_id.map_or(true, |id| id == c.vehicle_type_id))
        .filter(|c| c.max_passengers >= request.passengers)
        .map(|c| QuoteOption {
            rate_id: c.rate_id,
            price: price_for(&c, request.trip_type),
            service_features: features.get(&c.vehicle_type_id).cloned().unwrap_or_default(),
            sort_order: c.sort_order,
            vehicle_type: QuoteVehicle {
                id: c.vehicle_type_id,
                name: c.vehicle_type_name,
                description: c.vehicle_type_description,
                max_passengers: c.max_passengers,
                max_luggage: c.max_luggage,
            },
            currency: c.currency,
        })
        .collect();

    if options.is_empty() {
        return Err(AppError::NotFound(keys::RATE_NOT_AVAILABLE));
    }

    options.sort_by(|a, b| {
        a.price
            .cmp(&b.price)
            .then(a.sort_order.cmp(&b.sort_order))
            .then_with(|| a.vehicle_type.name.cmp(&b.vehicle_type.name))
    });

    Ok(options)
}

pub struct QuoteService {
    locations: LocationRepository,
    rates: RateRepository,
    vehicle_types: VehicleTypeRepository,
}

impl QuoteService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            locations: LocationRepository::new(pool.clone()),
            rates: RateRepository::new(pool.clone()),
            vehicle_types: VehicleTypeRepository::new(pool),
        }
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, AppError> {
        let from = self
            .locations
            .find_active_with_names(request.from)
            .await?
            .ok_or(AppError::NotFound(keys::LOCATION_NOT_FOUND))?;
        let to = self
            .locations
            .find_active_with_names(request.to)
            .await?
            .ok_or(AppError::NotFound(keys::LOCATION_NOT_FOUND))?;

        let (Some(from_zone), Some(to_zone)) = (from.zone_id, to.zone_id) else {
            return Err(AppError::NotFound(keys::NO_ROUTE_FOUND));
        };

        let candidates = self.rates.candidates_between(from_zone, to_zone).await?;
        debug!("💶 {} tarifas candidatas entre {} y {}", candidates.len(), from_zone, to_zone);

        let mut vehicle_ids: Vec<Uuid> = candidates.iter().map(|c| c.vehicle_type_id).collect();
        vehicle_ids.sort();
        vehicle_ids.dedup();

        let mut features: HashMap<Uuid, Vec<FeatureSummary>> = HashMap::new();
        for feature in self.vehicle_types.features_for(&vehicle_ids).await? {
            features
                .entry(feature.vehicle_type_id)
                .or_default()
                .push(feature.into());
        }

        let options = build_options(candidates, from_zone, to_zone, request, &features)?;

        Ok(QuoteResponse {
            from: QuoteEndpoint::from(from),
            to: QuoteEndpoint::from(to),
            trip_type: request.trip_type,
            passengers: request.passengers,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn zone_a() -> Uuid {
        Uuid::from_u128(0xA)
    }

    fn zone_b() -> Uuid {
        Uuid::from_u128(0xB)
    }

    fn candidate(
        vehicle: u128,
        name: &str,
        from: Uuid,
        to: Uuid,
        one_way: &str,
        round_trip: Option<&str>,
        max_passengers: i32,
        sort_order: i32,
    ) -> RateCandidate {
        RateCandidate {
            rate_id: Uuid::new_v4(),
            from_zone_id: from,
            to_zone_id: to,
            one_way_price: dec(one_way),
            round_trip_price: round_trip.map(dec),
            currency: "EUR".to_string(),
            vehicle_type_id: Uuid::from_u128(vehicle),
            vehicle_type_name: name.to_string(),
            vehicle_type_description: None,
            max_passengers,
            max_luggage: 4,
            sort_order,
        }
    }

    fn request(passengers: i32, trip_type: TripType) -> QuoteRequest {
        QuoteRequest {
            from: Uuid::from_u128(1),
            to: Uuid::from_u128(2),
            passengers,
            trip_type,
            vehicle_type_id: None,
        }
    }

    fn query(from: &str, to: &str) -> QuoteQuery {
        QuoteQuery {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            ..Default::default()
        }
    }

    const FROM: &str = "6f0c1a1e-0000-4000-8000-000000000001";
    const TO: &str = "6f0c1a1e-0000-4000-8000-000000000002";

    #[test]
    fn test_parse_defaults() {
        let parsed = parse_quote_query(&query(FROM, TO)).unwrap();
        assert_eq!(parsed.passengers, 1);
        assert_eq!(parsed.trip_type, TripType::OneWay);
        assert_eq!(parsed.vehicle_type_id, None);
    }

    #[test]
    fn test_parse_rejects_invalid_parameters() {
        assert!(parse_quote_query(&QuoteQuery::default()).is_err());
        assert!(parse_quote_query(&query("not-a-uuid", TO)).is_err());
        assert!(parse_quote_query(&query(FROM, FROM)).is_err());

        for passengers in ["0", "61", "two"] {
            let q = QuoteQuery { passengers: Some(passengers.to_string()), ..query(FROM, TO) };
            let err = parse_quote_query(&q).unwrap_err();
            assert_eq!(err.status_and_key().1, keys::INVALID_PARAMETERS);
        }

        let q = QuoteQuery { trip_type: Some("multi".to_string()), ..query(FROM, TO) };
        assert!(parse_quote_query(&q).is_err());
    }

    #[test]
    fn test_parse_round_trip_and_vehicle() {
        let q = QuoteQuery {
            passengers: Some("4".to_string()),
            trip_type: Some("round_trip".to_string()),
            vehicle_type_id: Some(FROM.to_string()),
            ..query(FROM, TO)
        };
        let parsed = parse_quote_query(&q).unwrap();
        assert_eq!(parsed.passengers, 4);
        assert_eq!(parsed.trip_type, TripType::RoundTrip);
        assert_eq!(parsed.vehicle_type_id, Some(Uuid::parse_str(FROM).unwrap()));
    }

    #[test]
    fn test_no_candidates_is_no_route() {
        let err = build_options(vec![], zone_a(), zone_b(), &request(1, TripType::OneWay), &HashMap::new())
            .unwrap_err();
        assert_eq!(err.status_and_key().1, keys::NO_ROUTE_FOUND);
    }

    #[test]
    fn test_requested_direction_wins() {
        let candidates = vec![
            candidate(1, "Sedan", zone_b(), zone_a(), "90", None, 4, 1),
            candidate(1, "Sedan", zone_a(), zone_b(), "80", None, 4, 1),
        ];
        let options =
            build_options(candidates, zone_a(), zone_b(), &request(1, TripType::OneWay), &HashMap::new())
                .unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].price, dec("80"));
    }

    #[test]
    fn test_reverse_rate_is_used_when_alone() {
        let candidates = vec![candidate(1, "Sedan", zone_b(), zone_a(), "90", None, 4, 1)];
        let options =
            build_options(candidates, zone_a(), zone_b(), &request(1, TripType::OneWay), &HashMap::new())
                .unwrap();
        assert_eq!(options[0].price, dec("90"));
    }

    #[test]
    fn test_capacity_filter() {
        let candidates = vec![
            candidate(1, "Sedan", zone_a(), zone_b(), "50", None, 4, 1),
            candidate(2, "Van", zone_a(), zone_b(), "70", None, 8, 2),
        ];
        let options =
            build_options(candidates.clone(), zone_a(), zone_b(), &request(6, TripType::OneWay), &HashMap::new())
                .unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].vehicle_type.name, "Van");

        let err = build_options(candidates, zone_a(), zone_b(), &request(9, TripType::OneWay), &HashMap::new())
            .unwrap_err();
        assert_eq!(err.status_and_key().1, keys::RATE_NOT_AVAILABLE);
    }

    #[test]
    fn test_vehicle_type_filter() {
        let candidates = vec![
            candidate(1, "Sedan", zone_a(), zone_b(), "50", None, 4, 1),
            candidate(2, "Van", zone_a(), zone_b(), "70", None, 8, 2),
        ];
        let mut req = request(1, TripType::OneWay);
        req.vehicle_type_id = Some(Uuid::from_u128(2));
        let options = build_options(candidates, zone_a(), zone_b(), &req, &HashMap::new()).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].vehicle_type.id, Uuid::from_u128(2));
    }

    #[test]
    fn test_round_trip_price_and_fallback() {
        let candidates = vec![
            candidate(1, "Sedan", zone_a(), zone_b(), "50", Some("95"), 4, 1),
            candidate(2, "Van", zone_a(), zone_b(), "45.50", None, 8, 2),
        ];
        let options =
            build_options(candidates, zone_a(), zone_b(), &request(1, TripType::RoundTrip), &HashMap::new())
                .unwrap();
        assert_eq!(options[0].vehicle_type.name, "Van");
        assert_eq!(options[0].price, dec("91.00"));
        assert_eq!(options[1].price, dec("95"));
    }

    #[test]
    fn test_ordering_by_price_then_sort_order() {
        let candidates = vec![
            candidate(1, "Van", zone_a(), zone_b(), "60", None, 8, 2),
            candidate(2, "Sedan", zone_a(), zone_b(), "60", None, 4, 1),
            candidate(3, "Minibus", zone_a(), zone_b(), "40", None, 16, 3),
        ];
        let options =
            build_options(candidates, zone_a(), zone_b(), &request(1, TripType::OneWay), &HashMap::new())
                .unwrap();
        let names: Vec<&str> = options.iter().map(|o| o.vehicle_type.name.as_str()).collect();
        assert_eq!(names, vec!["Minibus", "Sedan", "Van"]);
    }

    #[test]
    fn test_features_are_attached() {
        let feature = FeatureSummary { id: Uuid::new_v4(), name: "Wifi".to_string(), icon: None };
        let features = HashMap::from([(Uuid::from_u128(1), vec![feature.clone()])]);
        let candidates = vec![candidate(1, "Sedan", zone_a(), zone_b(), "50", None, 4, 1)];
        let options =
            build_options(candidates, zone_a(), zone_b(), &request(1, TripType::OneWay), &features).unwrap();
        assert_eq!(options[0].service_features, vec![feature]);
    }
}
