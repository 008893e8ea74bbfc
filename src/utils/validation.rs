//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas desde los derive de `validator` en los DTOs.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Código de país ISO 3166-1 alpha-2 (MA, FR, ...)
    pub static ref COUNTRY_CODE_RE: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();
    /// Código de moneda ISO 4217 (EUR, MAD, ...)
    pub static ref CURRENCY_RE: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
    /// Código de lugar: IATA para aeropuertos o código interno corto
    pub static ref LOCATION_CODE_RE: Regex = Regex::new(r"^[A-Z0-9]{2,10}$").unwrap();
    static ref IATA_RE: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Importe máximo que cabe en la columna `NUMERIC(12, 2)`
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Validar un importe: no negativo, como mucho dos decimales y dentro del
/// rango de la columna
pub fn validate_non_negative_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }

    if value.normalize().scale() > 2 {
        let mut error = ValidationError::new("price_scale");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max_decimals".into(), &2);
        return Err(error);
    }

    if *value > MAX_PRICE {
        let mut error = ValidationError::new("price_range");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max".into(), &MAX_PRICE.to_string());
        return Err(error);
    }

    Ok(())
}

/// Validar un código IATA de aeropuerto
pub fn validate_iata_code(value: &str) -> Result<(), ValidationError> {
    if !IATA_RE.is_match(value) {
        let mut error = ValidationError::new("iata_code");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"AAA".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

/// Validar un par de coordenadas opcionales: las dos o ninguna
pub fn validate_coordinate_pair(lat: Option<f64>, lng: Option<f64>) -> Result<(), ValidationError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => validate_coordinates(lat, lng),
        (None, None) => Ok(()),
        _ => Err(ValidationError::new("coordinates_pair")),
    }
}

/// Construir un `ValidationErrors` con un único error de campo
pub fn field_error(field: &'static str, error: ValidationError) -> validator::ValidationErrors {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    errors
}

/// Normalizar un texto de búsqueda: recorta y devuelve `None` si queda vacío
pub fn normalize_search(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Escapar los comodines de `LIKE`/`ILIKE` en un texto de búsqueda
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Casablanca").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_non_negative_price() {
        assert!(validate_non_negative_price(&Decimal::from_str("0").unwrap()).is_ok());
        assert!(validate_non_negative_price(&Decimal::from_str("-0.00").unwrap()).is_ok());
        assert!(validate_non_negative_price(&Decimal::from_str("250.50").unwrap()).is_ok());
        assert!(validate_non_negative_price(&Decimal::from_str("-1").unwrap()).is_err());
    }

    #[test]
    fn test_price_fits_numeric_column() {
        assert_eq!(MAX_PRICE.to_string(), "9999999999.99");
        assert!(validate_non_negative_price(&Decimal::from_str("9999999999.99").unwrap()).is_ok());
        assert!(validate_non_negative_price(&Decimal::from_str("12.500").unwrap()).is_ok());

        let error = validate_non_negative_price(&Decimal::from_str("100000000000").unwrap()).unwrap_err();
        assert_eq!(error.code, "price_range");

        let error = validate_non_negative_price(&Decimal::from_str("10.005").unwrap()).unwrap_err();
        assert_eq!(error.code, "price_scale");
    }

    #[test]
    fn test_validate_iata_code() {
        assert!(validate_iata_code("CMN").is_ok());
        assert!(validate_iata_code("cmn").is_err());
        assert!(validate_iata_code("CMNX").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(33.57, -7.59).is_ok());
        assert!(validate_coordinates(91.0, -7.59).is_err());
        assert!(validate_coordinates(33.57, -181.0).is_err());
    }

    #[test]
    fn test_validate_coordinate_pair() {
        assert!(validate_coordinate_pair(None, None).is_ok());
        assert!(validate_coordinate_pair(Some(31.63), Some(-8.0)).is_ok());
        assert_eq!(
            validate_coordinate_pair(Some(31.63), None).unwrap_err().code,
            "coordinates_pair"
        );
        assert_eq!(
            validate_coordinate_pair(None, Some(-8.0)).unwrap_err().code,
            "coordinates_pair"
        );
        assert!(validate_coordinate_pair(Some(95.0), Some(-8.0)).is_err());
    }

    #[test]
    fn test_code_patterns() {
        assert!(COUNTRY_CODE_RE.is_match("MA"));
        assert!(!COUNTRY_CODE_RE.is_match("MAR"));
        assert!(CURRENCY_RE.is_match("EUR"));
        assert!(!CURRENCY_RE.is_match("eur"));
        assert!(LOCATION_CODE_RE.is_match("RAK"));
        assert!(!LOCATION_CODE_RE.is_match("R"));
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(Some("  Rabat ")), Some("Rabat".to_string()));
        assert_eq!(normalize_search(Some("   ")), None);
        assert_eq!(normalize_search(None), None);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("Marrakech"), "Marrakech");
    }
}
