//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas. Los mensajes se
//! traducen al idioma del request en el momento de construir la respuesta.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::i18n::{self, keys};

/// Códigos SQLSTATE de PostgreSQL que se traducen a errores de negocio
const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
const PG_CHECK_VIOLATION: &str = "23514";
const PG_STRING_TOO_LONG: &str = "22001";
const PG_NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Errores principales de la aplicación
///
/// Las variantes de negocio llevan la clave del mensaje en la tabla de
/// traducciones, no el texto.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(&'static str),

    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    #[error("Unprocessable: {0}")]
    Unprocessable(&'static str),

    #[error("Conflict: {0}")]
    Conflict(&'static str),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl ErrorResponse {
    fn keyed(error: &str, key: &str) -> Self {
        Self {
            error: error.to_string(),
            message: i18n::t(key),
            details: None,
            code: i18n::message_code(key),
        }
    }
}

impl AppError {
    /// Estado HTTP y clave de mensaje de este error
    pub fn status_and_key(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Database(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, keys::NOT_FOUND),
            AppError::Database(e) => match database_code(e).as_deref() {
                Some(PG_UNIQUE_VIOLATION) => (StatusCode::CONFLICT, keys::DUPLICATE_RESOURCE),
                Some(PG_FOREIGN_KEY_VIOLATION) => (StatusCode::CONFLICT, keys::RESOURCE_IN_USE),
                // valores que pasaron la validación pero no caben en la columna
                Some(PG_CHECK_VIOLATION | PG_STRING_TOO_LONG | PG_NUMERIC_OUT_OF_RANGE) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, keys::VALIDATION_FAILED)
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, keys::SERVER_ERROR),
            },
            AppError::Validation(_) | AppError::InvalidBody(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, keys::VALIDATION_FAILED)
            }
            AppError::NotFound(key) => (StatusCode::NOT_FOUND, *key),
            AppError::BadRequest(key) => (StatusCode::BAD_REQUEST, *key),
            AppError::Unprocessable(key) => (StatusCode::UNPROCESSABLE_ENTITY, *key),
            AppError::Conflict(key) => (StatusCode::CONFLICT, *key),
            AppError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, keys::TOO_MANY_REQUESTS),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, keys::SERVER_ERROR),
        }
    }
}

fn database_code(error: &sqlx::Error) -> Option<String> {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, key) = self.status_and_key();

        let error_response = match &self {
            AppError::Database(e) => {
                if status.is_server_error() {
                    tracing::error!("❌ Database error: {}", e);
                } else {
                    tracing::warn!("⚠️ Database constraint: {}", e);
                }
                ErrorResponse::keyed("Database Error", key)
            }

            AppError::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                ErrorResponse {
                    details: Some(json!(e)),
                    ..ErrorResponse::keyed("Validation Error", key)
                }
            }

            AppError::InvalidBody(reason) => {
                tracing::debug!("Invalid body: {}", reason);
                ErrorResponse {
                    details: Some(json!({ "body": reason })),
                    ..ErrorResponse::keyed("Validation Error", key)
                }
            }

            AppError::NotFound(_) => ErrorResponse::keyed("Not Found", key),

            AppError::BadRequest(_) => ErrorResponse::keyed("Bad Request", key),

            AppError::Unprocessable(_) => ErrorResponse::keyed("Unprocessable Entity", key),

            AppError::Conflict(_) => ErrorResponse::keyed("Conflict", key),

            AppError::RateLimitExceeded => {
                tracing::warn!("⚠️ Rate limit exceeded");
                ErrorResponse::keyed("Rate Limit Exceeded", key)
            }

            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                ErrorResponse::keyed("Internal Server Error", key)
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_is_localized_with_code() {
        let (status, body) = i18n::with_locale(
            i18n::Locale::En,
            body_json(AppError::NotFound(keys::CITY_NOT_FOUND)),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "City not found.");
        assert_eq!(body["code"], "CITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_french_message() {
        let (status, body) = i18n::with_locale(
            i18n::Locale::Fr,
            body_json(AppError::NotFound(keys::RATE_NOT_AVAILABLE)),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Tarif non disponible pour ce trajet.");
    }

    #[tokio::test]
    async fn test_row_not_found_maps_to_404() {
        let (status, body) = body_json(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_json(AppError::Internal("pool exhausted".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "SERVER_ERROR");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_validation_error_has_details() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("name", validator::ValidationError::new("length"));

        let (status, body) = body_json(AppError::Validation(errors)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert!(body["details"]["name"].is_array());
    }
}
