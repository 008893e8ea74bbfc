//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use crate::i18n::Locale;

/// Error al leer una variable de entorno
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub default_locale: Locale,
    pub default_currency: String,
    pub redis_url: Option<String>,
    pub cache_ttl: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            rate_limit_requests: 120,
            rate_limit_window: 60,
            default_locale: Locale::Fr,
            default_currency: "EUR".to_string(),
            redis_url: None,
            cache_ttl: 300,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde el entorno; las variables ausentes
    /// toman el valor por defecto, las presentes deben ser válidas
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            rate_limit_requests: parse_var("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_window: parse_var("RATE_LIMIT_WINDOW", defaults.rate_limit_window)?,
            default_locale: parse_var("DEFAULT_LOCALE", defaults.default_locale)?,
            default_currency: env::var("DEFAULT_CURRENCY")
                .map(|c| c.trim().to_ascii_uppercase())
                .unwrap_or(defaults.default_currency),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            cache_ttl: parse_var("CACHE_TTL", defaults.cache_ttl)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert_eq!(config.default_locale, Locale::Fr);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("TRANSFER_ADMIN_TEST_PORT", "not-a-port");
        let result: Result<u16, _> = parse_var("TRANSFER_ADMIN_TEST_PORT", 3000);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        env::remove_var("TRANSFER_ADMIN_TEST_PORT");
    }

    #[test]
    fn test_parse_var_uses_default_when_absent() {
        let result: u64 = parse_var("TRANSFER_ADMIN_TEST_ABSENT", 42).unwrap();
        assert_eq!(result, 42);
    }
}
