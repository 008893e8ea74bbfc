//! Configuración de cache
//!
//! Este módulo contiene la configuración del cache de respuestas y el
//! contrato de operaciones que implementa el cliente Redis.

use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::EnvironmentConfig;

/// Prefijo común de todas las claves de la aplicación
pub const KEY_NAMESPACE: &str = "transfer_admin";

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    pub default_ttl: u64,
    pub namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            default_ttl: 300, // 5 minutos
            namespace: KEY_NAMESPACE.to_string(),
        }
    }
}

impl CacheConfig {
    /// Configuración a partir del entorno; `None` si no hay REDIS_URL
    pub fn from_environment(config: &EnvironmentConfig) -> Option<Self> {
        config.redis_url.as_ref().map(|url| Self {
            redis_url: url.clone(),
            default_ttl: config.cache_ttl,
            ..Self::default()
        })
    }
}

/// Operaciones de cache
#[async_trait::async_trait]
pub trait CacheOperations {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
    /// Elimina todas las claves que cumplen el patrón; devuelve cuántas
    async fn delete_pattern(&self, pattern: &str) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_redis_url() {
        let config = EnvironmentConfig::default();
        assert!(CacheConfig::from_environment(&config).is_none());
    }

    #[test]
    fn test_uses_environment_ttl() {
        let config = EnvironmentConfig {
            redis_url: Some("redis://cache:6379".to_string()),
            cache_ttl: 60,
            ..EnvironmentConfig::default()
        };
        let cache = CacheConfig::from_environment(&config).unwrap();
        assert_eq!(cache.redis_url, "redis://cache:6379");
        assert_eq!(cache.default_ttl, 60);
        assert_eq!(cache.namespace, KEY_NAMESPACE);
    }
}
