//! Cache de respuestas
//!
//! Envuelve el cliente Redis opcional. Sin Redis, o si Redis falla, las
//! respuestas se calculan siempre; un fallo de cache nunca llega al cliente.

use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use tracing::{debug, warn};

use crate::cache::{CacheOperations, RedisClient};
use crate::utils::errors::AppError;

pub const AUTOCOMPLETE_PREFIX: &str = "autocomplete";
pub const QUOTE_PREFIX: &str = "quote";

/// Prefijos que dependen del catálogo de lugares
pub const LOCATION_PREFIXES: &[&str] = &[AUTOCOMPLETE_PREFIX, QUOTE_PREFIX];
/// Prefijos que dependen de tarifas y vehículos
pub const PRICING_PREFIXES: &[&str] = &[QUOTE_PREFIX];

#[derive(Clone)]
pub struct ResponseCache {
    client: Option<RedisClient>,
}

/// Identificador de una consulta: md5 de sus parámetros normalizados
pub fn fingerprint(params: &str) -> String {
    format!("{:x}", md5::compute(params.as_bytes()))
}

impl ResponseCache {
    pub fn new(client: Option<RedisClient>) -> Self {
        Self { client }
    }

    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Devuelve la respuesta cacheada o la calcula y la guarda
    pub async fn get_or_compute<T, F, Fut>(&self, prefix: &str, params: &str, compute: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let Some(client) = &self.client else {
            return compute().await;
        };

        let key = client.make_key(prefix, &fingerprint(params));
        match client.get::<T>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!("⚠️ Cache ilegible para {}: {}", key, e),
        }

        let value = compute().await?;
        if let Err(e) = client.set(&key, &value, client.default_ttl()).await {
            warn!("⚠️ No se pudo guardar {} en cache: {}", key, e);
        }

        Ok(value)
    }

    /// Elimina las respuestas cacheadas de los prefijos dados; devuelve
    /// cuántas claves se borraron
    pub async fn invalidate(&self, prefixes: &[&str]) -> usize {
        let Some(client) = &self.client else {
            return 0;
        };

        let mut removed = 0;
        for prefix in prefixes {
            match client.delete_pattern(&client.prefix_pattern(prefix)).await {
                Ok(count) => {
                    debug!("🧹 Cache {} invalidado ({} claves)", prefix, count);
                    removed += count;
                }
                Err(e) => warn!("⚠️ Error invalidando cache {}: {}", prefix, e),
            }
        }
        removed
    }
}
