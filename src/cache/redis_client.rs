use anyhow::Result;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, warn};

use super::{CacheConfig, CacheOperations};
use crate::config::EnvironmentConfig;
use crate::i18n::{self, keys};

/// Número de claves pedidas por iteración de SCAN
const SCAN_BATCH: usize = 200;

/// Cliente Redis con connection manager y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    /// Cliente opcional según el entorno: sin REDIS_URL o sin conexión
    /// se trabaja sin cache
    pub async fn from_environment(config: &EnvironmentConfig) -> Option<Self> {
        let Some(cache_config) = CacheConfig::from_environment(config) else {
            info!("ℹ️ REDIS_URL no definido: {}", i18n::t(keys::CACHE_DISABLED));
            return None;
        };

        match Self::new(cache_config).await {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("⚠️ Redis no disponible ({}): {}", e, i18n::t(keys::CACHE_UNAVAILABLE));
                None
            }
        }
    }

    pub fn default_ttl(&self) -> u64 {
        self.config.default_ttl
    }

    /// Clave `<namespace>:<prefix>:<identifier>`
    pub fn make_key(&self, prefix: &str, identifier: &str) -> String {
        format!("{}:{}:{}", self.config.namespace, prefix, identifier)
    }

    /// Patrón que cubre todas las claves de un prefijo
    pub fn prefix_pattern(&self, prefix: &str) -> String {
        format!("{}:{}:*", self.config.namespace, prefix)
    }

    /// Verificar si Redis está conectado
    pub async fn is_connected(&self) -> bool {
        let mut conn = self.manager.clone();
        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) => response == "PONG",
            Err(_) => false,
        }
    }
}

#[async_trait::async_trait]
impl CacheOperations for RedisClient {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.manager.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("📥 Cache HIT para clave: {}", key);
                let deserialized: T = serde_json::from_str(&value)?;
                Ok(Some(deserialized))
            }
            Ok(None) => {
                debug!("❌ Cache MISS para clave: {}", key);
                Ok(None)
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let mut conn = self.manager.clone();

        let serialized = serde_json::to_string(value)?;

        let result: RedisResult<()> = redis::cmd("SET")
            .arg(key)
            .arg(serialized)
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await;

        match result {
            Ok(()) => {
                debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando en cache para clave {}: {}", key, e);
                Err(anyhow::anyhow!("Error de Redis: {}", e))
            }
        }
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<usize> {
        let mut conn = self.manager.clone();
        let mut cursor: u64 = 0;
        let mut deleted = 0;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let count: usize = conn.del(&keys).await?;
                deleted += count;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!("🧹 Cache invalidado para patrón {} (eliminados: {})", pattern, deleted);
        Ok(deleted)
    }
}
