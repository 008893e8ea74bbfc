//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::cache::RedisClient;
use crate::config::environment::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::services::response_cache::ResponseCache;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub cache: Option<RedisClient>,
    pub rate_limit: RateLimitState,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, cache: Option<RedisClient>) -> Self {
        let rate_limit = RateLimitState::new(&config);
        Self {
            pool,
            config,
            cache,
            rate_limit,
        }
    }

    /// Cache de respuestas sobre el cliente Redis, si lo hay
    pub fn response_cache(&self) -> ResponseCache {
        ResponseCache::new(self.cache.clone())
    }
}
