use crate::dto::quote_dto::{QuoteQuery, QuoteResponse};
use crate::services::quote_service::{cache_fingerprint, parse_quote_query, QuoteService};
use crate::services::response_cache::{ResponseCache, QUOTE_PREFIX};
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct QuoteController {
    service: QuoteService,
    cache: ResponseCache,
}

impl QuoteController {
    pub fn new(pool: PgPool, cache: ResponseCache) -> Self {
        Self {
            service: QuoteService::new(pool),
            cache,
        }
    }

    /// Los parámetros se validan antes de consultar cache o base de datos
    pub async fn quote(&self, query: QuoteQuery) -> Result<QuoteResponse, AppError> {
        let request = parse_quote_query(&query)?;

        self.cache
            .get_or_compute(QUOTE_PREFIX, &cache_fingerprint(&request), || {
                self.service.quote(&request)
            })
            .await
    }
}
