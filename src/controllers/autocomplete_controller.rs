use crate::controllers::location_controller::parse_location_type;
use crate::dto::autocomplete_dto::{AutocompleteItem, AutocompleteQuery};
use crate::repositories::location_repository::LocationRepository;
use crate::services::response_cache::{ResponseCache, AUTOCOMPLETE_PREFIX};
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct AutocompleteController {
    repository: LocationRepository,
    cache: ResponseCache,
}

impl AutocompleteController {
    pub fn new(pool: PgPool, cache: ResponseCache) -> Self {
        Self {
            repository: LocationRepository::new(pool),
            cache,
        }
    }

    /// Sugerencias de lugares; textos de menos de dos caracteres no buscan
    pub async fn search(&self, query: AutocompleteQuery) -> Result<Vec<AutocompleteItem>, AppError> {
        let location_type = query
            .location_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(parse_location_type)
            .transpose()?;

        let Some(term) = query.term() else {
            return Ok(Vec::new());
        };
        let limit = query.limit();

        let params = format!(
            "q={}&limit={}&type={}&city_id={}",
            term.to_lowercase(),
            limit,
            location_type.map(|t| t.code()).unwrap_or_default(),
            query.city_id.map(|id| id.to_string()).unwrap_or_default()
        );

        self.cache
            .get_or_compute(AUTOCOMPLETE_PREFIX, &params, || async {
                let locations = self
                    .repository
                    .search(&term, location_type, query.city_id, limit)
                    .await?;
                Ok(locations.into_iter().map(AutocompleteItem::from).collect())
            })
            .await
    }
}
