use crate::dto::ListQuery;
use crate::models::ServiceFeature;
use crate::utils::errors::AppError;
use crate::utils::validation::{escape_like, normalize_search};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub struct ServiceFeatureRepository {
    pool: PgPool,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(search) = normalize_search(query.search.as_deref()) {
        qb.push(" AND name ILIKE ")
            .push_bind(format!("%{}%", escape_like(&search)));
    }
    if let Some(active) = query.active {
        qb.push(" AND is_active = ").push_bind(active);
    }
}

impl ServiceFeatureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        icon: Option<String>,
        is_active: bool,
    ) -> Result<ServiceFeature, AppError> {
        let feature = sqlx::query_as::<_, ServiceFeature>(
            r#"
            INSERT INTO service_features (id, name, description, icon, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(icon)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(feature)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceFeature>, AppError> {
        let feature = sqlx::query_as::<_, ServiceFeature>("SELECT * FROM service_features WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(feature)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<ServiceFeature>, i64), AppError> {
        let page = query.page_params();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM service_features WHERE 1 = 1");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::new("SELECT * FROM service_features WHERE 1 = 1");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY name ASC, id ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let features = select
            .build_query_as::<ServiceFeature>()
            .fetch_all(&self.pool)
            .await?;

        Ok((features, total))
    }

    /// Cuántos de los ids dados existen
    pub async fn count_existing(&self, ids: &[Uuid]) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM service_features WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn update(
        &self,
        current: ServiceFeature,
        name: Option<String>,
        description: Option<String>,
        icon: Option<String>,
        is_active: Option<bool>,
    ) -> Result<ServiceFeature, AppError> {
        let feature = sqlx::query_as::<_, ServiceFeature>(
            r#"
            UPDATE service_features
            SET name = $2, description = $3, icon = $4, is_active = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(name.unwrap_or(current.name))
        .bind(description.or(current.description))
        .bind(icon.or(current.icon))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await?;

        Ok(feature)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM service_features WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
