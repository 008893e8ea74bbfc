use crate::dto::ListQuery;
use crate::models::City;
use crate::utils::errors::AppError;
use crate::utils::validation::{escape_like, normalize_search};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub struct CityRepository {
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

impl CityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        country_code: Option<String>,
        external_id: Option<String>,
        is_active: bool,
    ) -> Result<City, AppError> {
        let city = sqlx::query_as::<_, City>(
            r#"
            INSERT INTO cities (id, name, country_code, external_id, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(country_code)
        .bind(external_id)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(city)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(city)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM cities WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Página de ciudades y total de filas que cumplen el filtro
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<City>, i64), AppError> {
        let page = query.page_params();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM cities WHERE 1 = 1");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::new("SELECT * FROM cities WHERE 1 = 1");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY name ASC, id ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let cities = select.build_query_as::<City>().fetch_all(&self.pool).await?;

        Ok((cities, total))
    }

    pub async fn update(
        &self,
        current: City,
        name: Option<String>,
        country_code: Option<String>,
        external_id: Option<String>,
        is_active: Option<bool>,
    ) -> Result<City, AppError> {
        let city = sqlx::query_as::<_, City>(
            r#"
            UPDATE cities
            SET name = $2, country_code = $3, external_id = $4, is_active = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(name.unwrap_or(current.name))
        .bind(country_code.or(current.country_code))
        .bind(external_id.or(current.external_id))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await?;

        Ok(city)
    }

    /// Eliminar; devuelve `false` si la ciudad no existía
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Primera ciudad con ese identificador externo, o una nueva.
    /// Devuelve la fila y si se ha creado.
    pub async fn first_or_create(
        conn: &mut PgConnection,
        external_id: &str,
        name: &str,
        country_code: Option<&str>,
    ) -> Result<(City, bool), AppError> {
        let inserted = sqlx::query_as::<_, City>(
            r#"
            INSERT INTO cities (id, name, country_code, external_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (external_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(country_code)
        .bind(external_id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(city) = inserted {
            return Ok((city, true));
        }

        let existing = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE external_id = $1")
            .bind(external_id)
            .fetch_one(&mut *conn)
            .await?;

        Ok((existing, false))
    }
}
