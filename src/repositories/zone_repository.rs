use crate::dto::ListQuery;
use crate::models::{Zone, ZoneWithCount};
use crate::utils::errors::AppError;
use crate::utils::validation::{escape_like, normalize_search};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub struct ZoneRepository {
    pool: PgPool,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(search) = normalize_search(query.search.as_deref()) {
        qb.push(" AND name ILIKE ")
            .push_bind(format!("%{}%", escape_like(&search)));
    }
    if let Some(city_id) = query.city_id {
        qb.push(" AND city_id = ").push_bind(city_id);
    }
    if let Some(active) = query.active {
        qb.push(" AND is_active = ").push_bind(active);
    }
}

impl ZoneRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        city_id: Uuid,
        name: String,
        description: Option<String>,
        external_id: Option<String>,
        is_active: bool,
    ) -> Result<Zone, AppError> {
        let zone = sqlx::query_as::<_, Zone>(
            r#"
            INSERT INTO zones (id, city_id, name, description, external_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(city_id)
        .bind(name)
        .bind(description)
        .bind(external_id)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(zone)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Zone>, AppError> {
        let zone = sqlx::query_as::<_, Zone>("SELECT * FROM zones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(zone)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Zone>, i64), AppError> {
        let page = query.page_params();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM zones WHERE 1 = 1");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::new("SELECT * FROM zones WHERE 1 = 1");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY name ASC, id ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let zones = select.build_query_as::<Zone>().fetch_all(&self.pool).await?;

        Ok((zones, total))
    }

    pub async fn find_by_city(&self, city_id: Uuid) -> Result<Vec<Zone>, AppError> {
        let zones = sqlx::query_as::<_, Zone>(
            "SELECT * FROM zones WHERE city_id = $1 ORDER BY name ASC",
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(zones)
    }

    /// Zonas de una ciudad con su número de lugares
    pub async fn find_by_city_with_counts(&self, city_id: Uuid) -> Result<Vec<ZoneWithCount>, AppError> {
        let zones = sqlx::query_as::<_, ZoneWithCount>(
            r#"
            SELECT z.id, z.city_id, z.name, z.description, z.external_id, z.is_active,
                   COUNT(l.id) AS location_count
            FROM zones z
            LEFT JOIN locations l ON l.zone_id = z.id
            WHERE z.city_id = $1
            GROUP BY z.id
            ORDER BY z.name ASC
            "#,
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(zones)
    }

    pub async fn update(
        &self,
        current: Zone,
        city_id: Option<Uuid>,
        name: Option<String>,
        description: Option<String>,
        external_id: Option<String>,
        is_active: Option<bool>,
    ) -> Result<Zone, AppError> {
        let zone = sqlx::query_as::<_, Zone>(
            r#"
            UPDATE zones
            SET city_id = $2, name = $3, description = $4, external_id = $5, is_active = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(city_id.unwrap_or(current.city_id))
        .bind(name.unwrap_or(current.name))
        .bind(description.or(current.description))
        .bind(external_id.or(current.external_id))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await?;

        Ok(zone)
    }

    /// Número de lugares de la zona que pertenecen a otra ciudad
    pub async fn count_locations_outside_city(&self, zone_id: Uuid, city_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM locations WHERE zone_id = $1 AND city_id <> $2",
        )
        .bind(zone_id)
        .bind(city_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM zones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn first_or_create(
        conn: &mut PgConnection,
        external_id: &str,
        city_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<(Zone, bool), AppError> {
        let inserted = sqlx::query_as::<_, Zone>(
            r#"
            INSERT INTO zones (id, city_id, name, description, external_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (external_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(city_id)
        .bind(name)
        .bind(description)
        .bind(external_id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(zone) = inserted {
            return Ok((zone, true));
        }

        let existing = sqlx::query_as::<_, Zone>("SELECT * FROM zones WHERE external_id = $1")
            .bind(external_id)
            .fetch_one(&mut *conn)
            .await?;

        Ok((existing, false))
    }
}
