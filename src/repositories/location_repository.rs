use crate::dto::ListQuery;
use crate::models::{Location, LocationType, LocationTypeCount, LocationWithNames};
use crate::utils::errors::AppError;
use crate::utils::validation::{escape_like, normalize_search};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Columnas de `LocationWithNames`
const WITH_NAMES_SELECT: &str = r#"
    SELECT l.id, l.name, l.code, l.location_type, l.city_id, c.name AS city_name,
           l.zone_id, z.name AS zone_name
    FROM locations l
    JOIN cities c ON c.id = l.city_id
    LEFT JOIN zones z ON z.id = l.zone_id
"#;

/// Campos de un lugar nuevo o actualizado
#[derive(Debug, Clone)]
pub struct LocationFields {
    pub city_id: Uuid,
    pub zone_id: Option<Uuid>,
    pub name: String,
    pub location_type: LocationType,
    pub code: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub external_id: Option<String>,
    pub is_active: bool,
}

pub struct LocationRepository {
    pool: PgPool,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(search) = normalize_search(query.search.as_deref()) {
        let pattern = format!("%{}%", escape_like(&search));
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR code ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(city_id) = query.city_id {
        qb.push(" AND city_id = ").push_bind(city_id);
    }
    if let Some(zone_id) = query.zone_id {
        qb.push(" AND zone_id = ").push_bind(zone_id);
    }
    if let Some(active) = query.active {
        qb.push(" AND is_active = ").push_bind(active);
    }
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, fields: LocationFields) -> Result<Location, AppError> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (id, city_id, zone_id, name, location_type, code, address,
                                   latitude, longitude, external_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fields.city_id)
        .bind(fields.zone_id)
        .bind(fields.name)
        .bind(fields.location_type.code())
        .bind(fields.code)
        .bind(fields.address)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(fields.external_id)
        .bind(fields.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    /// Lugar activo, en una ciudad activa, con los nombres de ciudad y zona
    pub async fn find_active_with_names(&self, id: Uuid) -> Result<Option<LocationWithNames>, AppError> {
        let query = format!("{} WHERE l.id = $1 AND l.is_active AND c.is_active", WITH_NAMES_SELECT);
        let location = sqlx::query_as::<_, LocationWithNames>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Location>, i64), AppError> {
        let page = query.page_params();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM locations WHERE 1 = 1");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::new("SELECT * FROM locations WHERE 1 = 1");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY name ASC, id ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let locations = select.build_query_as::<Location>().fetch_all(&self.pool).await?;

        Ok((locations, total))
    }

    pub async fn find_by_city(&self, city_id: Uuid) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE city_id = $1 ORDER BY name ASC",
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    /// Lugares activos de un tipo
    pub async fn find_by_type(&self, location_type: LocationType) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE location_type = $1 AND is_active ORDER BY name ASC",
        )
        .bind(location_type.code())
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn count_by_type(&self, city_id: Uuid) -> Result<Vec<LocationTypeCount>, AppError> {
        let counts = sqlx::query_as::<_, LocationTypeCount>(
            r#"
            SELECT location_type, COUNT(*) AS total
            FROM locations
            WHERE city_id = $1
            GROUP BY location_type
            "#,
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Búsqueda para autocompletado: aeropuertos primero, luego los que
    /// empiezan por el texto, luego por nombre
    pub async fn search(
        &self,
        term: &str,
        location_type: Option<LocationType>,
        city_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<LocationWithNames>, AppError> {
        let escaped = escape_like(term);
        let contains = format!("%{}%", escaped);
        let prefix = format!("{}%", escaped);

        let mut qb = QueryBuilder::<Postgres>::new(WITH_NAMES_SELECT);
        qb.push(" WHERE l.is_active AND c.is_active AND (l.name ILIKE ")
            .push_bind(contains.clone())
            .push(" OR l.code ILIKE ")
            .push_bind(contains)
            .push(")");
        if let Some(location_type) = location_type {
            qb.push(" AND l.location_type = ").push_bind(location_type.code());
        }
        if let Some(city_id) = city_id {
            qb.push(" AND l.city_id = ").push_bind(city_id);
        }
        qb.push(" ORDER BY (l.location_type = 'A') DESC, (l.name ILIKE ")
            .push_bind(prefix)
            .push(") DESC, l.name ASC LIMIT ")
            .push_bind(limit);

        let locations = qb
            .build_query_as::<LocationWithNames>()
            .fetch_all(&self.pool)
            .await?;

        Ok(locations)
    }

    pub async fn update(&self, id: Uuid, fields: LocationFields) -> Result<Location, AppError> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET city_id = $2, zone_id = $3, name = $4, location_type = $5, code = $6, address = $7,
                latitude = $8, longitude = $9, external_id = $10, is_active = $11, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.city_id)
        .bind(fields.zone_id)
        .bind(fields.name)
        .bind(fields.location_type.code())
        .bind(fields.code)
        .bind(fields.address)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(fields.external_id)
        .bind(fields.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn first_or_create(
        conn: &mut PgConnection,
        external_id: &str,
        fields: LocationFields,
    ) -> Result<(Location, bool), AppError> {
        let inserted = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (id, city_id, zone_id, name, location_type, code, address,
                                   latitude, longitude, external_id, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (external_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fields.city_id)
        .bind(fields.zone_id)
        .bind(fields.name)
        .bind(fields.location_type.code())
        .bind(fields.code)
        .bind(fields.address)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(external_id)
        .bind(fields.is_active)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(location) = inserted {
            return Ok((location, true));
        }

        let existing = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE external_id = $1")
            .bind(external_id)
            .fetch_one(&mut *conn)
            .await?;

        Ok((existing, false))
    }
}
