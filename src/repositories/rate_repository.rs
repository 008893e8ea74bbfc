use crate::dto::ListQuery;
use crate::models::{Rate, RateCandidate};
use crate::utils::errors::AppError;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Campos de una tarifa nueva o actualizada
#[derive(Debug, Clone)]
pub struct RateFields {
    pub from_zone_id: Uuid,
    pub to_zone_id: Uuid,
    pub vehicle_type_id: Uuid,
    pub one_way_price: Decimal,
    pub round_trip_price: Option<Decimal>,
    pub currency: String,
    pub is_active: bool,
}

pub struct RateRepository {
    pool: PgPool,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    if let Some(zone_id) = query.zone_id {
        qb.push(" AND (from_zone_id = ")
            .push_bind(zone_id)
            .push(" OR to_zone_id = ")
            .push_bind(zone_id)
            .push(")");
    }
    if let Some(vehicle_type_id) = query.vehicle_type_id {
        qb.push(" AND vehicle_type_id = ").push_bind(vehicle_type_id);
    }
    if let Some(active) = query.active {
        qb.push(" AND is_active = ").push_bind(active);
    }
}

impl RateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, fields: RateFields) -> Result<Rate, AppError> {
        let rate = sqlx::query_as::<_, Rate>(
            r#"
            INSERT INTO rates (id, from_zone_id, to_zone_id, vehicle_type_id, one_way_price,
                               round_trip_price, currency, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fields.from_zone_id)
        .bind(fields.to_zone_id)
        .bind(fields.vehicle_type_id)
        .bind(fields.one_way_price)
        .bind(fields.round_trip_price)
        .bind(fields.currency)
        .bind(fields.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(rate)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Rate>, AppError> {
        let rate = sqlx::query_as::<_, Rate>("SELECT * FROM rates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rate)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<Rate>, i64), AppError> {
        let page = query.page_params();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM rates WHERE 1 = 1");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::new("SELECT * FROM rates WHERE 1 = 1");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY created_at DESC, id ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rates = select.build_query_as::<Rate>().fetch_all(&self.pool).await?;

        Ok((rates, total))
    }

    /// Tarifas activas entre dos zonas, en ambos sentidos, con su tipo de
    /// vehículo activo
    pub async fn candidates_between(&self, zone_a: Uuid, zone_b: Uuid) -> Result<Vec<RateCandidate>, AppError> {
        let candidates = sqlx::query_as::<_, RateCandidate>(
            r#"
            SELECT r.id AS rate_id, r.from_zone_id, r.to_zone_id, r.one_way_price, r.round_trip_price,
                   r.currency, vt.id AS vehicle_type_id, vt.name AS vehicle_type_name,
                   vt.description AS vehicle_type_description, vt.max_passengers, vt.max_luggage,
                   vt.sort_order
            FROM rates r
            JOIN vehicle_types vt ON vt.id = r.vehicle_type_id
            WHERE r.is_active AND vt.is_active
              AND ((r.from_zone_id = $1 AND r.to_zone_id = $2)
                OR (r.from_zone_id = $2 AND r.to_zone_id = $1))
            "#,
        )
        .bind(zone_a)
        .bind(zone_b)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }

    pub async fn update(&self, id: Uuid, fields: RateFields) -> Result<Rate, AppError> {
        let rate = sqlx::query_as::<_, Rate>(
            r#"
            UPDATE rates
            SET from_zone_id = $2, to_zone_id = $3, vehicle_type_id = $4, one_way_price = $5,
                round_trip_price = $6, currency = $7, is_active = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.from_zone_id)
        .bind(fields.to_zone_id)
        .bind(fields.vehicle_type_id)
        .bind(fields.one_way_price)
        .bind(fields.round_trip_price)
        .bind(fields.currency)
        .bind(fields.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(rate)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM rates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
