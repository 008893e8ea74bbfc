use crate::dto::ListQuery;
use crate::models::{VehicleType, VehicleTypeFeature};
use crate::utils::errors::AppError;
use crate::utils::validation::{escape_like, normalize_search};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Campos de un tipo de vehículo nuevo o actualizado
#[derive(Debug, Clone)]
pub struct VehicleTypeFields {
    pub name: String,
    pub description: Option<String>,
    pub max_passengers: i32,
    pub max_luggage: i32,
    pub sort_order: i32,
    pub is_active: bool,
}

pub struct VehicleTypeRepository {
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

impl VehicleTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear el tipo de vehículo y enlazar sus servicios en una transacción
    pub async fn create(
        &self,
        fields: VehicleTypeFields,
        feature_ids: &[Uuid],
    ) -> Result<VehicleType, AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle_type = sqlx::query_as::<_, VehicleType>(
            r#"
            INSERT INTO vehicle_types (id, name, description, max_passengers, max_luggage, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.max_passengers)
        .bind(fields.max_luggage)
        .bind(fields.sort_order)
        .bind(fields.is_active)
        .fetch_one(&mut *tx)
        .await?;

        replace_features(&mut tx, vehicle_type.id, feature_ids).await?;
        tx.commit().await?;

        Ok(vehicle_type)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VehicleType>, AppError> {
        let vehicle_type = sqlx::query_as::<_, VehicleType>("SELECT * FROM vehicle_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle_type)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicle_types WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<VehicleType>, i64), AppError> {
        let page = query.page_params();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM vehicle_types WHERE 1 = 1");
        push_filters(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::new("SELECT * FROM vehicle_types WHERE 1 = 1");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY sort_order ASC, name ASC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let vehicle_types = select
            .build_query_as::<VehicleType>()
            .fetch_all(&self.pool)
            .await?;

        Ok((vehicle_types, total))
    }

    /// Servicios de varios tipos de vehículo
    pub async fn features_for(&self, vehicle_type_ids: &[Uuid]) -> Result<Vec<VehicleTypeFeature>, AppError> {
        if vehicle_type_ids.is_empty() {
            return Ok(Vec::new());
        }

        let features = sqlx::query_as::<_, VehicleTypeFeature>(
            r#"
            SELECT vf.vehicle_type_id, sf.id, sf.name, sf.icon
            FROM vehicle_type_service_features vf
            JOIN service_features sf ON sf.id = vf.service_feature_id
            WHERE vf.vehicle_type_id = ANY($1) AND sf.is_active
            ORDER BY sf.name ASC
            "#,
        )
        .bind(vehicle_type_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(features)
    }

    /// Actualizar; si `feature_ids` viene, reemplaza los servicios enlazados
    pub async fn update(
        &self,
        id: Uuid,
        fields: VehicleTypeFields,
        feature_ids: Option<&[Uuid]>,
    ) -> Result<VehicleType, AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle_type = sqlx::query_as::<_, VehicleType>(
            r#"
            UPDATE vehicle_types
            SET name = $2, description = $3, max_passengers = $4, max_luggage = $5,
                sort_order = $6, is_active = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.description)
        .bind(fields.max_passengers)
        .bind(fields.max_luggage)
        .bind(fields.sort_order)
        .bind(fields.is_active)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(feature_ids) = feature_ids {
            replace_features(&mut tx, id, feature_ids).await?;
        }
        tx.commit().await?;

        Ok(vehicle_type)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicle_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn replace_features(
    conn: &mut PgConnection,
    vehicle_type_id: Uuid,
    feature_ids: &[Uuid],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM vehicle_type_service_features WHERE vehicle_type_id = $1")
        .bind(vehicle_type_id)
        .execute(&mut *conn)
        .await?;

    if !feature_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO vehicle_type_service_features (vehicle_type_id, service_feature_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(vehicle_type_id)
        .bind(feature_ids)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
