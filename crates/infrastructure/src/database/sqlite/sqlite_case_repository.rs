use async_trait::async_trait;
use dispatch_core::{Case, CaseStatus, CaseStore, CoordinatorResult, DispatchError};
use sqlx::{Row, SqlitePool};
use tracing::{debug, instrument};

const CASE_COLUMNS: &str = "id, latitude, longitude, specialization, status, assigned_ambulance_id, assigned_hospital_id, estimated_duration_seconds, estimated_distance_meters, route_geometry, created_at";

pub struct SqliteCaseRepository {
    pool: SqlitePool,
}

impl SqliteCaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_case(row: &sqlx::sqlite::SqliteRow) -> CoordinatorResult<Case> {
        let status: String = row.try_get("status")?;

        Ok(Case {
            id: row.try_get("id")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            specialization: row.try_get("specialization")?,
            status: status.parse::<CaseStatus>()?,
            assigned_ambulance_id: row.try_get("assigned_ambulance_id")?,
            assigned_hospital_id: row.try_get("assigned_hospital_id")?,
            estimated_duration_seconds: row.try_get("estimated_duration_seconds")?,
            estimated_distance_meters: row.try_get("estimated_distance_meters")?,
            route_geometry: row.try_get("route_geometry")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl CaseStore for SqliteCaseRepository {
    #[instrument(skip(self, case), fields(
        ambulance_id = case.assigned_ambulance_id,
        hospital_id = case.assigned_hospital_id,
    ))]
    async fn create_case(&self, case: &Case) -> CoordinatorResult<Case> {
        let result = sqlx::query(
            r#"
            INSERT INTO cases (latitude, longitude, specialization, status, assigned_ambulance_id, assigned_hospital_id, estimated_duration_seconds, estimated_distance_meters, route_geometry, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(case.latitude)
        .bind(case.longitude)
        .bind(&case.specialization)
        .bind(case.status.as_str())
        .bind(case.assigned_ambulance_id)
        .bind(case.assigned_hospital_id)
        .bind(case.estimated_duration_seconds)
        .bind(case.estimated_distance_meters)
        .bind(&case.route_geometry)
        .bind(case.created_at)
        .execute(&self.pool)
        .await
        .map_err(DispatchError::Database)?;

        let mut created = case.clone();
        created.id = result.last_insert_rowid();

        debug!(
            case_id = created.id,
            ambulance_id = created.assigned_ambulance_id,
            hospital_id = created.assigned_hospital_id,
            "创建调度案例成功"
        );
        Ok(created)
    }

    #[instrument(skip(self), fields(case_id = %id))]
    async fn get_case(&self, id: i64) -> CoordinatorResult<Option<Case>> {
        let row = sqlx::query(&format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DispatchError::Database)?;

        match row {
            Some(row) => Ok(Some(Self::row_to_case(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_cases(&self) -> CoordinatorResult<Vec<Case>> {
        let rows = sqlx::query(&format!("SELECT {CASE_COLUMNS} FROM cases ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(DispatchError::Database)?;

        rows.iter().map(Self::row_to_case).collect()
    }

    #[instrument(skip(self, case), fields(case_id = %case.id))]
    async fn update_case(&self, case: &Case) -> CoordinatorResult<Case> {
        let result = sqlx::query(
            r#"
            UPDATE cases SET
                latitude = $1,
                longitude = $2,
                specialization = $3,
                status = $4,
                assigned_ambulance_id = $5,
                assigned_hospital_id = $6,
                estimated_duration_seconds = $7,
                estimated_distance_meters = $8,
                route_geometry = $9,
                created_at = $10
            WHERE id = $11
            "#,
        )
        .bind(case.latitude)
        .bind(case.longitude)
        .bind(&case.specialization)
        .bind(case.status.as_str())
        .bind(case.assigned_ambulance_id)
        .bind(case.assigned_hospital_id)
        .bind(case.estimated_duration_seconds)
        .bind(case.estimated_distance_meters)
        .bind(&case.route_geometry)
        .bind(case.created_at)
        .bind(case.id)
        .execute(&self.pool)
        .await
        .map_err(DispatchError::Database)?;

        if result.rows_affected() == 0 {
            return Err(DispatchError::CaseNotFound { id: case.id });
        }

        debug!(case_id = case.id, status = %case.status, "更新调度案例成功");
        Ok(case.clone())
    }
}
