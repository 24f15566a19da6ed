use std::str::FromStr;

use dispatch_core::{CoordinatorResult, DatabaseConfig, DispatchError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

const CREATE_CASES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    specialization TEXT NOT NULL,
    status TEXT NOT NULL,
    assigned_ambulance_id INTEGER NOT NULL,
    assigned_hospital_id INTEGER NOT NULL,
    estimated_duration_seconds REAL NOT NULL,
    estimated_distance_meters REAL NOT NULL,
    route_geometry TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

/// 创建案例存储的SQLite连接池并初始化表结构
pub async fn connect_case_store(config: &DatabaseConfig) -> CoordinatorResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(DispatchError::Database)?
        .create_if_missing(true);

    let pool_options = if config.is_in_memory() {
        // 连接关闭后内存库即丢失，只保留一个常驻连接
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(DispatchError::Database)?;

    run_migrations(&pool).await?;

    info!(url = %config.url, "Case store database ready");
    Ok(pool)
}

/// 创建案例表（幂等）
pub async fn run_migrations(pool: &SqlitePool) -> CoordinatorResult<()> {
    sqlx::query(CREATE_CASES_TABLE)
        .execute(pool)
        .await
        .map_err(DispatchError::Database)?;
    Ok(())
}
