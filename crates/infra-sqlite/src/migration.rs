// Migration Runner

use crate::error::map_sqlx_error;
use autocare_core::error::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Ordered migrations; the last entry's version is the current schema version
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    1,
    "Initial schema",
    include_str!("../migrations/001_initial_schema.sql"),
)];

/// Tables dropped by a destructive rebuild, dependents first
const TABLES: &[&str] = &[
    "mechanics",
    "expenses",
    "maintenance",
    "vehicles",
    "schema_version",
];

/// Schema version this build reads and writes
pub fn current_schema_version() -> i64 {
    MIGRATIONS.last().map_or(0, |(version, _, _)| *version)
}

/// Run database migrations
///
/// A store written by an unknown (newer) schema version is rebuilt from
/// scratch; all existing rows are lost.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    let stored_version = read_schema_version(pool).await?;
    let target_version = current_schema_version();

    info!(stored_version, target_version, "Current schema version");

    if stored_version > target_version {
        warn!(
            stored_version,
            target_version, "Unknown schema version, rebuilding database destructively"
        );
        drop_all_tables(pool).await?;
        return apply_from(pool, 0).await;
    }

    apply_from(pool, stored_version).await
}

/// Apply every migration newer than `stored_version`
async fn apply_from(pool: &SqlitePool, stored_version: i64) -> Result<()> {
    for (version, name, sql) in MIGRATIONS {
        if *version > stored_version {
            info!("Applying migration {:03}: {}", version, name);
            apply_migration(pool, sql).await?;
        }
    }

    info!("All migrations applied successfully");
    Ok(())
}

async fn read_schema_version(pool: &SqlitePool) -> Result<i64> {
    // Check if schema_version table exists
    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(pool)
    .await
    .map_err(map_sqlx_error)?;

    if table_exists == 0 {
        return Ok(0);
    }

    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await
        .map_err(map_sqlx_error)?;

    Ok(version.unwrap_or(0))
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;
    for table in TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
    }
    tx.commit().await.map_err(map_sqlx_error)
}

/// Apply a single migration SQL file
async fn apply_migration(pool: &SqlitePool, sql: &str) -> Result<()> {
    // Execute migration in a transaction
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    // Split by semicolon and execute each statement
    for statement in sql.split(';') {
        // Remove comments and trim
        let clean_statement: String = statement
            .lines()
            .filter(|line| !line.trim().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();

        if !clean_statement.is_empty() {
            sqlx::query(&clean_statement)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }
    }

    tx.commit().await.map_err(map_sqlx_error)
}
