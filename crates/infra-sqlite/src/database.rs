// Database handle: connection pool + change feed

use crate::{create_pool, run_migrations};
use autocare_core::error::Result;
use autocare_core::port::{ChangeReceiver, Table};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Buffered change notifications before a slow subscriber lags
pub const DEFAULT_CHANGE_FEED_CAPACITY: usize = 256;

/// Single long-lived handle to the embedded store
///
/// Opened once at startup, shared by every store (clones share the pool and
/// the change feed), and closed at shutdown.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    changes: broadcast::Sender<Table>,
}

impl Database {
    /// Open (or create) the database and bring its schema up to date
    pub async fn open(database_url: &str, change_feed_capacity: usize) -> Result<Self> {
        info!(database_url, "Opening database");
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::from_pool(pool, change_feed_capacity))
    }

    /// Fresh in-memory database (tests, demos)
    pub async fn open_in_memory() -> Result<Self> {
        Self::open("sqlite::memory:", DEFAULT_CHANGE_FEED_CAPACITY).await
    }

    /// Wrap an already migrated pool
    pub fn from_pool(pool: SqlitePool, change_feed_capacity: usize) -> Self {
        let (changes, _) = broadcast::channel(change_feed_capacity.max(1));
        Self { pool, changes }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Subscribe to committed-write notifications
    pub fn subscribe(&self) -> ChangeReceiver {
        self.changes.subscribe()
    }

    /// Announce a committed write to `tables`
    pub(crate) fn notify(&self, tables: &[Table]) {
        for table in tables {
            // No live subscribers is not an error
            let receivers = self.changes.send(*table).unwrap_or(0);
            debug!(table = %table, receivers, "Table changed");
        }
    }

    /// Wait for in-flight statements, then close every connection
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("autocare.db").display());

        let db = Database::open(&url, DEFAULT_CHANGE_FEED_CAPACITY)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO vehicles (make, model, year, registration, created_at) \
             VALUES ('Volvo', 'V70', 2008, 'VOL-1', 1)",
        )
        .execute(db.pool())
        .await
        .unwrap();
        db.close().await;

        let reopened = Database::open(&url, DEFAULT_CHANGE_FEED_CAPACITY)
            .await
            .unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(reopened.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_notify_reaches_subscribers() {
        let db = Database::open_in_memory().await.unwrap();
        let mut first = db.subscribe();
        let mut second = db.clone().subscribe();

        db.notify(&[Table::Expenses, Table::Mechanics]);

        assert_eq!(first.recv().await.unwrap(), Table::Expenses);
        assert_eq!(first.recv().await.unwrap(), Table::Mechanics);
        assert_eq!(second.recv().await.unwrap(), Table::Expenses);
    }
}
