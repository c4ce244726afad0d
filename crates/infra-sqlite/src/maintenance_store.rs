// SQLite MaintenanceStore Implementation

use crate::error::map_sqlx_error;
use crate::Database;
use async_trait::async_trait;
use autocare_core::domain::{
    MaintenanceId, MaintenanceRecord, VehicleId, UNASSIGNED_ID, UNSET_TIMESTAMP,
};
use autocare_core::error::{AppError, Result};
use autocare_core::port::{LiveQuery, MaintenanceStore, Table, TimeProvider};
use futures::FutureExt;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct SqliteMaintenanceStore {
    db: Database,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteMaintenanceStore {
    pub fn new(db: Database, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { db, time_provider }
    }

    fn observe(&self, filter: MaintenanceFilter) -> LiveQuery<Vec<MaintenanceRecord>> {
        let pool = self.db.pool().clone();
        LiveQuery::spawn(Table::Maintenance, self.db.subscribe(), move || {
            fetch(pool.clone(), filter).boxed()
        })
    }
}

#[async_trait]
impl MaintenanceStore for SqliteMaintenanceStore {
    async fn insert(&self, record: &MaintenanceRecord) -> Result<MaintenanceId> {
        let id = (record.id != UNASSIGNED_ID).then_some(record.id);
        let created_at = if record.created_at == UNSET_TIMESTAMP {
            self.time_provider.now_millis()
        } else {
            record.created_at
        };

        let result = sqlx::query(
            r#"
            INSERT INTO maintenance (
                id, vehicle_id, service_type, description,
                scheduled_date, completed_date, cost, mileage,
                mechanic_name, notes, is_completed, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(record.vehicle_id)
        .bind(&record.service_type)
        .bind(&record.description)
        .bind(record.scheduled_date)
        .bind(record.completed_date)
        .bind(record.cost)
        .bind(record.mileage)
        .bind(&record.mechanic_name)
        .bind(&record.notes)
        .bind(record.is_completed)
        .bind(created_at)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        self.db.notify(&[Table::Maintenance]);
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, record: &MaintenanceRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE maintenance
            SET vehicle_id = ?, service_type = ?, description = ?,
                scheduled_date = ?, completed_date = ?, cost = ?, mileage = ?,
                mechanic_name = ?, notes = ?, is_completed = ?, created_at = ?
            WHERE id = ?
            "#,
        )
        .bind(record.vehicle_id)
        .bind(&record.service_type)
        .bind(&record.description)
        .bind(record.scheduled_date)
        .bind(record.completed_date)
        .bind(record.cost)
        .bind(record.mileage)
        .bind(&record.mechanic_name)
        .bind(&record.notes)
        .bind(record.is_completed)
        .bind(record.created_at)
        .bind(record.id)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Maintenance record {} not found",
                record.id
            )));
        }

        self.db.notify(&[Table::Maintenance]);
        Ok(())
    }

    async fn delete_by_id(&self, id: MaintenanceId) -> Result<()> {
        let result = sqlx::query("DELETE FROM maintenance WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            self.db.notify(&[Table::Maintenance]);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: MaintenanceId) -> Result<Option<MaintenanceRecord>> {
        let row = sqlx::query_as::<_, MaintenanceRow>("SELECT * FROM maintenance WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(MaintenanceRow::into_record))
    }

    async fn mark_completed(
        &self,
        id: MaintenanceId,
        is_completed: bool,
        completed_date: Option<i64>,
    ) -> Result<()> {
        // Only the two completion columns are touched
        let result = sqlx::query(
            r#"
            UPDATE maintenance
            SET is_completed = ?, completed_date = ?
            WHERE id = ?
            "#,
        )
        .bind(is_completed)
        .bind(completed_date)
        .bind(id)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Maintenance record {} not found",
                id
            )));
        }

        self.db.notify(&[Table::Maintenance]);
        Ok(())
    }

    fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<MaintenanceRecord>> {
        self.observe(MaintenanceFilter::Vehicle(vehicle_id))
    }

    fn observe_overdue(&self, now_millis: i64) -> LiveQuery<Vec<MaintenanceRecord>> {
        self.observe(MaintenanceFilter::Overdue(now_millis))
    }

    fn observe_pending(&self) -> LiveQuery<Vec<MaintenanceRecord>> {
        self.observe(MaintenanceFilter::Pending)
    }
}

#[derive(Debug, Clone, Copy)]
enum MaintenanceFilter {
    /// Records of one vehicle, scheduled date descending
    Vehicle(VehicleId),
    /// Incomplete and scheduled at or before the cut-off, ascending
    Overdue(i64),
    /// Incomplete, ascending
    Pending,
}

async fn fetch(pool: SqlitePool, filter: MaintenanceFilter) -> Result<Vec<MaintenanceRecord>> {
    let rows: Vec<MaintenanceRow> = match filter {
        MaintenanceFilter::Vehicle(vehicle_id) => {
            sqlx::query_as(
                r#"
                SELECT * FROM maintenance
                WHERE vehicle_id = ?
                ORDER BY scheduled_date DESC, id DESC
                "#,
            )
            .bind(vehicle_id)
            .fetch_all(&pool)
            .await
        }
        MaintenanceFilter::Overdue(now_millis) => {
            sqlx::query_as(
                r#"
                SELECT * FROM maintenance
                WHERE is_completed = 0 AND scheduled_date <= ?
                ORDER BY scheduled_date ASC, id ASC
                "#,
            )
            .bind(now_millis)
            .fetch_all(&pool)
            .await
        }
        MaintenanceFilter::Pending => {
            sqlx::query_as(
                r#"
                SELECT * FROM maintenance
                WHERE is_completed = 0
                ORDER BY scheduled_date ASC, id ASC
                "#,
            )
            .fetch_all(&pool)
            .await
        }
    }
    .map_err(map_sqlx_error)?;

    Ok(rows.into_iter().map(MaintenanceRow::into_record).collect())
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct MaintenanceRow {
    id: i64,
    vehicle_id: i64,
    service_type: String,
    description: String,
    scheduled_date: i64,
    completed_date: Option<i64>,
    cost: f64,
    mileage: i64,
    mechanic_name: String,
    notes: String,
    is_completed: bool, // SQLite boolean as integer
    created_at: i64,
}

impl MaintenanceRow {
    fn into_record(self) -> MaintenanceRecord {
        MaintenanceRecord {
            id: self.id,
            vehicle_id: self.vehicle_id,
            service_type: self.service_type,
            description: self.description,
            scheduled_date: self.scheduled_date,
            completed_date: self.completed_date,
            cost: self.cost,
            mileage: self.mileage,
            mechanic_name: self.mechanic_name,
            notes: self.notes,
            is_completed: self.is_completed,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteVehicleStore;
    use autocare_core::domain::Vehicle;
    use autocare_core::port::time_provider::SystemTimeProvider;
    use autocare_core::port::VehicleStore;

    async fn setup() -> (SqliteMaintenanceStore, VehicleId) {
        let db = Database::open_in_memory().await.unwrap();
        let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
        let vehicles = SqliteVehicleStore::new(db.clone(), time_provider.clone());
        let vehicle_id = vehicles
            .insert(&Vehicle::new("Honda", "Jazz", 2012, "H-1"))
            .await
            .unwrap();
        (SqliteMaintenanceStore::new(db, time_provider), vehicle_id)
    }

    #[tokio::test]
    async fn test_mark_completed_touches_only_completion() {
        let (store, vehicle_id) = setup().await;

        let mut record = MaintenanceRecord::new(vehicle_id, "Oil Change", "5W-30", 1_000);
        record.cost = 59.9;
        record.notes = "Bring coupon".to_string();
        let id = store.insert(&record).await.unwrap();

        store.mark_completed(id, true, Some(2_000)).await.unwrap();

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert!(found.is_completed);
        assert_eq!(found.completed_date, Some(2_000));
        assert_eq!(found.cost, 59.9);
        assert_eq!(found.notes, "Bring coupon");

        // Inconsistent pairs are stored as given
        store.mark_completed(id, false, Some(3_000)).await.unwrap();
        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert!(!found.is_completed);
        assert_eq!(found.completed_date, Some(3_000));
    }

    #[tokio::test]
    async fn test_mark_completed_missing_record() {
        let (store, _) = setup().await;
        let err = tokio_test::assert_err!(store.mark_completed(12345, true, Some(1)).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_insert_requires_existing_vehicle() {
        let (store, vehicle_id) = setup().await;

        let orphan = MaintenanceRecord::new(vehicle_id + 100, "Inspection", "Annual", 1_000);
        let err = tokio_test::assert_err!(store.insert(&orphan).await);
        assert!(err.is_constraint_violation(), "got {err:?}");
    }
}
