// SQLite MechanicStore Implementation

use crate::error::map_sqlx_error;
use crate::Database;
use async_trait::async_trait;
use autocare_core::domain::{Mechanic, MechanicId, VehicleId, UNASSIGNED_ID, UNSET_TIMESTAMP};
use autocare_core::error::{AppError, Result};
use autocare_core::port::{LiveQuery, MechanicStore, Table, TimeProvider};
use futures::FutureExt;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct SqliteMechanicStore {
    db: Database,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteMechanicStore {
    pub fn new(db: Database, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { db, time_provider }
    }
}

#[async_trait]
impl MechanicStore for SqliteMechanicStore {
    async fn insert(&self, mechanic: &Mechanic) -> Result<MechanicId> {
        let id = (mechanic.id != UNASSIGNED_ID).then_some(mechanic.id);
        let created_at = if mechanic.created_at == UNSET_TIMESTAMP {
            self.time_provider.now_millis()
        } else {
            mechanic.created_at
        };

        let result = sqlx::query(
            r#"
            INSERT INTO mechanics (
                id, vehicle_id, name, phone, service_center, notes, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(mechanic.vehicle_id)
        .bind(&mechanic.name)
        .bind(&mechanic.phone)
        .bind(&mechanic.service_center)
        .bind(&mechanic.notes)
        .bind(created_at)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        self.db.notify(&[Table::Mechanics]);
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, mechanic: &Mechanic) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE mechanics
            SET vehicle_id = ?, name = ?, phone = ?, service_center = ?,
                notes = ?, created_at = ?
            WHERE id = ?
            "#,
        )
        .bind(mechanic.vehicle_id)
        .bind(&mechanic.name)
        .bind(&mechanic.phone)
        .bind(&mechanic.service_center)
        .bind(&mechanic.notes)
        .bind(mechanic.created_at)
        .bind(mechanic.id)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Mechanic {} not found", mechanic.id)));
        }

        self.db.notify(&[Table::Mechanics]);
        Ok(())
    }

    async fn delete_by_id(&self, id: MechanicId) -> Result<()> {
        let result = sqlx::query("DELETE FROM mechanics WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            self.db.notify(&[Table::Mechanics]);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: MechanicId) -> Result<Option<Mechanic>> {
        let row = sqlx::query_as::<_, MechanicRow>("SELECT * FROM mechanics WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(MechanicRow::into_mechanic))
    }

    fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<Mechanic>> {
        let pool = self.db.pool().clone();
        LiveQuery::spawn(Table::Mechanics, self.db.subscribe(), move || {
            fetch_by_vehicle(pool.clone(), vehicle_id).boxed()
        })
    }
}

async fn fetch_by_vehicle(pool: SqlitePool, vehicle_id: VehicleId) -> Result<Vec<Mechanic>> {
    let rows: Vec<MechanicRow> =
        sqlx::query_as("SELECT * FROM mechanics WHERE vehicle_id = ? ORDER BY name ASC, id ASC")
            .bind(vehicle_id)
            .fetch_all(&pool)
            .await
            .map_err(map_sqlx_error)?;

    Ok(rows.into_iter().map(MechanicRow::into_mechanic).collect())
}

#[derive(Debug, sqlx::FromRow)]
struct MechanicRow {
    id: i64,
    vehicle_id: i64,
    name: String,
    phone: String,
    service_center: Option<String>,
    notes: String,
    created_at: i64,
}

impl MechanicRow {
    fn into_mechanic(self) -> Mechanic {
        Mechanic {
            id: self.id,
            vehicle_id: self.vehicle_id,
            name: self.name,
            phone: self.phone,
            service_center: self.service_center,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteVehicleStore;
    use autocare_core::domain::Vehicle;
    use autocare_core::port::time_provider::FixedTimeProvider;
    use autocare_core::port::VehicleStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_observe_by_vehicle_sorted_by_name() {
        let db = Database::open_in_memory().await.unwrap();
        let time_provider: Arc<dyn TimeProvider> = Arc::new(FixedTimeProvider(1));
        let vehicles = SqliteVehicleStore::new(db.clone(), time_provider.clone());
        let store = SqliteMechanicStore::new(db, time_provider);

        let vehicle_id = vehicles
            .insert(&Vehicle::new("VW", "Golf", 2014, "V-1"))
            .await
            .unwrap();
        for name in ["Zoe", "Adam", "Mia"] {
            store
                .insert(&Mechanic::new(vehicle_id, name, "555-0100"))
                .await
                .unwrap();
        }

        let mut live = store.observe_by_vehicle(vehicle_id);
        let names: Vec<String> = tokio::time::timeout(Duration::from_secs(5), live.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["Adam", "Mia", "Zoe"]);
    }

    #[tokio::test]
    async fn test_service_center_is_optional() {
        let db = Database::open_in_memory().await.unwrap();
        let time_provider: Arc<dyn TimeProvider> = Arc::new(FixedTimeProvider(1));
        let vehicles = SqliteVehicleStore::new(db.clone(), time_provider.clone());
        let store = SqliteMechanicStore::new(db, time_provider);

        let vehicle_id = vehicles
            .insert(&Vehicle::new("VW", "Polo", 2010, "V-2"))
            .await
            .unwrap();
        let with_center = store
            .insert(&Mechanic::new(vehicle_id, "Ann", "1").with_service_center("Main St Garage"))
            .await
            .unwrap();
        let without = store
            .insert(&Mechanic::new(vehicle_id, "Bob", "2"))
            .await
            .unwrap();

        let found = store.find_by_id(with_center).await.unwrap().unwrap();
        assert_eq!(found.service_center.as_deref(), Some("Main St Garage"));
        let found = store.find_by_id(without).await.unwrap().unwrap();
        assert!(found.service_center.is_none());
    }
}
