// SQLite VehicleStore Implementation

use crate::error::map_sqlx_error;
use crate::Database;
use async_trait::async_trait;
use autocare_core::domain::{Vehicle, VehicleId, UNASSIGNED_ID, UNSET_TIMESTAMP};
use autocare_core::error::{AppError, Result};
use autocare_core::port::{LiveQuery, Table, TimeProvider, VehicleStore};
use futures::FutureExt;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Deleting a vehicle cascades into every dependent table
const VEHICLE_DELETE_TABLES: &[Table] = &Table::ALL;

pub struct SqliteVehicleStore {
    db: Database,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteVehicleStore {
    pub fn new(db: Database, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { db, time_provider }
    }
}

#[async_trait]
impl VehicleStore for SqliteVehicleStore {
    async fn insert(&self, vehicle: &Vehicle) -> Result<VehicleId> {
        let id = (vehicle.id != UNASSIGNED_ID).then_some(vehicle.id);
        let created_at = if vehicle.created_at == UNSET_TIMESTAMP {
            self.time_provider.now_millis()
        } else {
            vehicle.created_at
        };

        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, make, model, year, registration,
                color, mileage, image_uri, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.registration)
        .bind(&vehicle.color)
        .bind(vehicle.mileage)
        .bind(&vehicle.image_uri)
        .bind(created_at)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        self.db.notify(&[Table::Vehicles]);
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET make = ?, model = ?, year = ?, registration = ?,
                color = ?, mileage = ?, image_uri = ?, created_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.registration)
        .bind(&vehicle.color)
        .bind(vehicle.mileage)
        .bind(&vehicle.image_uri)
        .bind(vehicle.created_at)
        .bind(vehicle.id)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vehicle {} not found", vehicle.id)));
        }

        self.db.notify(&[Table::Vehicles]);
        Ok(())
    }

    async fn delete_by_id(&self, id: VehicleId) -> Result<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            self.db.notify(VEHICLE_DELETE_TABLES);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(VehicleRow::into_vehicle))
    }

    fn observe_all(&self) -> LiveQuery<Vec<Vehicle>> {
        let pool = self.db.pool().clone();
        LiveQuery::spawn(Table::Vehicles, self.db.subscribe(), move || {
            fetch_all(pool.clone()).boxed()
        })
    }
}

async fn fetch_all(pool: SqlitePool) -> Result<Vec<Vehicle>> {
    let rows: Vec<VehicleRow> =
        sqlx::query_as("SELECT * FROM vehicles ORDER BY created_at DESC, id DESC")
            .fetch_all(&pool)
            .await
            .map_err(map_sqlx_error)?;

    Ok(rows.into_iter().map(VehicleRow::into_vehicle).collect())
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    make: String,
    model: String,
    year: i32,
    registration: String,
    color: Option<String>,
    mileage: Option<i64>,
    image_uri: Option<String>,
    created_at: i64,
}

impl VehicleRow {
    fn into_vehicle(self) -> Vehicle {
        Vehicle {
            id: self.id,
            make: self.make,
            model: self.model,
            year: self.year,
            registration: self.registration,
            color: self.color,
            mileage: self.mileage,
            image_uri: self.image_uri,
            created_at: self.created_at,
        }
    }
}
