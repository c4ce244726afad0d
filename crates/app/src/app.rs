// Composition Root (dependency wiring)

use crate::config::AppConfig;
use anyhow::{Context, Result};
use autocare_core::application::{
    ExpenseRepository, ExpenseState, MaintenanceRepository, MaintenanceState, MechanicRepository,
    MechanicState, VehicleRepository, VehicleState,
};
use autocare_core::port::time_provider::SystemTimeProvider;
use autocare_core::port::TimeProvider;
use autocare_infra_sqlite::{
    Database, SqliteExpenseStore, SqliteMaintenanceStore, SqliteMechanicStore, SqliteVehicleStore,
};
use std::sync::Arc;
use tracing::info;

/// Process-wide handle: one database, one repository per entity
///
/// Repositories are cheap to clone; state holders are built on demand and
/// each owns its own subscriptions.
pub struct App {
    db: Database,
    time_provider: Arc<dyn TimeProvider>,
    vehicles: VehicleRepository,
    maintenance: MaintenanceRepository,
    expenses: ExpenseRepository,
    mechanics: MechanicRepository,
}

impl App {
    /// Open the configured database and wire everything against the system clock
    pub async fn start(config: &AppConfig) -> Result<Self> {
        if let Some(dir) = config.db_parent_dir() {
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        info!(db_path = %config.db_path, "Initializing database...");
        let db = Database::open(&config.database_url(), config.change_feed_capacity)
            .await
            .context("Failed to open database")?;

        Ok(Self::with_database(db, Arc::new(SystemTimeProvider)))
    }

    /// Fresh in-memory store (tests, demos)
    pub async fn open_in_memory() -> Result<Self> {
        Self::start(&AppConfig::in_memory()).await
    }

    /// Wire repositories over an already opened database
    pub fn with_database(db: Database, time_provider: Arc<dyn TimeProvider>) -> Self {
        let vehicles = VehicleRepository::new(Arc::new(SqliteVehicleStore::new(
            db.clone(),
            time_provider.clone(),
        )));
        let maintenance = MaintenanceRepository::new(Arc::new(SqliteMaintenanceStore::new(
            db.clone(),
            time_provider.clone(),
        )));
        let expenses = ExpenseRepository::new(Arc::new(SqliteExpenseStore::new(
            db.clone(),
            time_provider.clone(),
        )));
        let mechanics = MechanicRepository::new(Arc::new(SqliteMechanicStore::new(
            db.clone(),
            time_provider.clone(),
        )));

        Self {
            db,
            time_provider,
            vehicles,
            maintenance,
            expenses,
            mechanics,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn vehicles(&self) -> &VehicleRepository {
        &self.vehicles
    }

    pub fn maintenance(&self) -> &MaintenanceRepository {
        &self.maintenance
    }

    pub fn expenses(&self) -> &ExpenseRepository {
        &self.expenses
    }

    pub fn mechanics(&self) -> &MechanicRepository {
        &self.mechanics
    }

    /// Must be called inside a Tokio runtime (subscribes immediately)
    pub fn vehicle_state(&self) -> VehicleState {
        VehicleState::new(self.vehicles.clone())
    }

    pub fn maintenance_state(&self) -> MaintenanceState {
        MaintenanceState::new(self.maintenance.clone(), self.time_provider.clone())
    }

    pub fn expense_state(&self) -> ExpenseState {
        ExpenseState::new(self.expenses.clone())
    }

    pub fn mechanic_state(&self) -> MechanicState {
        MechanicState::new(self.mechanics.clone())
    }

    /// Close the database once in-flight statements have finished
    pub async fn shutdown(self) {
        info!("Shutting down...");
        self.db.close().await;
        info!("Shutdown complete.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocare_core::domain::Vehicle;

    #[tokio::test]
    async fn test_start_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("garage.db");
        let config = AppConfig {
            db_path: db_path.display().to_string(),
            ..AppConfig::default()
        };

        let app = tokio_test::assert_ok!(App::start(&config).await);
        tokio_test::assert_ok!(
            app.vehicles()
                .insert(&Vehicle::new("Fiat", "Panda", 2011, "P-1"))
                .await
        );
        app.shutdown().await;

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_in_memory_app_is_empty() {
        let app = tokio_test::assert_ok!(App::open_in_memory().await);
        assert!(tokio_test::assert_ok!(app.vehicles().find_by_id(1).await).is_none());
        app.shutdown().await;
    }
}
