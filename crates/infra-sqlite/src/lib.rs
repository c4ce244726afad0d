// AutoCare Infrastructure - SQLite Adapter
// Implements: VehicleStore, MaintenanceStore, ExpenseStore, MechanicStore

mod connection;
mod database;
mod error;
mod expense_store;
mod maintenance_store;
mod mechanic_store;
mod migration;
mod vehicle_store;

pub use connection::create_pool;
pub use database::{Database, DEFAULT_CHANGE_FEED_CAPACITY};
pub use expense_store::SqliteExpenseStore;
pub use maintenance_store::SqliteMaintenanceStore;
pub use mechanic_store::SqliteMechanicStore;
pub use migration::{current_schema_version, run_migrations};
pub use vehicle_store::SqliteVehicleStore;

// Note: sqlx::Error conversion goes through error::map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
