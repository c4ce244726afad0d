// Port Layer - Interfaces for external dependencies

pub mod expense_store;
pub mod live_query;
pub mod maintenance_store;
pub mod mechanic_store;
pub mod time_provider;
pub mod vehicle_store;

// Re-exports
pub use expense_store::ExpenseStore;
pub use live_query::{ChangeReceiver, LiveQuery, Table};
pub use maintenance_store::MaintenanceStore;
pub use mechanic_store::MechanicStore;
pub use time_provider::TimeProvider;
pub use vehicle_store::VehicleStore;
