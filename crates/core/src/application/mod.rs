// Application Layer - Repositories and presentation state holders

pub mod repository;
pub mod state;

// Re-exports
pub use repository::{ExpenseRepository, MaintenanceRepository, MechanicRepository, VehicleRepository};
pub use state::{ExpenseState, MaintenanceState, MechanicState, Observable, VehicleState};
