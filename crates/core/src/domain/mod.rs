// Domain Layer - Entities, aggregate rows and label sets

pub mod date;
pub mod error;
pub mod expense;
pub mod maintenance;
pub mod mechanic;
pub mod vehicle;

// Re-exports
pub use error::DomainError;
pub use expense::{
    CategoryTotal, ExpenseCategory, ExpenseId, ExpenseRecord, ExpenseSummary, YearlyTotal,
};
pub use maintenance::{MaintenanceId, MaintenanceRecord, MaintenanceType};
pub use mechanic::{Mechanic, MechanicId};
pub use vehicle::{Vehicle, VehicleId};

/// Id carried by a record that has not been inserted yet.
///
/// Stores assign a fresh id to such records; any other value is inserted as-is.
pub const UNASSIGNED_ID: i64 = 0;

/// Creation timestamp placeholder; stores stamp the current time instead.
pub const UNSET_TIMESTAMP: i64 = 0;
