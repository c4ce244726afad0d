// Repository Layer - stable interface over the store ports
//
// Pure pass-through: no caching, no retries. The only behavior added is that
// aggregate sums read as zero when no rows match.

mod expense;
mod maintenance;
mod mechanic;
mod vehicle;

pub use expense::ExpenseRepository;
pub use maintenance::MaintenanceRepository;
pub use mechanic::MechanicRepository;
pub use vehicle::VehicleRepository;
