// Presentation State Holders
//
// One holder per entity. Each exposes observable cells that a UI reads
// reactively, republishes live query results into them, and wraps writes
// with a loading flag.

mod activity;
mod expense;
mod maintenance;
mod mechanic;
mod observable;
mod subscription;
mod vehicle;

pub use activity::{Activity, LoadingGuard};
pub use expense::ExpenseState;
pub use maintenance::MaintenanceState;
pub use mechanic::MechanicState;
pub use observable::Observable;
pub use subscription::Subscription;
pub use vehicle::VehicleState;
