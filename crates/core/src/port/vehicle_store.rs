// Vehicle Store Port (Interface)

use crate::domain::{Vehicle, VehicleId};
use crate::error::Result;
use crate::port::LiveQuery;
use async_trait::async_trait;

/// Persistence interface for vehicles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Insert a vehicle and return its id
    async fn insert(&self, vehicle: &Vehicle) -> Result<VehicleId>;

    /// Replace the stored vehicle with the same id
    ///
    /// Fails with `NotFound` if no such vehicle exists.
    async fn update(&self, vehicle: &Vehicle) -> Result<()>;

    /// Delete a vehicle and, by cascade, all records that reference it
    ///
    /// Deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: VehicleId) -> Result<()>;

    /// Find vehicle by ID
    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>>;

    /// All vehicles, newest first (creation time descending)
    fn observe_all(&self) -> LiveQuery<Vec<Vehicle>>;
}
