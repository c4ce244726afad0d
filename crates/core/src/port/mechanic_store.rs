// Mechanic Store Port (Interface)

use crate::domain::{Mechanic, MechanicId, VehicleId};
use crate::error::Result;
use crate::port::LiveQuery;
use async_trait::async_trait;

/// Persistence interface for mechanics
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MechanicStore: Send + Sync {
    /// Insert a mechanic and return its id
    async fn insert(&self, mechanic: &Mechanic) -> Result<MechanicId>;

    /// Replace the stored mechanic with the same id (`NotFound` if absent)
    async fn update(&self, mechanic: &Mechanic) -> Result<()>;

    /// Delete by id; absent ids are ignored
    async fn delete_by_id(&self, id: MechanicId) -> Result<()>;

    async fn find_by_id(&self, id: MechanicId) -> Result<Option<Mechanic>>;

    /// Mechanics of a vehicle, ordered by name ascending
    fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<Mechanic>>;
}
