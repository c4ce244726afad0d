// Maintenance Store Port (Interface)

use crate::domain::{MaintenanceId, MaintenanceRecord, VehicleId};
use crate::error::Result;
use crate::port::LiveQuery;
use async_trait::async_trait;

/// Persistence interface for maintenance records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    /// Insert a record and return its id
    ///
    /// Fails with `Constraint` if the owning vehicle does not exist.
    async fn insert(&self, record: &MaintenanceRecord) -> Result<MaintenanceId>;

    /// Replace the stored record with the same id (`NotFound` if absent)
    async fn update(&self, record: &MaintenanceRecord) -> Result<()>;

    /// Delete by id; absent ids are ignored
    async fn delete_by_id(&self, id: MaintenanceId) -> Result<()>;

    async fn find_by_id(&self, id: MaintenanceId) -> Result<Option<MaintenanceRecord>>;

    /// Set exactly the completion flag and completion date of a record
    ///
    /// Does not check that the two agree. `NotFound` if the record is absent.
    async fn mark_completed(
        &self,
        id: MaintenanceId,
        is_completed: bool,
        completed_date: Option<i64>,
    ) -> Result<()>;

    /// Records of a vehicle, scheduled date descending
    fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<MaintenanceRecord>>;

    /// Incomplete records scheduled at or before `now_millis`, scheduled date ascending
    fn observe_overdue(&self, now_millis: i64) -> LiveQuery<Vec<MaintenanceRecord>>;

    /// All incomplete records, scheduled date ascending
    fn observe_pending(&self) -> LiveQuery<Vec<MaintenanceRecord>>;
}
