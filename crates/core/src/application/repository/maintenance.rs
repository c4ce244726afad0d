// Maintenance Repository

use crate::domain::{MaintenanceId, MaintenanceRecord, VehicleId};
use crate::error::Result;
use crate::port::{LiveQuery, MaintenanceStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct MaintenanceRepository {
    store: Arc<dyn MaintenanceStore>,
}

impl MaintenanceRepository {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    pub fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<MaintenanceRecord>> {
        self.store.observe_by_vehicle(vehicle_id)
    }

    pub fn observe_overdue(&self, now_millis: i64) -> LiveQuery<Vec<MaintenanceRecord>> {
        self.store.observe_overdue(now_millis)
    }

    pub fn observe_pending(&self) -> LiveQuery<Vec<MaintenanceRecord>> {
        self.store.observe_pending()
    }

    pub async fn find_by_id(&self, id: MaintenanceId) -> Result<Option<MaintenanceRecord>> {
        self.store.find_by_id(id).await
    }

    pub async fn insert(&self, record: &MaintenanceRecord) -> Result<MaintenanceId> {
        self.store.insert(record).await
    }

    pub async fn update(&self, record: &MaintenanceRecord) -> Result<()> {
        self.store.update(record).await
    }

    pub async fn delete(&self, record: &MaintenanceRecord) -> Result<()> {
        self.store.delete_by_id(record.id).await
    }

    pub async fn delete_by_id(&self, id: MaintenanceId) -> Result<()> {
        self.store.delete_by_id(id).await
    }

    pub async fn mark_completed(
        &self,
        id: MaintenanceId,
        is_completed: bool,
        completed_date: Option<i64>,
    ) -> Result<()> {
        self.store
            .mark_completed(id, is_completed, completed_date)
            .await
    }
}
