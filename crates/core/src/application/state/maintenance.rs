// Maintenance State Holder

use super::{Activity, Observable, Subscription};
use crate::application::repository::MaintenanceRepository;
use crate::domain::{MaintenanceId, MaintenanceRecord, VehicleId};
use crate::error::Result;
use crate::port::TimeProvider;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Maintenance records of the loaded vehicle, overdue list and selection
pub struct MaintenanceState {
    repository: MaintenanceRepository,
    time_provider: Arc<dyn TimeProvider>,
    pub records: Observable<Vec<MaintenanceRecord>>,
    pub overdue: Observable<Vec<MaintenanceRecord>>,
    pub selected: Observable<Option<MaintenanceRecord>>,
    pub activity: Activity,
    records_subscription: Mutex<Option<Subscription>>,
    overdue_subscription: Mutex<Option<Subscription>>,
}

impl MaintenanceState {
    pub fn new(repository: MaintenanceRepository, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            repository,
            time_provider,
            records: Observable::default(),
            overdue: Observable::default(),
            selected: Observable::default(),
            activity: Activity::default(),
            records_subscription: Mutex::new(None),
            overdue_subscription: Mutex::new(None),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.activity.is_loading.get()
    }

    /// Follow the records of `vehicle_id`, replacing any earlier subscription
    pub fn load_for_vehicle(&self, vehicle_id: VehicleId) {
        debug!(vehicle_id, "Loading maintenance records");
        let subscription = Subscription::forward(
            "maintenance_by_vehicle",
            self.repository.observe_by_vehicle(vehicle_id),
            self.records.clone(),
            self.activity.clone(),
        );
        replace(&self.records_subscription, subscription);
    }

    /// Follow every incomplete record scheduled at or before the current time
    ///
    /// The cut-off is taken once, when this is called.
    pub fn load_overdue(&self) {
        let now = self.time_provider.now_millis();
        let subscription = Subscription::forward(
            "maintenance_overdue",
            self.repository.observe_overdue(now),
            self.overdue.clone(),
            self.activity.clone(),
        );
        replace(&self.overdue_subscription, subscription);
    }

    pub async fn insert(&self, record: MaintenanceRecord) -> Result<MaintenanceId> {
        self.activity
            .track("insert_maintenance", self.repository.insert(&record))
            .await
    }

    pub async fn update(&self, record: MaintenanceRecord) -> Result<()> {
        self.activity
            .track("update_maintenance", self.repository.update(&record))
            .await
    }

    pub async fn delete(&self, record: MaintenanceRecord) -> Result<()> {
        self.activity
            .track("delete_maintenance", self.repository.delete(&record))
            .await
    }

    /// Set or clear the completion of a record
    ///
    /// The completion date is "now" when completing and cleared otherwise.
    /// Local lists are left to the live subscription.
    pub async fn mark_completed(&self, id: MaintenanceId, is_completed: bool) -> Result<()> {
        let completed_date = is_completed.then(|| self.time_provider.now_millis());
        self.activity
            .track(
                "mark_maintenance_completed",
                self.repository
                    .mark_completed(id, is_completed, completed_date),
            )
            .await
    }

    /// Load a record into `selected` (`None` when absent)
    pub async fn select(&self, id: MaintenanceId) -> Result<()> {
        match self.repository.find_by_id(id).await {
            Ok(record) => {
                self.selected.set(record);
                Ok(())
            }
            Err(e) => {
                self.activity
                    .record_error("select_maintenance", e.to_string());
                Err(e)
            }
        }
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
    }
}

fn replace(slot: &Mutex<Option<Subscription>>, subscription: Subscription) {
    // Dropping the previous subscription cancels it
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(subscription);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::maintenance_store::MockMaintenanceStore;
    use crate::port::time_provider::FixedTimeProvider;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_mark_completed_stamps_now_only_when_completing() {
        let mut store = MockMaintenanceStore::new();
        store
            .expect_mark_completed()
            .with(eq(4), eq(true), eq(Some(1_700_000_000_000)))
            .times(1)
            .returning(|_, _, _| Ok(()));
        store
            .expect_mark_completed()
            .with(eq(4), eq(false), eq(None))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let state = MaintenanceState::new(
            MaintenanceRepository::new(Arc::new(store)),
            Arc::new(FixedTimeProvider(1_700_000_000_000)),
        );

        state.mark_completed(4, true).await.unwrap();
        state.mark_completed(4, false).await.unwrap();
        assert!(!state.is_loading());
    }
}
