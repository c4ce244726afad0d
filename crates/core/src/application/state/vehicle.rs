// Vehicle State Holder

use super::{Activity, Observable, Subscription};
use crate::application::repository::VehicleRepository;
use crate::domain::{Vehicle, VehicleId};
use crate::error::Result;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Vehicle list, loading flag and selected vehicle
///
/// Subscribes to the vehicle list on construction, so it must be created
/// inside a Tokio runtime. A failed list fetch ends the subscription and
/// leaves the last list in place; [`VehicleState::reload`] starts a new one.
pub struct VehicleState {
    repository: VehicleRepository,
    pub vehicles: Observable<Vec<Vehicle>>,
    pub selected: Observable<Option<Vehicle>>,
    pub activity: Activity,
    subscription: Mutex<Option<Subscription>>,
}

impl VehicleState {
    pub fn new(repository: VehicleRepository) -> Self {
        let state = Self {
            repository,
            vehicles: Observable::default(),
            selected: Observable::default(),
            activity: Activity::default(),
            subscription: Mutex::new(None),
        };
        state.reload();
        state
    }

    /// Resubscribe to the vehicle list, replacing the current subscription
    pub fn reload(&self) {
        debug!("Subscribing to vehicle list");
        let subscription = Subscription::forward(
            "vehicles",
            self.repository.observe_all(),
            self.vehicles.clone(),
            self.activity.clone(),
        );
        // Dropping the previous subscription cancels it
        *self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);
    }

    /// Whether the list still follows store changes
    pub fn is_following(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|subscription| !subscription.is_finished())
    }

    pub fn is_loading(&self) -> bool {
        self.activity.is_loading.get()
    }

    pub async fn insert(&self, vehicle: Vehicle) -> Result<VehicleId> {
        self.activity
            .track("insert_vehicle", self.repository.insert(&vehicle))
            .await
    }

    pub async fn update(&self, vehicle: Vehicle) -> Result<()> {
        self.activity
            .track("update_vehicle", self.repository.update(&vehicle))
            .await
    }

    pub async fn delete(&self, vehicle: Vehicle) -> Result<()> {
        self.activity
            .track("delete_vehicle", self.repository.delete(&vehicle))
            .await
    }

    /// Load a vehicle into `selected` (`None` when absent)
    pub async fn select(&self, id: VehicleId) -> Result<()> {
        match self.repository.find_by_id(id).await {
            Ok(vehicle) => {
                self.selected.set(vehicle);
                Ok(())
            }
            Err(e) => {
                self.activity.record_error("select_vehicle", e.to_string());
                Err(e)
            }
        }
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
    }
}
