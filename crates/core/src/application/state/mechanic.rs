// Mechanic State Holder

use super::{Activity, Observable, Subscription};
use crate::application::repository::MechanicRepository;
use crate::domain::{Mechanic, MechanicId, VehicleId};
use crate::error::Result;
use std::sync::{Mutex, PoisonError};

/// Mechanics of the loaded vehicle and the selected mechanic
pub struct MechanicState {
    repository: MechanicRepository,
    pub mechanics: Observable<Vec<Mechanic>>,
    pub selected: Observable<Option<Mechanic>>,
    pub activity: Activity,
    subscription: Mutex<Option<Subscription>>,
}

impl MechanicState {
    pub fn new(repository: MechanicRepository) -> Self {
        Self {
            repository,
            mechanics: Observable::default(),
            selected: Observable::default(),
            activity: Activity::default(),
            subscription: Mutex::new(None),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.activity.is_loading.get()
    }

    pub fn load_for_vehicle(&self, vehicle_id: VehicleId) {
        let subscription = Subscription::forward(
            "mechanics_by_vehicle",
            self.repository.observe_by_vehicle(vehicle_id),
            self.mechanics.clone(),
            self.activity.clone(),
        );
        *self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);
    }

    pub async fn insert(&self, mechanic: Mechanic) -> Result<MechanicId> {
        self.activity
            .track("insert_mechanic", self.repository.insert(&mechanic))
            .await
    }

    pub async fn update(&self, mechanic: Mechanic) -> Result<()> {
        self.activity
            .track("update_mechanic", self.repository.update(&mechanic))
            .await
    }

    pub async fn delete(&self, mechanic: Mechanic) -> Result<()> {
        self.activity
            .track("delete_mechanic", self.repository.delete(&mechanic))
            .await
    }

    pub async fn select(&self, id: MechanicId) -> Result<()> {
        match self.repository.find_by_id(id).await {
            Ok(mechanic) => {
                self.selected.set(mechanic);
                Ok(())
            }
            Err(e) => {
                self.activity.record_error("select_mechanic", e.to_string());
                Err(e)
            }
        }
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
    }
}
