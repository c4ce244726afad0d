// Mechanic Repository

use crate::domain::{Mechanic, MechanicId, VehicleId};
use crate::error::Result;
use crate::port::{LiveQuery, MechanicStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct MechanicRepository {
    store: Arc<dyn MechanicStore>,
}

impl MechanicRepository {
    pub fn new(store: Arc<dyn MechanicStore>) -> Self {
        Self { store }
    }

    pub fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<Mechanic>> {
        self.store.observe_by_vehicle(vehicle_id)
    }

    pub async fn find_by_id(&self, id: MechanicId) -> Result<Option<Mechanic>> {
        self.store.find_by_id(id).await
    }

    pub async fn insert(&self, mechanic: &Mechanic) -> Result<MechanicId> {
        self.store.insert(mechanic).await
    }

    pub async fn update(&self, mechanic: &Mechanic) -> Result<()> {
        self.store.update(mechanic).await
    }

    pub async fn delete(&self, mechanic: &Mechanic) -> Result<()> {
        self.store.delete_by_id(mechanic.id).await
    }

    pub async fn delete_by_id(&self, id: MechanicId) -> Result<()> {
        self.store.delete_by_id(id).await
    }
}
