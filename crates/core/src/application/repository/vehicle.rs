// Vehicle Repository

use crate::domain::{Vehicle, VehicleId};
use crate::error::Result;
use crate::port::{LiveQuery, VehicleStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct VehicleRepository {
    store: Arc<dyn VehicleStore>,
}

impl VehicleRepository {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    pub fn observe_all(&self) -> LiveQuery<Vec<Vehicle>> {
        self.store.observe_all()
    }

    pub async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>> {
        self.store.find_by_id(id).await
    }

    pub async fn insert(&self, vehicle: &Vehicle) -> Result<VehicleId> {
        self.store.insert(vehicle).await
    }

    pub async fn update(&self, vehicle: &Vehicle) -> Result<()> {
        self.store.update(vehicle).await
    }

    pub async fn delete(&self, vehicle: &Vehicle) -> Result<()> {
        self.store.delete_by_id(vehicle.id).await
    }

    pub async fn delete_by_id(&self, id: VehicleId) -> Result<()> {
        self.store.delete_by_id(id).await
    }
}
