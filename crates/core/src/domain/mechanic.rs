// Mechanic Domain Model

use super::vehicle::VehicleId;
use super::{UNASSIGNED_ID, UNSET_TIMESTAMP};
use serde::{Deserialize, Serialize};

/// Mechanic ID
pub type MechanicId = i64;

/// Preferred mechanic, owned by a single vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mechanic {
    pub id: MechanicId,
    pub vehicle_id: VehicleId,
    pub name: String,
    pub phone: String,
    pub service_center: Option<String>,
    pub notes: String,
    pub created_at: i64, // epoch ms
}

impl Mechanic {
    pub fn new(vehicle_id: VehicleId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            vehicle_id,
            name: name.into(),
            phone: phone.into(),
            service_center: None,
            notes: String::new(),
            created_at: UNSET_TIMESTAMP,
        }
    }

    pub fn with_service_center(mut self, service_center: impl Into<String>) -> Self {
        self.service_center = Some(service_center.into());
        self
    }
}
