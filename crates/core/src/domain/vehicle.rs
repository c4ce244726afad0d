// Vehicle Domain Model

use super::{UNASSIGNED_ID, UNSET_TIMESTAMP};
use serde::{Deserialize, Serialize};

/// Vehicle ID (assigned by the store, monotonically increasing)
pub type VehicleId = i64;

/// Root entity. Deleting a vehicle removes every maintenance record, expense
/// and mechanic that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub registration: String,
    pub color: Option<String>,
    pub mileage: Option<i64>, // >= 0
    pub image_uri: Option<String>,
    pub created_at: i64, // epoch ms
}

impl Vehicle {
    /// Create an unsaved vehicle
    ///
    /// The id and creation timestamp are filled in by the store on insert
    /// unless set explicitly with [`Vehicle::with_id`] / [`Vehicle::with_created_at`].
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        registration: impl Into<String>,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            make: make.into(),
            model: model.into(),
            year,
            registration: registration.into(),
            color: None,
            mileage: None,
            image_uri: None,
            created_at: UNSET_TIMESTAMP,
        }
    }

    pub fn with_id(mut self, id: VehicleId) -> Self {
        self.id = id;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_mileage(mut self, mileage: i64) -> Self {
        self.mileage = Some(mileage);
        self
    }

    pub fn with_image_uri(mut self, uri: impl Into<String>) -> Self {
        self.image_uri = Some(uri.into());
        self
    }

    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Label shown in lists, e.g. "2019 Toyota Corolla"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vehicle_is_unsaved() {
        let vehicle = Vehicle::new("Toyota", "Corolla", 2019, "ABC-123");
        assert_eq!(vehicle.id, UNASSIGNED_ID);
        assert_eq!(vehicle.created_at, UNSET_TIMESTAMP);
        assert!(vehicle.color.is_none());
        assert!(vehicle.mileage.is_none());
        assert_eq!(vehicle.display_name(), "2019 Toyota Corolla");
    }
}
