// Maintenance Domain Model

use super::error::DomainError;
use super::vehicle::VehicleId;
use super::{UNASSIGNED_ID, UNSET_TIMESTAMP};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maintenance record ID
pub type MaintenanceId = i64;

/// Scheduled or completed service on a vehicle
///
/// `completed_date` is expected to be set exactly when `is_completed` is true.
/// The pairing is advisory: [`MaintenanceRecord::complete`] and
/// [`MaintenanceRecord::reopen`] maintain it, but whole-record updates and the
/// store's mark-completed operation accept any combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: MaintenanceId,
    pub vehicle_id: VehicleId,
    pub service_type: String,
    pub description: String,
    pub scheduled_date: i64, // epoch ms
    pub completed_date: Option<i64>,
    pub cost: f64, // >= 0
    pub mileage: i64,
    pub mechanic_name: String,
    pub notes: String,
    pub is_completed: bool,
    pub created_at: i64, // epoch ms
}

impl MaintenanceRecord {
    /// Create an unsaved, pending record
    pub fn new(
        vehicle_id: VehicleId,
        service_type: impl Into<String>,
        description: impl Into<String>,
        scheduled_date: i64,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            vehicle_id,
            service_type: service_type.into(),
            description: description.into(),
            scheduled_date,
            completed_date: None,
            cost: 0.0,
            mileage: 0,
            mechanic_name: String::new(),
            notes: String::new(),
            is_completed: false,
            created_at: UNSET_TIMESTAMP,
        }
    }

    /// Not completed and scheduled at or before `now_millis`
    ///
    /// Same predicate as the store's overdue query.
    pub fn is_overdue(&self, now_millis: i64) -> bool {
        !self.is_completed && self.scheduled_date <= now_millis
    }

    /// Mark as completed with explicit timestamp
    pub fn complete(&mut self, now_millis: i64) {
        self.is_completed = true;
        self.completed_date = Some(now_millis);
    }

    /// Back to pending; clears the completion date
    pub fn reopen(&mut self) {
        self.is_completed = false;
        self.completed_date = None;
    }
}

/// Service types offered by the entry form
///
/// Storage keeps free text; this set only helps callers pick a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    OilChange,
    TireRotation,
    BrakeService,
    EngineService,
    TransmissionService,
    AirFilterChange,
    SparkPlugReplacement,
    BatteryCheck,
    Inspection,
    GeneralService,
    Other,
}

impl MaintenanceType {
    pub const ALL: [MaintenanceType; 11] = [
        MaintenanceType::OilChange,
        MaintenanceType::TireRotation,
        MaintenanceType::BrakeService,
        MaintenanceType::EngineService,
        MaintenanceType::TransmissionService,
        MaintenanceType::AirFilterChange,
        MaintenanceType::SparkPlugReplacement,
        MaintenanceType::BatteryCheck,
        MaintenanceType::Inspection,
        MaintenanceType::GeneralService,
        MaintenanceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceType::OilChange => "Oil Change",
            MaintenanceType::TireRotation => "Tire Rotation",
            MaintenanceType::BrakeService => "Brake Service",
            MaintenanceType::EngineService => "Engine Service",
            MaintenanceType::TransmissionService => "Transmission Service",
            MaintenanceType::AirFilterChange => "Air Filter Change",
            MaintenanceType::SparkPlugReplacement => "Spark Plug Replacement",
            MaintenanceType::BatteryCheck => "Battery Check",
            MaintenanceType::Inspection => "Inspection",
            MaintenanceType::GeneralService => "General Service",
            MaintenanceType::Other => "Other",
        }
    }
}

impl std::fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaintenanceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownMaintenanceType(s.to_string()))
    }
}
