// Expense Domain Model

use super::error::DomainError;
use super::vehicle::VehicleId;
use super::{UNASSIGNED_ID, UNSET_TIMESTAMP};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Expense record ID
pub type ExpenseId = i64;

/// Money spent on a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub vehicle_id: VehicleId,
    pub category: String, // free text, see ExpenseCategory
    pub amount: f64,      // >= 0
    pub description: String,
    pub date: i64, // epoch ms, UTC
    pub location: String,
    pub odometer: i64, // >= 0
    pub notes: String,
    pub created_at: i64, // epoch ms
}

impl ExpenseRecord {
    /// Create an unsaved expense
    pub fn new(
        vehicle_id: VehicleId,
        category: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        date: i64,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            vehicle_id,
            category: category.into(),
            amount,
            description: description.into(),
            date,
            location: String::new(),
            odometer: 0,
            notes: String::new(),
            created_at: UNSET_TIMESTAMP,
        }
    }
}

/// Categories offered by the entry form
///
/// Open set: storage accepts any label, so grouping queries may return
/// categories that do not parse into this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Fuel,
    Maintenance,
    Insurance,
    Repairs,
    Registration,
    Parking,
    Tolls,
    CarWash,
    Accessories,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::Fuel,
        ExpenseCategory::Maintenance,
        ExpenseCategory::Insurance,
        ExpenseCategory::Repairs,
        ExpenseCategory::Registration,
        ExpenseCategory::Parking,
        ExpenseCategory::Tolls,
        ExpenseCategory::CarWash,
        ExpenseCategory::Accessories,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Fuel => "Fuel",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Repairs => "Repairs",
            ExpenseCategory::Registration => "Registration",
            ExpenseCategory::Parking => "Parking",
            ExpenseCategory::Tolls => "Tolls",
            ExpenseCategory::CarWash => "Car Wash",
            ExpenseCategory::Accessories => "Accessories",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}

/// Sum of amounts for one category of one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Sum of amounts for one calendar year (UTC) of one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub total: f64,
}

/// Derived figures shown on the expense screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: f64,
    /// Ordered by total, largest first
    pub by_category: Vec<CategoryTotal>,
    /// Ordered by year, most recent first
    pub by_year: Vec<YearlyTotal>,
}

impl ExpenseSummary {
    pub fn category_total(&self, category: &str) -> f64 {
        self.by_category
            .iter()
            .find(|c| c.category == category)
            .map_or(0.0, |c| c.total)
    }

    pub fn year_total(&self, year: i32) -> f64 {
        self.by_year
            .iter()
            .find(|y| y.year == year)
            .map_or(0.0, |y| y.total)
    }

    /// Fraction of the overall total spent in `category`, 0 when nothing was spent
    pub fn category_share(&self, category: &str) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        self.category_total(category) / self.total
    }
}
