// Expense Store Port (Interface)

use crate::domain::{CategoryTotal, ExpenseId, ExpenseRecord, VehicleId, YearlyTotal};
use crate::error::Result;
use crate::port::LiveQuery;
use async_trait::async_trait;

/// Persistence interface for expenses and their aggregates
///
/// Date ranges are inclusive on both ends. Sums are `None` when no row matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Insert an expense and return its id
    async fn insert(&self, expense: &ExpenseRecord) -> Result<ExpenseId>;

    /// Replace the stored expense with the same id (`NotFound` if absent)
    async fn update(&self, expense: &ExpenseRecord) -> Result<()>;

    /// Delete by id; absent ids are ignored
    async fn delete_by_id(&self, id: ExpenseId) -> Result<()>;

    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>>;

    /// Expenses of a vehicle, date descending
    fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<ExpenseRecord>>;

    /// Expenses of a vehicle in one category, date descending
    fn observe_by_category(
        &self,
        vehicle_id: VehicleId,
        category: &str,
    ) -> LiveQuery<Vec<ExpenseRecord>>;

    /// Expenses of a vehicle dated within `[start, end]`, date descending
    fn observe_by_date_range(
        &self,
        vehicle_id: VehicleId,
        start: i64,
        end: i64,
    ) -> LiveQuery<Vec<ExpenseRecord>>;

    /// Sum of all amounts of a vehicle
    async fn total_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Option<f64>>;

    /// Sum of amounts of a vehicle dated within `[start, end]`
    async fn total_for_date_range(
        &self,
        vehicle_id: VehicleId,
        start: i64,
        end: i64,
    ) -> Result<Option<f64>>;

    /// Sums per category, largest sum first
    async fn totals_by_category(&self, vehicle_id: VehicleId) -> Result<Vec<CategoryTotal>>;

    /// Sums per calendar year (UTC), most recent year first
    async fn totals_by_year(&self, vehicle_id: VehicleId) -> Result<Vec<YearlyTotal>>;
}
