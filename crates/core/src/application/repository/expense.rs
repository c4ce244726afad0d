// Expense Repository

use crate::domain::{CategoryTotal, ExpenseId, ExpenseRecord, VehicleId, YearlyTotal};
use crate::error::Result;
use crate::port::{ExpenseStore, LiveQuery};
use std::sync::Arc;

#[derive(Clone)]
pub struct ExpenseRepository {
    store: Arc<dyn ExpenseStore>,
}

impl ExpenseRepository {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<ExpenseRecord>> {
        self.store.observe_by_vehicle(vehicle_id)
    }

    pub fn observe_by_category(
        &self,
        vehicle_id: VehicleId,
        category: &str,
    ) -> LiveQuery<Vec<ExpenseRecord>> {
        self.store.observe_by_category(vehicle_id, category)
    }

    pub fn observe_by_date_range(
        &self,
        vehicle_id: VehicleId,
        start: i64,
        end: i64,
    ) -> LiveQuery<Vec<ExpenseRecord>> {
        self.store.observe_by_date_range(vehicle_id, start, end)
    }

    pub async fn find_by_id(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>> {
        self.store.find_by_id(id).await
    }

    /// Total spent on a vehicle, 0 when it has no expenses
    pub async fn total_for_vehicle(&self, vehicle_id: VehicleId) -> Result<f64> {
        Ok(self
            .store
            .total_for_vehicle(vehicle_id)
            .await?
            .unwrap_or(0.0))
    }

    /// Total spent within `[start, end]`, 0 when nothing matches
    pub async fn total_for_date_range(
        &self,
        vehicle_id: VehicleId,
        start: i64,
        end: i64,
    ) -> Result<f64> {
        Ok(self
            .store
            .total_for_date_range(vehicle_id, start, end)
            .await?
            .unwrap_or(0.0))
    }

    pub async fn totals_by_category(&self, vehicle_id: VehicleId) -> Result<Vec<CategoryTotal>> {
        self.store.totals_by_category(vehicle_id).await
    }

    pub async fn totals_by_year(&self, vehicle_id: VehicleId) -> Result<Vec<YearlyTotal>> {
        self.store.totals_by_year(vehicle_id).await
    }

    pub async fn insert(&self, expense: &ExpenseRecord) -> Result<ExpenseId> {
        self.store.insert(expense).await
    }

    pub async fn update(&self, expense: &ExpenseRecord) -> Result<()> {
        self.store.update(expense).await
    }

    pub async fn delete(&self, expense: &ExpenseRecord) -> Result<()> {
        self.store.delete_by_id(expense.id).await
    }

    pub async fn delete_by_id(&self, id: ExpenseId) -> Result<()> {
        self.store.delete_by_id(id).await
    }
}
