// Expense State Holder

use super::{Activity, Observable, Subscription};
use crate::application::repository::ExpenseRepository;
use crate::domain::{ExpenseId, ExpenseRecord, ExpenseSummary, VehicleId};
use crate::error::Result;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Expenses of the loaded vehicle plus the derived summary
///
/// The summary (total, per-category and per-year sums) is re-read on load and
/// after every write issued through this holder. Writes made elsewhere reach
/// `expenses` through the live subscription but not `summary` until the next
/// refresh.
///
/// A write that commits succeeds even when the summary refresh after it fails;
/// the refresh failure lands in `activity.last_error` and `summary` keeps its
/// previous value.
pub struct ExpenseState {
    repository: ExpenseRepository,
    pub expenses: Observable<Vec<ExpenseRecord>>,
    pub selected: Observable<Option<ExpenseRecord>>,
    pub summary: Observable<ExpenseSummary>,
    /// Latest result of [`ExpenseState::load_total_for_date_range`]
    pub range_total: Observable<Option<f64>>,
    pub activity: Activity,
    subscription: Mutex<Option<Subscription>>,
}

impl ExpenseState {
    pub fn new(repository: ExpenseRepository) -> Self {
        Self {
            repository,
            expenses: Observable::default(),
            selected: Observable::default(),
            summary: Observable::default(),
            range_total: Observable::default(),
            activity: Activity::default(),
            subscription: Mutex::new(None),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.activity.is_loading.get()
    }

    /// Follow the expenses of `vehicle_id` and load its summary
    pub async fn load_for_vehicle(&self, vehicle_id: VehicleId) -> Result<()> {
        debug!(vehicle_id, "Loading expenses");
        let subscription = Subscription::forward(
            "expenses_by_vehicle",
            self.repository.observe_by_vehicle(vehicle_id),
            self.expenses.clone(),
            self.activity.clone(),
        );
        *self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);

        self.refresh_summary(vehicle_id).await.inspect_err(|e| {
            self.activity.record_error("load_expense_summary", e.to_string());
        })
    }

    pub async fn insert(&self, expense: ExpenseRecord) -> Result<ExpenseId> {
        let id = self
            .activity
            .track("insert_expense", self.repository.insert(&expense))
            .await?;
        self.refresh_after_write(expense.vehicle_id).await;
        Ok(id)
    }

    pub async fn update(&self, expense: ExpenseRecord) -> Result<()> {
        self.activity
            .track("update_expense", self.repository.update(&expense))
            .await?;
        self.refresh_after_write(expense.vehicle_id).await;
        Ok(())
    }

    pub async fn delete(&self, expense: ExpenseRecord) -> Result<()> {
        self.activity
            .track("delete_expense", self.repository.delete(&expense))
            .await?;
        self.refresh_after_write(expense.vehicle_id).await;
        Ok(())
    }

    pub async fn select(&self, id: ExpenseId) -> Result<()> {
        match self.repository.find_by_id(id).await {
            Ok(expense) => {
                self.selected.set(expense);
                Ok(())
            }
            Err(e) => {
                self.activity.record_error("select_expense", e.to_string());
                Err(e)
            }
        }
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
    }

    /// Sum spent within `[start, end]`, also published to `range_total`
    pub async fn load_total_for_date_range(
        &self,
        vehicle_id: VehicleId,
        start: i64,
        end: i64,
    ) -> Result<f64> {
        let total = self
            .repository
            .total_for_date_range(vehicle_id, start, end)
            .await?;
        self.range_total.set(Some(total));
        Ok(total)
    }

    /// Refresh following a committed write; failures are only recorded
    async fn refresh_after_write(&self, vehicle_id: VehicleId) {
        if let Err(e) = self.refresh_summary(vehicle_id).await {
            self.activity
                .record_error("refresh_expense_summary", e.to_string());
        }
    }

    /// Re-read total, category and yearly sums of a vehicle
    async fn refresh_summary(&self, vehicle_id: VehicleId) -> Result<()> {
        let (total, by_category, by_year) = tokio::try_join!(
            self.repository.total_for_vehicle(vehicle_id),
            self.repository.totals_by_category(vehicle_id),
            self.repository.totals_by_year(vehicle_id),
        )?;

        self.summary.set(ExpenseSummary {
            total,
            by_category,
            by_year,
        });
        Ok(())
    }
}
