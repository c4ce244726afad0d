// SQLite ExpenseStore Implementation

use crate::error::map_sqlx_error;
use crate::Database;
use async_trait::async_trait;
use autocare_core::domain::{
    CategoryTotal, ExpenseId, ExpenseRecord, VehicleId, YearlyTotal, UNASSIGNED_ID,
    UNSET_TIMESTAMP,
};
use autocare_core::error::{AppError, Result};
use autocare_core::port::{ExpenseStore, LiveQuery, Table, TimeProvider};
use futures::FutureExt;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct SqliteExpenseStore {
    db: Database,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteExpenseStore {
    pub fn new(db: Database, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self { db, time_provider }
    }

    fn observe(&self, filter: ExpenseFilter) -> LiveQuery<Vec<ExpenseRecord>> {
        let pool = self.db.pool().clone();
        LiveQuery::spawn(Table::Expenses, self.db.subscribe(), move || {
            fetch(pool.clone(), filter.clone()).boxed()
        })
    }
}

#[async_trait]
impl ExpenseStore for SqliteExpenseStore {
    async fn insert(&self, expense: &ExpenseRecord) -> Result<ExpenseId> {
        let id = (expense.id != UNASSIGNED_ID).then_some(expense.id);
        let created_at = if expense.created_at == UNSET_TIMESTAMP {
            self.time_provider.now_millis()
        } else {
            expense.created_at
        };

        let result = sqlx::query(
            r#"
            INSERT INTO expenses (
                id, vehicle_id, category, amount, description,
                date, location, odometer, notes, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(expense.vehicle_id)
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(&expense.description)
        .bind(expense.date)
        .bind(&expense.location)
        .bind(expense.odometer)
        .bind(&expense.notes)
        .bind(created_at)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        self.db.notify(&[Table::Expenses]);
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, expense: &ExpenseRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET vehicle_id = ?, category = ?, amount = ?, description = ?,
                date = ?, location = ?, odometer = ?, notes = ?, created_at = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.vehicle_id)
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(&expense.description)
        .bind(expense.date)
        .bind(&expense.location)
        .bind(expense.odometer)
        .bind(&expense.notes)
        .bind(expense.created_at)
        .bind(expense.id)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Expense {} not found", expense.id)));
        }

        self.db.notify(&[Table::Expenses]);
        Ok(())
    }

    async fn delete_by_id(&self, id: ExpenseId) -> Result<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            self.db.notify(&[Table::Expenses]);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>> {
        let row = sqlx::query_as::<_, ExpenseRow>("SELECT * FROM expenses WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ExpenseRow::into_record))
    }

    fn observe_by_vehicle(&self, vehicle_id: VehicleId) -> LiveQuery<Vec<ExpenseRecord>> {
        self.observe(ExpenseFilter::Vehicle(vehicle_id))
    }

    fn observe_by_category(
        &self,
        vehicle_id: VehicleId,
        category: &str,
    ) -> LiveQuery<Vec<ExpenseRecord>> {
        self.observe(ExpenseFilter::Category(vehicle_id, category.to_string()))
    }

    fn observe_by_date_range(
        &self,
        vehicle_id: VehicleId,
        start: i64,
        end: i64,
    ) -> LiveQuery<Vec<ExpenseRecord>> {
        self.observe(ExpenseFilter::DateRange(vehicle_id, start, end))
    }

    async fn total_for_vehicle(&self, vehicle_id: VehicleId) -> Result<Option<f64>> {
        sqlx::query_scalar("SELECT SUM(amount) FROM expenses WHERE vehicle_id = ?")
            .bind(vehicle_id)
            .fetch_one(self.db.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn total_for_date_range(
        &self,
        vehicle_id: VehicleId,
        start: i64,
        end: i64,
    ) -> Result<Option<f64>> {
        sqlx::query_scalar(
            r#"
            SELECT SUM(amount) FROM expenses
            WHERE vehicle_id = ? AND date BETWEEN ? AND ?
            "#,
        )
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .fetch_one(self.db.pool())
        .await
        .map_err(map_sqlx_error)
    }

    async fn totals_by_category(&self, vehicle_id: VehicleId) -> Result<Vec<CategoryTotal>> {
        let rows: Vec<CategoryTotalRow> = sqlx::query_as(
            r#"
            SELECT category, SUM(amount) AS total
            FROM expenses
            WHERE vehicle_id = ?
            GROUP BY category
            ORDER BY total DESC, category ASC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| CategoryTotal {
                category: row.category,
                total: row.total,
            })
            .collect())
    }

    async fn totals_by_year(&self, vehicle_id: VehicleId) -> Result<Vec<YearlyTotal>> {
        // Dates are epoch milliseconds; years are taken in UTC. Real division
        // keeps pre-1970 instants from being truncated into the next second.
        let rows: Vec<YearlyTotalRow> = sqlx::query_as(
            r#"
            SELECT CAST(strftime('%Y', date / 1000.0, 'unixepoch') AS INTEGER) AS year,
                   SUM(amount) AS total
            FROM expenses
            WHERE vehicle_id = ?
            GROUP BY year
            ORDER BY year DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                let year = row.year.ok_or_else(|| {
                    AppError::Database(format!(
                        "Expense date outside the bucketable range for vehicle {vehicle_id}"
                    ))
                })?;
                Ok(YearlyTotal {
                    year,
                    total: row.total,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
enum ExpenseFilter {
    Vehicle(VehicleId),
    Category(VehicleId, String),
    /// Inclusive on both ends
    DateRange(VehicleId, i64, i64),
}

async fn fetch(pool: SqlitePool, filter: ExpenseFilter) -> Result<Vec<ExpenseRecord>> {
    let rows: Vec<ExpenseRow> = match filter {
        ExpenseFilter::Vehicle(vehicle_id) => {
            sqlx::query_as(
                "SELECT * FROM expenses WHERE vehicle_id = ? ORDER BY date DESC, id DESC",
            )
            .bind(vehicle_id)
            .fetch_all(&pool)
            .await
        }
        ExpenseFilter::Category(vehicle_id, category) => {
            sqlx::query_as(
                r#"
                SELECT * FROM expenses
                WHERE vehicle_id = ? AND category = ?
                ORDER BY date DESC, id DESC
                "#,
            )
            .bind(vehicle_id)
            .bind(category)
            .fetch_all(&pool)
            .await
        }
        ExpenseFilter::DateRange(vehicle_id, start, end) => {
            sqlx::query_as(
                r#"
                SELECT * FROM expenses
                WHERE vehicle_id = ? AND date BETWEEN ? AND ?
                ORDER BY date DESC, id DESC
                "#,
            )
            .bind(vehicle_id)
            .bind(start)
            .bind(end)
            .fetch_all(&pool)
            .await
        }
    }
    .map_err(map_sqlx_error)?;

    Ok(rows.into_iter().map(ExpenseRow::into_record).collect())
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct ExpenseRow {
    id: i64,
    vehicle_id: i64,
    category: String,
    amount: f64,
    description: String,
    date: i64,
    location: String,
    odometer: i64,
    notes: String,
    created_at: i64,
}

impl ExpenseRow {
    fn into_record(self) -> ExpenseRecord {
        ExpenseRecord {
            id: self.id,
            vehicle_id: self.vehicle_id,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date,
            location: self.location,
            odometer: self.odometer,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryTotalRow {
    category: String,
    total: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct YearlyTotalRow {
    year: Option<i32>, // NULL when strftime cannot format the date
    total: f64,
}
