// sqlx::Error -> AppError mapping

use autocare_core::error::AppError;

/// Convert sqlx::Error to AppError with structured information
///
/// Constraint failures become `AppError::Constraint`; everything else
/// (busy, full, I/O, pool, protocol) is a storage error.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extended SQLite result codes: https://www.sqlite.org/rescode.html
            let Some(code) = db_err.code() else {
                return AppError::Database(format!("Database error: {}", db_err.message()));
            };
            let code_str = code.as_ref();

            match code_str {
                "787" | "3850" => AppError::Constraint(format!(
                    "Foreign key constraint violation: {} ({})",
                    db_err.message(),
                    code_str
                )),
                "1555" | "2067" => AppError::Constraint(format!(
                    "Unique constraint violation: {} ({})",
                    db_err.message(),
                    code_str
                )),
                "275" => AppError::Constraint(format!(
                    "Check constraint violation: {} ({})",
                    db_err.message(),
                    code_str
                )),
                "1299" => AppError::Constraint(format!(
                    "Not null constraint violation: {} ({})",
                    db_err.message(),
                    code_str
                )),
                "19" => AppError::Constraint(format!(
                    "Constraint violation: {} ({})",
                    db_err.message(),
                    code_str
                )),
                "5" => AppError::Database(format!(
                    "Database locked (SQLITE_BUSY): {}",
                    db_err.message()
                )),
                "13" => AppError::Database(format!("Database full: {}", db_err.message())),
                _ => AppError::Database(format!(
                    "Database error [{}]: {}",
                    code_str,
                    db_err.message()
                )),
            }
        }
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        sqlx::Error::Io(io_err) => AppError::Database(format!("Storage unavailable: {}", io_err)),
        // Connection, pool, protocol errors
        _ => AppError::Database(err.to_string()),
    }
}
