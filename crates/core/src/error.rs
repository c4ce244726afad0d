// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage unavailable, I/O failure inside the engine, or any other
    /// database error that is not a constraint violation
    #[error("Database error: {0}")]
    Database(String),

    /// Foreign key, uniqueness, CHECK or NOT NULL violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for errors raised by the schema rejecting a write
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, AppError::Constraint(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by mapping SQLite result codes onto Database / Constraint
