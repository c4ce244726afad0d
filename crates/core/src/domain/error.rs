// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown expense category: {0}")]
    UnknownCategory(String),

    #[error("Unknown maintenance type: {0}")]
    UnknownMaintenanceType(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
