// Loading flag and error cell shared by every holder

use super::Observable;
use crate::error::Result;
use std::future::Future;
use tracing::warn;

/// Sets a loading flag on creation and clears it when dropped
///
/// Dropping covers success, error and a cancelled future alike.
pub struct LoadingGuard<'a> {
    flag: &'a Observable<bool>,
}

impl<'a> LoadingGuard<'a> {
    pub fn acquire(flag: &'a Observable<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// `is_loading` / `last_error` pair of a state holder
#[derive(Clone, Default)]
pub struct Activity {
    pub is_loading: Observable<bool>,
    /// Message of the latest failed operation; cleared by the next successful write
    pub last_error: Observable<Option<String>>,
}

impl Activity {
    /// Run a write with the loading flag raised
    ///
    /// The error is recorded in `last_error` and still returned to the caller.
    pub async fn track<T, F>(&self, operation: &'static str, write: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let _loading = LoadingGuard::acquire(&self.is_loading);
        match write.await {
            Ok(value) => {
                self.last_error.set(None);
                Ok(value)
            }
            Err(e) => {
                warn!(operation, error = %e, "Operation failed");
                self.last_error.set(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Record a failure that happened outside `track` (reads, subscriptions)
    pub fn record_error(&self, operation: &'static str, message: String) {
        warn!(operation, error = %message, "Operation failed");
        self.last_error.set(Some(message));
    }
}
