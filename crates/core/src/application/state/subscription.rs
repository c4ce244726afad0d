// Live query forwarding into observable cells

use super::{Activity, Observable};
use crate::port::LiveQuery;
use tokio::task::JoinHandle;
use tracing::debug;

/// Background task republishing a live query; cancelled on drop
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    /// Forward every emission of `query` into `cell`
    ///
    /// A failed emission is recorded on `activity` and ends the subscription.
    pub fn forward<T>(
        name: &'static str,
        mut query: LiveQuery<T>,
        cell: Observable<T>,
        activity: Activity,
    ) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let task = tokio::spawn(async move {
            while let Some(result) = query.next().await {
                match result {
                    Ok(value) => cell.set(value),
                    Err(e) => {
                        activity.record_error(name, e.to_string());
                        break;
                    }
                }
            }
            debug!(subscription = name, "Subscription ended");
        });
        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
