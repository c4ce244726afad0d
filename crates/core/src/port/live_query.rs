// Live Query Port - reactive list subscriptions
//
// Stores broadcast a `Table` after every committed write. A `LiveQuery` runs
// its fetch once on subscribe and again after each change to its table,
// pushing every result to the subscriber.

use crate::error::Result;
use futures::future::BoxFuture;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Pending results buffered per subscriber before the fetch task waits
const LIVE_QUERY_BUFFER: usize = 16;

/// Table touched by a committed write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Vehicles,
    Maintenance,
    Expenses,
    Mechanics,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Vehicles,
        Table::Maintenance,
        Table::Expenses,
        Table::Mechanics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Vehicles => "vehicles",
            Table::Maintenance => "maintenance",
            Table::Expenses => "expenses",
            Table::Mechanics => "mechanics",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiving half of a store's change feed
pub type ChangeReceiver = broadcast::Receiver<Table>;

/// Subscription to a list-valued query
///
/// The first item is the current result; later items follow every write to
/// the watched table. A fetch error is delivered once and ends the stream.
/// Dropping the subscription stops the background fetch task.
pub struct LiveQuery<T> {
    rx: mpsc::Receiver<Result<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> LiveQuery<T> {
    /// Start a subscription on the current Tokio runtime
    ///
    /// `changes` must already be subscribed to the change feed so that a write
    /// racing the initial fetch still triggers a re-fetch.
    pub fn spawn<F>(table: Table, mut changes: ChangeReceiver, fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T>> + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(LIVE_QUERY_BUFFER);

        let task = tokio::spawn(async move {
            debug!(table = %table, "Live query started");
            loop {
                let result = fetch().await;
                let failed = result.is_err();
                if tx.send(result).await.is_err() || failed {
                    break;
                }

                // Wait for the next write to this table
                loop {
                    match changes.recv().await {
                        Ok(changed) if changed == table => break,
                        Ok(_) => continue,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(table = %table, skipped, "Live query lagged, re-fetching");
                            break;
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            debug!(table = %table, "Change feed closed");
                            return;
                        }
                    }
                }
            }
            debug!(table = %table, "Live query stopped");
        });

        Self { rx, task }
    }
}

impl<T> LiveQuery<T> {
    /// Next result; `None` once the subscription has ended
    pub async fn next(&mut self) -> Option<Result<T>> {
        self.rx.recv().await
    }
}

impl<T> Stream for LiveQuery<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
