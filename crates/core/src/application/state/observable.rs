// Observable state cell

use std::sync::Arc;
use tokio::sync::watch;

/// Shared value that readers can poll or await changes on
///
/// Clones share the same cell.
pub struct Observable<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and wake subscribers (stored even with none)
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_without_subscribers_is_kept() {
        let cell = Observable::new(1);
        cell.set(2);
        assert_eq!(cell.get(), 2);

        let mut rx = cell.clone().subscribe();
        cell.set(3);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 3);
    }
}
