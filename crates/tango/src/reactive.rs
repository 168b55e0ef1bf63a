//! Observable state cells.
//!
//! A [`State`] is owned by the single component allowed to write it. Everyone else gets a
//! [`ReadState`] and can read the current value or subscribe to changes. Subscribers always see
//! the latest value; intermediate values written while a subscriber was not looking are skipped.

use futures_util::Stream;
use tokio::sync::watch;

/// A writable state cell.
#[derive(Debug)]
pub struct State<T> {
    tx: watch::Sender<T>,
}

impl<T> State<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Modifies the value in place, notifying subscribers only if `f` returns true.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Emits the current value, then every change.
    pub fn stream(&self) -> impl Stream<Item = T> + Send + 'static {
        self.subscribe().into_stream()
    }

    pub fn reader(&self) -> ReadState<T> {
        ReadState {
            rx: self.tx.subscribe(),
        }
    }
}

impl<T> Default for State<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A read-only handle to a [`State`].
#[derive(Debug, Clone)]
pub struct ReadState<T> {
    rx: watch::Receiver<T>,
}

impl<T> ReadState<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.rx.borrow())
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let mut rx = self.rx.clone();
        rx.borrow_and_update();
        Subscription { rx }
    }

    pub fn stream(&self) -> impl Stream<Item = T> + Send + 'static {
        self.subscribe().into_stream()
    }
}

/// Observes a state cell from the point it was created.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
}

impl<T> Subscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Returns the current value and marks it as seen.
    pub fn current(&mut self) -> T {
        self.rx.borrow_and_update().clone()
    }

    /// Whether the value has been written since it was last seen.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Waits for the next write. Returns `None` once the cell is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub fn into_stream(self) -> impl Stream<Item = T> + Send + 'static {
        futures_util::stream::unfold((self, true), |(mut subscription, first)| async move {
            let value = if first {
                subscription.current()
            } else {
                subscription.changed().await?
            };
            Some((value, (subscription, false)))
        })
    }
}
