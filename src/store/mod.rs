//! Holds the current view state and fans every new snapshot out to
//! subscribers.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

struct Inner<S> {
    current: S,
    subscribers: Vec<mpsc::UnboundedSender<S>>,
}

/// Single-writer snapshot store with replay-latest subscriptions.
///
/// Only the owner mutates the value (`replace`/`update` are crate-private);
/// everyone else reads through [`snapshot`](Self::snapshot) or
/// [`subscribe`](Self::subscribe).
pub struct StateStore<S> {
    inner: Mutex<Inner<S>>,
}

impl<S: Clone> StateStore<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Mutex::new(Inner {
                current: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> S {
        self.inner.lock().current.clone()
    }

    /// Read the latest snapshot without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.lock().current)
    }

    /// Subscribe to all future snapshots. The current one is delivered first.
    pub fn subscribe(&self) -> Subscription<S> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();
        // Cannot fail: rx is still alive.
        let _ = tx.send(inner.current.clone());
        inner.subscribers.push(tx);
        Subscription { rx }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.lock();
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }

    pub(crate) fn replace(&self, next: S) {
        let mut inner = self.inner.lock();
        inner.current = next;
        Self::publish(&mut inner);
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut S)) {
        let mut inner = self.inner.lock();
        f(&mut inner.current);
        Self::publish(&mut inner);
    }

    fn publish(inner: &mut Inner<S>) {
        let Inner {
            current,
            subscribers,
        } = inner;
        subscribers.retain(|tx| tx.send(current.clone()).is_ok());
    }
}

/// Ordered stream of snapshots from a [`StateStore`].
pub struct Subscription<S> {
    rx: mpsc::UnboundedReceiver<S>,
}

impl<S> Subscription<S> {
    /// Wait for the next snapshot. `None` once the store is dropped.
    pub async fn next(&mut self) -> Option<S> {
        self.rx.recv().await
    }

    /// The next already-emitted snapshot, if any.
    pub fn try_next(&mut self) -> Option<S> {
        self.rx.try_recv().ok()
    }

    /// Drain everything pending and keep only the newest.
    pub fn latest(&mut self) -> Option<S> {
        let mut latest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            latest = Some(snapshot);
        }
        latest
    }
}

impl<S> Stream for Subscription<S> {
    type Item = S;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S>> {
        self.rx.poll_recv(cx)
    }
}
