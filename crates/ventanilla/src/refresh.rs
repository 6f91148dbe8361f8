//! Cancellable fixed-interval refresh.
//!
//! The watch view re-fetches the listing on a timer: run once immediately,
//! then again every interval until told to stop. Staleness between ticks is
//! accepted. [`RefreshHandle`] is the explicit teardown, so no ambient timer
//! outlives its view.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to stop a running refresh loop.
///
/// Cheap to clone; all clones control the same loop.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl RefreshHandle {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signal the refresh loop to stop. Idempotent.
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    /// Check whether the loop has been told to stop.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Spawn a refresh loop running `refresh` immediately and then once per
/// `interval` until the returned handle is stopped.
///
/// The loop reacts to [`RefreshHandle::stop`] even while waiting out an
/// interval, so teardown does not block on the timer.
pub fn spawn<F, Fut>(interval: Duration, mut refresh: F) -> (RefreshHandle, JoinHandle<()>)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let handle = RefreshHandle::new();
    let mut rx = handle.tx.subscribe();

    let task = tokio::spawn(async move {
        loop {
            if *rx.borrow() {
                break;
            }

            refresh().await;

            tokio::select! {
                () = tokio::time::sleep(interval) => {}
                changed = rx.changed() => {
                    if changed.is_err() || *rx.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("Refresh loop stopped");
    });

    (handle, task)
}
