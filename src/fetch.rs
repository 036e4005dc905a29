//! Request lifetimes tied to a view's mounted lifetime.
//!
//! A [`Mount`] is owned by the view that issues the request. Dropping it
//! signals its token: the in-flight request future is dropped, which aborts
//! the connection, and every [`StateSetter`] created from it refuses further
//! updates.
use std::future::Future;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Mount {
    token: CancellationToken,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> MountHandle {
        MountHandle {
            token: self.token.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome<T, E> {
    Completed(T),
    Failed(E),
    Cancelled,
}

/// Borrowed view of a [`Mount`] for the task doing the fetching.
#[derive(Debug, Clone)]
pub struct MountHandle {
    token: CancellationToken,
}

impl MountHandle {
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Races `request` against unmount. A result that lands after unmount is
    /// reported as cancelled.
    pub async fn run<F, T, E>(&self, request: F) -> Outcome<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Outcome::Cancelled,
            result = request => match result {
                _ if !self.is_active() => Outcome::Cancelled,
                Ok(value) => Outcome::Completed(value),
                Err(e) => Outcome::Failed(e),
            },
        }
    }

    pub fn setter<T>(&self, tx: watch::Sender<T>) -> StateSetter<T> {
        StateSetter {
            tx,
            handle: self.clone(),
        }
    }
}

/// Writes view state only while the owning view is mounted.
///
/// The mount is checked under the channel's write lock. Cancellation itself
/// takes no lock, so an unmount racing on another thread can still see one
/// last update land. Cooperative, like every other cancellation point here.
#[derive(Debug)]
pub struct StateSetter<T> {
    tx: watch::Sender<T>,
    handle: MountHandle,
}

impl<T> StateSetter<T> {
    pub fn set(&self, value: T) -> bool {
        let written = self.tx.send_if_modified(|state| {
            if !self.handle.is_active() {
                return false;
            }

            *state = value;
            true
        });

        if !written {
            debug!("Dropping state update after unmount");
        }

        written
    }
}
