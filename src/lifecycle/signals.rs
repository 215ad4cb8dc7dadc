//! One-shot cross-thread signals.
//!
//! A [`Signal`] is fired once by value; its [`SignalWaiter`] is consumed by a
//! single wait. Built on `tokio::sync::oneshot`, so the same waiter can be
//! awaited from a tokio test or blocked on from a plain thread.

use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;

/// Errors observed while waiting on a signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The firing side went away without firing.
    #[error("signal '{0}' dropped before firing")]
    Dropped(&'static str),

    #[error("signal '{0}' not fired within {1:?}")]
    TimedOut(&'static str, Duration),
}

/// Firing half of a one-shot signal.
#[derive(Debug)]
pub struct Signal {
    name: &'static str,
    tx: oneshot::Sender<()>,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fire the signal. A waiter that is already gone is not an error.
    pub fn fire(self) {
        if self.tx.send(()).is_err() {
            tracing::trace!(signal = self.name, "Signal fired with no waiter left");
        }
    }
}

/// Waiting half of a one-shot signal.
#[derive(Debug)]
pub struct SignalWaiter {
    name: &'static str,
    rx: oneshot::Receiver<()>,
}

impl SignalWaiter {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn wait(self) -> Result<(), SignalError> {
        let Self { name, rx } = self;
        rx.await.map_err(|_| SignalError::Dropped(name))
    }

    /// Block the current thread until fired.
    ///
    /// Must not be called from inside an async runtime; use [`SignalWaiter::wait`]
    /// there.
    pub fn wait_blocking(self) -> Result<(), SignalError> {
        let Self { name, rx } = self;
        rx.blocking_recv().map_err(|_| SignalError::Dropped(name))
    }

    pub async fn wait_timeout(self, timeout: Duration) -> Result<(), SignalError> {
        let Self { name, rx } = self;
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(SignalError::Dropped(name)),
            Err(_) => Err(SignalError::TimedOut(name, timeout)),
        }
    }
}

/// Create a named one-shot signal pair.
pub fn signal(name: &'static str) -> (Signal, SignalWaiter) {
    let (tx, rx) = oneshot::channel();
    (Signal { name, tx }, SignalWaiter { name, rx })
}

/// The test's half of a synchronization triple.
#[derive(Debug)]
pub struct TestSignals {
    /// Fires once the simulated network code has been reached.
    pub pre: SignalWaiter,
    /// Fire to let the simulated network continue.
    pub release: Signal,
    /// Fires once the background task has fully finished.
    pub post: SignalWaiter,
}

/// The simulator's half of a synchronization triple.
#[derive(Debug)]
pub struct NetworkSignals {
    pub pre: Signal,
    pub release: SignalWaiter,
    pub post: Signal,
}

/// Build the pre / release / post signals for one controlled request.
pub fn sync_triple() -> (TestSignals, NetworkSignals) {
    let (pre_tx, pre_rx) = signal("pre");
    let (release_tx, release_rx) = signal("release");
    let (post_tx, post_rx) = signal("post");

    (
        TestSignals {
            pre: pre_rx,
            release: release_tx,
            post: post_rx,
        },
        NetworkSignals {
            pre: pre_tx,
            release: release_rx,
            post: post_tx,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fire_then_wait() {
        let (tx, rx) = signal("t");
        tx.fire();
        assert_eq!(rx.wait().await, Ok(()));
    }

    #[tokio::test]
    async fn test_dropped_signal() {
        let (tx, rx) = signal("gone");
        drop(tx);
        assert_eq!(rx.wait().await, Err(SignalError::Dropped("gone")));
    }

    #[tokio::test]
    async fn test_wait_timeout() {
        let (_tx, rx) = signal("slow");
        let res = rx.wait_timeout(Duration::from_millis(20)).await;
        assert!(matches!(res, Err(SignalError::TimedOut("slow", _))));
    }

    #[test]
    fn test_blocking_wait_across_threads() {
        let (test, network) = sync_triple();
        let worker = std::thread::spawn(move || {
            network.pre.fire();
            network.release.wait_blocking().unwrap();
            network.post.fire();
        });

        test.pre.wait_blocking().unwrap();
        test.release.fire();
        test.post.wait_blocking().unwrap();
        worker.join().unwrap();
    }
}
