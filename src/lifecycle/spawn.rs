//! Detached background execution.
//!
//! Simulated network work runs on its own OS thread whose handle is dropped
//! immediately. Callers never join; completion is observed through signals.

use std::thread;

use crate::observability::metrics;

/// Run `f` on a named, detached thread.
///
/// Returns `false` if the OS refused to create the thread. The failure is
/// logged and counted here; callers only decide what else to skip.
pub fn spawn_detached<F>(name: String, f: F) -> bool
where
    F: FnOnce() + Send + 'static,
{
    match thread::Builder::new().name(name.clone()).spawn(f) {
        Ok(_handle) => true,
        Err(e) => {
            tracing::error!(thread = %name, error = %e, "Failed to spawn background thread");
            metrics::record_spawn_failure();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_runs_on_named_thread() {
        let (tx, rx) = mpsc::channel();
        assert!(spawn_detached("netmock-test-7".to_string(), move || {
            let name = thread::current().name().map(str::to_owned);
            tx.send(name).unwrap();
        }));
        assert_eq!(rx.recv().unwrap().as_deref(), Some("netmock-test-7"));
    }
}
