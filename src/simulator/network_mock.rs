//! Scriptable [`Network`] implementation.
//!
//! # Responsibilities
//! - Hand each `send` to the next queued [`SendAction`] (or a default)
//! - Route `cancel` to the action registered for that request ID
//! - Record calls so tests can assert on what the client did
//!
//! # Design Decisions
//! - Locks are released before an action runs; actions may call back into
//!   the client, which may call back into the network
//! - An unexpected send fails the request instead of panicking the client's
//!   thread

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::http::{
    Callback, DataCallback, ErrorCode, HeaderCallback, Network, NetworkRequest, Payload, RequestId, SendOutcome,
};
use crate::simulator::{CancelAction, MockedActions, SendAction};

type SendFactory = Box<dyn Fn() -> SendAction + Send + Sync>;

#[derive(Default)]
pub struct NetworkMock {
    sends: Mutex<VecDeque<SendAction>>,
    default_send: Mutex<Option<SendFactory>>,
    cancels: DashMap<RequestId, CancelAction>,
    sent: Mutex<Vec<NetworkRequest>>,
    cancelled: Mutex<Vec<RequestId>>,
}

fn lock<T: ?Sized>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NetworkMock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the behavior of the next unclaimed `send`.
    pub fn expect_send(&self, action: SendAction) {
        lock(&self.sends).push_back(action);
    }

    /// Behavior for sends once the queue is empty.
    pub fn set_default_send<F>(&self, factory: F)
    where
        F: Fn() -> SendAction + Send + Sync + 'static,
    {
        *lock(&self.default_send) = Some(Box::new(factory));
    }

    pub fn expect_cancel(&self, id: RequestId, action: CancelAction) {
        self.cancels.insert(id, action);
    }

    /// Wire up both halves of a controlled request. Returns its ID.
    pub fn register(&self, actions: MockedActions) -> RequestId {
        let (id, send, cancel) = actions.into_parts();
        self.expect_send(send);
        self.expect_cancel(id, cancel);
        id
    }

    pub fn send_count(&self) -> usize {
        lock(&self.sent).len()
    }

    pub fn sent_requests(&self) -> Vec<NetworkRequest> {
        lock(&self.sent).clone()
    }

    pub fn cancelled_ids(&self) -> Vec<RequestId> {
        lock(&self.cancelled).clone()
    }

    /// Sends still queued and never claimed.
    pub fn pending_sends(&self) -> usize {
        lock(&self.sends).len()
    }

    fn next_send(&self) -> Option<SendAction> {
        if let Some(action) = lock(&self.sends).pop_front() {
            return Some(action);
        }
        lock(&self.default_send).as_ref().map(|factory| factory())
    }
}

impl Network for NetworkMock {
    fn send(
        &self,
        request: NetworkRequest,
        payload: Option<Payload>,
        callback: Callback,
        header_callback: HeaderCallback,
        data_callback: Option<DataCallback>,
    ) -> SendOutcome {
        lock(&self.sent).push(request.clone());

        match self.next_send() {
            Some(action) => action(request, payload, callback, header_callback, data_callback),
            None => {
                tracing::warn!(url = %request.url(), "Unexpected send; no action queued");
                SendOutcome::error(ErrorCode::UnknownError)
            }
        }
    }

    fn cancel(&self, id: RequestId) {
        lock(&self.cancelled).push(id);

        let action = self.cancels.get(&id).map(|entry| entry.value().clone());
        match action {
            Some(action) => action(id),
            None => tracing::debug!(request_id = %id, "Cancel for unknown request ignored"),
        }
    }
}

impl std::fmt::Debug for NetworkMock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkMock")
            .field("pending_sends", &self.pending_sends())
            .field("cancel_routes", &self.cancels.len())
            .field("send_count", &self.send_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::NetworkResponse;
    use std::sync::Arc;

    fn noop_callbacks() -> (Callback, HeaderCallback) {
        (Arc::new(|_: NetworkResponse| {}), Arc::new(|_: &str, _: &str| {}))
    }

    fn fixed(id: u64) -> SendAction {
        Box::new(
            move |_: NetworkRequest,
                  _: Option<Payload>,
                  _: Callback,
                  _: HeaderCallback,
                  _: Option<DataCallback>| SendOutcome::ok(RequestId::from_raw(id)),
        )
    }

    #[test]
    fn test_unexpected_send_fails() {
        let mock = NetworkMock::new();
        let (cb, hcb) = noop_callbacks();
        let outcome = mock.send(NetworkRequest::new("http://a"), None, cb, hcb, None);

        assert_eq!(outcome.error_code(), ErrorCode::UnknownError);
        assert_eq!(mock.send_count(), 1);
    }

    #[test]
    fn test_queue_then_default() {
        let mock = NetworkMock::new();
        mock.expect_send(fixed(1));
        mock.set_default_send(|| fixed(2));

        let ids: Vec<u64> = (0..3)
            .map(|_| {
                let (cb, hcb) = noop_callbacks();
                mock.send(NetworkRequest::default(), None, cb, hcb, None).request_id().as_u64()
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 2]);
        assert_eq!(mock.pending_sends(), 0);
    }

    #[test]
    fn test_cancel_routing() {
        let mock = NetworkMock::new();
        let hits = Arc::new(Mutex::new(Vec::new()));
        let h = hits.clone();
        mock.expect_cancel(RequestId::from_raw(5), Arc::new(move |id: RequestId| h.lock().unwrap().push(id)));

        mock.cancel(RequestId::from_raw(5));
        mock.cancel(RequestId::from_raw(6));

        assert_eq!(*hits.lock().unwrap(), vec![RequestId::from_raw(5)]);
        assert_eq!(mock.cancelled_ids().len(), 2);
    }
}
