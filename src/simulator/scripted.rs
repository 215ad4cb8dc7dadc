//! Scripted response emitter.
//!
//! A canned response replayed after a fixed delay: headers, then body, then
//! completion. There is no cancel path; a scripted request always completes.

use std::io::{Seek, SeekFrom, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::SimulatorConfig;
use crate::http::{
    lock_payload, Callback, DataCallback, HeaderCallback, Headers, NetworkRequest, NetworkResponse, Payload,
    RequestId, SendOutcome,
};
use crate::lifecycle::spawn_detached;
use crate::observability::metrics::{self, Outcome};
use crate::simulator::SendAction;

/// A reusable canned response. Each [`ScriptedResponse::into_action`] yields
/// one send behavior; clone it to serve several sends.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    response: NetworkResponse,
    body: Arc<Vec<u8>>,
    headers: Arc<Headers>,
    delay: Duration,
    request_id: RequestId,
    offset: u64,
    thread_name_prefix: String,
}

impl ScriptedResponse {
    /// `request_id` is attached to `response` here, once.
    pub fn new(
        response: NetworkResponse,
        body: impl Into<Vec<u8>>,
        headers: Headers,
        delay: Duration,
        request_id: RequestId,
        offset: u64,
    ) -> Self {
        Self {
            response: response.with_request_id(request_id),
            body: Arc::new(body.into()),
            headers: Arc::new(headers),
            delay,
            request_id,
            offset,
            thread_name_prefix: SimulatorConfig::default().thread_name_prefix,
        }
    }

    pub fn with_config(mut self, config: &SimulatorConfig) -> Self {
        self.thread_name_prefix = config.thread_name_prefix.clone();
        self
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn response(&self) -> &NetworkResponse {
        &self.response
    }

    pub fn into_action(self) -> SendAction {
        Box::new(
            move |_request: NetworkRequest,
                  payload: Option<Payload>,
                  callback: Callback,
                  header_callback: HeaderCallback,
                  data_callback: Option<DataCallback>| {
                let request_id = self.request_id;
                let name = format!("{}-scripted-{}", self.thread_name_prefix, request_id);
                metrics::record_request("scripted");
                tracing::debug!(request_id = %request_id, delay = ?self.delay, "Scripted request sent");

                spawn_detached(name, move || self.emit(payload, callback, header_callback, data_callback));

                SendOutcome::ok(request_id)
            },
        )
    }

    fn emit(
        self,
        payload: Option<Payload>,
        callback: Callback,
        header_callback: HeaderCallback,
        data_callback: Option<DataCallback>,
    ) {
        thread::sleep(self.delay);

        for (name, value) in self.headers.iter() {
            header_callback(name.as_str(), value.as_str());
        }

        if let Some(data_callback) = data_callback {
            data_callback(self.body.as_slice(), self.offset, self.body.len());
        } else if let Some(payload) = payload {
            if let Err(e) = append_and_rewind(&payload, &self.body) {
                tracing::error!(request_id = %self.request_id, error = %e, "Failed to write scripted body to payload");
            }
        } else {
            tracing::warn!(request_id = %self.request_id, "No data callback or payload; body dropped");
        }

        tracing::debug!(request_id = %self.request_id, status = self.response.status(), outcome = "completed", "Delivering scripted response");
        callback(self.response);
        metrics::record_outcome(Outcome::Completed);
    }
}

/// Write at the end of the sink, then leave it positioned at the start.
fn append_and_rewind(payload: &Payload, body: &[u8]) -> std::io::Result<()> {
    let mut sink = lock_payload(payload);
    sink.seek(SeekFrom::End(0))?;
    sink.write_all(body)?;
    sink.seek(SeekFrom::Start(0))?;
    Ok(())
}

/// One-shot send behavior replaying `response` after `delay`.
pub fn return_http_response(
    response: NetworkResponse,
    body: impl Into<Vec<u8>>,
    headers: Headers,
    delay: Duration,
    request_id: RequestId,
    offset: u64,
) -> SendAction {
    ScriptedResponse::new(response, body, headers, delay, request_id, offset).into_action()
}
