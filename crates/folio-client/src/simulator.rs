// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Issues drafts over the network, one at a time.

use std::sync::Mutex;
use std::time::Instant;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::{debug, warn};

use folio_core::FolioError;

use crate::builder::{build, BuiltBody, BuiltRequest, DATA_PART, FILE_PART};
use crate::draft::RequestDraft;
use crate::view::ResponseView;

/// Where a simulator is in its send cycle.
///
/// `Idle → Validating → (RejectedLocally | Sending) → (Succeeded | NetworkFailed) → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Validating,
    RejectedLocally,
    Sending,
    Succeeded,
    NetworkFailed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("a request is already in flight")]
    Busy,
}

impl From<SendError> for FolioError {
    fn from(err: SendError) -> Self {
        FolioError::Client {
            message: err.to_string(),
            source: None,
        }
    }
}

/// Sends drafts to a Folio server and turns the answers into [`ResponseView`]s.
pub struct Simulator {
    client: reqwest::Client,
    base_url: String,
    phase: Mutex<SendPhase>,
    last_outcome: Mutex<Option<SendPhase>>,
}

impl Simulator {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FolioError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FolioError::Client {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            phase: Mutex::new(SendPhase::Idle),
            last_outcome: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn phase(&self) -> SendPhase {
        *lock(&self.phase)
    }

    /// Terminal phase of the most recent send.
    pub fn last_outcome(&self) -> Option<SendPhase> {
        *lock(&self.last_outcome)
    }

    /// Validate and send `draft`.
    ///
    /// Network failures are reported as a view, not an error; the only
    /// error is [`SendError::Busy`].
    pub async fn send(&self, draft: &RequestDraft) -> Result<ResponseView, SendError> {
        let cycle = Cycle::begin(self)?;

        if draft.method.is_write() && !draft.has_payload() {
            cycle.finish(SendPhase::RejectedLocally);
            debug!(method = %draft.method, path = %draft.path, "rejected locally: no data");
            return Ok(ResponseView::no_data());
        }

        cycle.advance(SendPhase::Sending);
        let request = build(draft, &self.base_url);
        debug!(method = %request.method, url = %request.url, "sending");

        let started = Instant::now();
        match self.issue(request).await {
            Ok((status, content_type, body)) => {
                let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                cycle.finish(SendPhase::Succeeded);
                Ok(ResponseView::from_response(
                    status,
                    content_type.as_deref(),
                    body,
                    elapsed,
                ))
            }
            Err(e) => {
                warn!(error = %e, "request failed");
                cycle.finish(SendPhase::NetworkFailed);
                Ok(ResponseView::network_failure(e.to_string()))
            }
        }
    }

    async fn issue(
        &self,
        request: BuiltRequest,
    ) -> Result<(u16, Option<String>, String), reqwest::Error> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        builder = match request.body {
            BuiltBody::None => builder,
            BuiltBody::Raw { content_type, text } => {
                builder.header(CONTENT_TYPE, content_type).body(text)
            }
            BuiltBody::Multipart { file, data } => {
                let mut part = Part::bytes(file.bytes).file_name(file.filename);
                if let Some(content_type) = &file.content_type {
                    part = part.mime_str(content_type)?;
                }
                let mut form = Form::new().part(FILE_PART, part);
                if let Some(data) = data {
                    form = form.text(DATA_PART, data);
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        Ok((status, content_type, body))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One pass through the send state machine. Dropping it returns to `Idle`.
struct Cycle<'a> {
    simulator: &'a Simulator,
}

impl<'a> Cycle<'a> {
    fn begin(simulator: &'a Simulator) -> Result<Self, SendError> {
        let mut phase = lock(&simulator.phase);
        if *phase != SendPhase::Idle {
            return Err(SendError::Busy);
        }
        *phase = SendPhase::Validating;
        Ok(Self { simulator })
    }

    fn advance(&self, next: SendPhase) {
        *lock(&self.simulator.phase) = next;
    }

    fn finish(&self, outcome: SendPhase) {
        self.advance(outcome);
        *lock(&self.simulator.last_outcome) = Some(outcome);
    }
}

impl Drop for Cycle<'_> {
    fn drop(&mut self) {
        *lock(&self.simulator.phase) = SendPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Method;

    #[tokio::test]
    async fn write_without_data_is_rejected_locally() {
        // Unroutable base: any network attempt would fail the assertion below.
        let simulator = Simulator::new("http://127.0.0.1:9").unwrap();
        let draft = RequestDraft {
            method: Method::Post,
            path: "/contact".into(),
            ..RequestDraft::default()
        };

        let view = simulator.send(&draft).await.unwrap();
        assert_eq!(view, ResponseView::no_data());
        assert_eq!(simulator.last_outcome(), Some(SendPhase::RejectedLocally));
        assert_eq!(simulator.phase(), SendPhase::Idle);
    }

    #[tokio::test]
    async fn connection_failure_becomes_failure_view() {
        let simulator = Simulator::new("http://127.0.0.1:9").unwrap();
        let view = simulator.send(&RequestDraft::default()).await.unwrap();

        assert_eq!(view.status, 500);
        assert_eq!(view.elapsed_ms, None);
        assert_eq!(simulator.last_outcome(), Some(SendPhase::NetworkFailed));
        assert_eq!(simulator.phase(), SendPhase::Idle);
    }

    #[test]
    fn busy_converts_to_client_error() {
        let err: FolioError = SendError::Busy.into();
        assert!(matches!(err, FolioError::Client { .. }));
    }
}
