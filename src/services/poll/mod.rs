//! Extraction results poller.
//!
//! Repeatedly fetches the results location of an upload until the OCR job
//! has published text. Attempts are strictly sequential with a fixed delay
//! between them, and every failure counts as "not ready yet". There is no
//! retry ceiling; the only way out besides success is the cancellation token.

mod types;

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::http_client::Transport;
use crate::models::{ExtractedText, UploadHandle};

pub use types::{PollEvent, PollerState};

/// Delay between polling attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Shape of the results document: `{text: [..]}` once ready.
#[derive(Debug, Deserialize)]
struct ResultsPayload {
    #[serde(default)]
    text: Option<Vec<String>>,
}

/// Outcome of a single attempt.
enum Attempt {
    Ready(ExtractedText),
    NotReady,
    Failed(String),
}

/// Polls a results location until extracted text appears.
pub struct ResultPoller {
    transport: Arc<dyn Transport>,
    interval: Duration,
}

impl ResultPoller {
    pub fn new(transport: Arc<dyn Transport>, interval: Duration) -> Self {
        Self {
            transport,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll until text is available or `cancel` fires.
    ///
    /// Returns `None` only when cancelled.
    pub async fn poll(
        &self,
        handle: &UploadHandle,
        cancel: CancellationToken,
    ) -> Option<ExtractedText> {
        self.run(handle, cancel, None).await
    }

    /// Like [`poll`](Self::poll), additionally reporting progress events.
    pub async fn poll_with_events(
        &self,
        handle: &UploadHandle,
        cancel: CancellationToken,
        event_tx: mpsc::Sender<PollEvent>,
    ) -> Option<ExtractedText> {
        self.run(handle, cancel, Some(event_tx)).await
    }

    async fn run(
        &self,
        handle: &UploadHandle,
        cancel: CancellationToken,
        event_tx: Option<mpsc::Sender<PollEvent>>,
    ) -> Option<ExtractedText> {
        // A slow observer must never hold the loop past cancellation
        let emit = |event: PollEvent| {
            let tx = event_tx.clone();
            let cancel = cancel.clone();
            async move {
                if let Some(tx) = tx {
                    tokio::select! {
                        biased;
                        _ = tx.send(event) => {}
                        _ = cancel.cancelled() => {}
                    }
                }
            }
        };

        let mut attempt = 0u32;
        loop {
            if cancel.is_cancelled() {
                emit(PollEvent::Cancelled { attempts: attempt }).await;
                return None;
            }

            attempt += 1;
            emit(PollEvent::AttemptStarted { attempt }).await;
            if cancel.is_cancelled() {
                emit(PollEvent::Cancelled { attempts: attempt - 1 }).await;
                return None;
            }

            match self.attempt(handle).await {
                Attempt::Ready(text) => {
                    info!(
                        "Extracted {} chars from {} after {} attempt(s)",
                        text.content.len(),
                        handle.results_location,
                        attempt
                    );
                    emit(PollEvent::Ready {
                        attempt,
                        chars: text.content.len(),
                    })
                    .await;
                    return Some(text);
                }
                Attempt::NotReady => {
                    debug!("Results not ready at {}", handle.results_location);
                    emit(PollEvent::NotReady { attempt }).await;
                }
                Attempt::Failed(error) => {
                    warn!("Error fetching results: {}", error);
                    emit(PollEvent::AttemptFailed { attempt, error }).await;
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Polling cancelled for {}", handle.results_location);
                    emit(PollEvent::Cancelled { attempts: attempt }).await;
                    return None;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }

    async fn attempt(&self, handle: &UploadHandle) -> Attempt {
        match self.transport.get_json(&handle.results_location).await {
            Ok(value) => Self::parse_results(value),
            Err(e) => Attempt::Failed(e.to_string()),
        }
    }

    fn parse_results(value: Value) -> Attempt {
        match serde_json::from_value::<ResultsPayload>(value) {
            Ok(payload) => match payload.text.as_deref().and_then(ExtractedText::from_lines) {
                Some(text) => Attempt::Ready(text),
                None => Attempt::NotReady,
            },
            Err(e) => Attempt::Failed(format!("unexpected results shape: {}", e)),
        }
    }
}
