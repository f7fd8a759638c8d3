//! Pipeline orchestrator.
//!
//! Owns the [`AppState`], applies events one at a time through the reducer,
//! and runs the resulting effects as tokio tasks. Tasks report back by
//! sending events into the same queue, so every state change is serialized
//! through [`Orchestrator::dispatch`].

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::http_client::Transport;
use crate::llm::AnalysisFetcher;
use crate::models::{ExtractedText, SelectedFile, UploadHandle};
use crate::services::{PollEvent, ResultPoller, Uploader, Validator};
use crate::state::{reduce, regions, AppState, Effect, Event, Regions, SessionId};

/// Capacity of the event queue.
const EVENT_QUEUE_SIZE: usize = 64;

/// The poller task of one session.
struct ActivePoll {
    session: SessionId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Drives one document through upload, extraction polling, and analysis.
pub struct Orchestrator {
    state: AppState,
    validator: Validator,
    uploader: Arc<Uploader>,
    poller: Arc<ResultPoller>,
    fetcher: Arc<AnalysisFetcher>,
    viewer_url: String,
    event_tx: mpsc::Sender<Event>,
    event_rx: mpsc::Receiver<Event>,
    state_tx: watch::Sender<AppState>,
    shutdown: CancellationToken,
    active_poll: Option<ActivePoll>,
    poll_events: Option<mpsc::Sender<PollEvent>>,
}

impl Orchestrator {
    /// Create an orchestrator talking to the endpoints in `config`.
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_SIZE);
        let (state_tx, _) = watch::channel(AppState::default());

        Self {
            state: AppState::default(),
            validator: Validator::new(config.upload.max_file_bytes),
            uploader: Arc::new(Uploader::new(
                transport.clone(),
                &config.api.upload_path,
                &config.api.results_suffix,
            )),
            poller: Arc::new(ResultPoller::new(transport.clone(), config.poll_interval())),
            fetcher: Arc::new(AnalysisFetcher::new(transport, &config.api.analysis_path)),
            viewer_url: config.viewer.document_url.clone(),
            event_tx,
            event_rx,
            state_tx,
            shutdown: CancellationToken::new(),
            active_poll: None,
            poll_events: None,
        }
    }

    /// Forward poller progress events to `tx`.
    pub fn with_poll_events(mut self, tx: mpsc::Sender<PollEvent>) -> Self {
        self.poll_events = Some(tx);
        self
    }

    /// Current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Display regions for the current state.
    pub fn regions(&self) -> Regions {
        regions(&self.state, &self.viewer_url)
    }

    /// Handle for queueing events from other tasks (e.g. a signal handler).
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.event_tx.clone()
    }

    /// Subscribe to state snapshots, published after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state_tx.subscribe()
    }

    /// Apply an event immediately and run its effects.
    pub fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = reduce(state, event, &self.validator);
        self.state = next;
        self.state_tx.send_replace(self.state.clone());

        for effect in effects {
            self.run_effect(effect);
        }
    }

    /// Wait for the next queued event and apply it.
    ///
    /// Returns `false` once the orchestrator has been torn down.
    pub async fn step(&mut self) -> bool {
        if self.state.is_closed() {
            return false;
        }
        match self.event_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Process queued events until `done` holds for the state or the
    /// orchestrator is torn down.
    pub async fn run_until<F>(&mut self, done: F) -> &AppState
    where
        F: Fn(&AppState) -> bool,
    {
        while !done(&self.state) {
            if !self.step().await {
                break;
            }
        }
        &self.state
    }

    /// Tear down: cancel pending polls and ignore everything afterwards.
    pub fn teardown(&mut self) {
        self.dispatch(Event::TornDown);
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartUpload { session, file } => self.start_upload(session, file),
            Effect::StartPolling { session, handle } => self.start_polling(session, handle),
            Effect::CancelPolling { session } => self.cancel_polling(session),
            Effect::StartAnalysis { session, text } => self.start_analysis(session, text),
            Effect::CancelAll => {
                info!("Tearing down pipeline");
                self.shutdown.cancel();
                self.active_poll = None;
            }
        }
    }

    fn start_upload(&self, session: SessionId, file: SelectedFile) {
        let uploader = self.uploader.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match uploader.upload(&file).await {
                Ok(handle) => Event::UploadSucceeded { session, handle },
                Err(e) => Event::UploadFailed {
                    session,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    fn start_polling(&mut self, session: SessionId, handle: UploadHandle) {
        if let Some(active) = &self.active_poll {
            // A finished poller of this session has already delivered its text
            if active.session == session {
                if active.task.is_finished() {
                    debug!("Poller for session {} already finished", session);
                } else {
                    debug!("Poller already running for session {}", session);
                }
                return;
            }
            active.cancel.cancel();
        }

        let cancel = self.shutdown.child_token();
        let poller = self.poller.clone();
        let tx = self.event_tx.clone();
        let poll_events = self.poll_events.clone();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let text = match poll_events {
                Some(events) => poller.poll_with_events(&handle, token, events).await,
                None => poller.poll(&handle, token).await,
            };
            if let Some(text) = text {
                let _ = tx.send(Event::TextExtracted { session, text }).await;
            }
        });

        self.active_poll = Some(ActivePoll {
            session,
            cancel,
            task,
        });
    }

    fn cancel_polling(&mut self, session: SessionId) {
        if let Some(active) = self.active_poll.take() {
            if active.session == session {
                debug!("Cancelling poller for session {}", session);
                active.cancel.cancel();
            } else {
                self.active_poll = Some(active);
            }
        }
    }

    fn start_analysis(&self, session: SessionId, text: ExtractedText) {
        let fetcher = self.fetcher.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match fetcher.analyze(&text).await {
                Ok(record) => Event::AnalysisReady { session, record },
                Err(e) => Event::AnalysisFailed {
                    session,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
