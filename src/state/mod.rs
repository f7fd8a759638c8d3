//! Pipeline state machine.
//!
//! All state for the single in-flight document lives in [`AppState`]. It only
//! changes through [`reduce`], which maps the current state and an [`Event`]
//! to the next state plus the [`Effect`]s the orchestrator must run.

mod event;
mod reducer;
mod view;

pub use event::{Effect, Event};
pub use reducer::reduce;
pub use view::{regions, Prompt, Regions, UploadForm};

use crate::models::{AnalysisRecord, ErrorState, ExtractedText, SelectedFile, UploadHandle};
use crate::services::PollerState;

/// Identifies one upload attempt. Completions tagged with an older session
/// are discarded.
pub type SessionId = u64;

/// Where the current document is in the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing uploaded in the current session.
    #[default]
    Idle,
    /// Upload request in flight.
    Uploading,
    /// Waiting for the extraction job to publish text.
    Polling,
    /// Text extracted, analysis requested.
    Analyzing,
    /// Analysis received.
    Analyzed,
    /// The orchestrating context was torn down.
    Closed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploading => "uploading",
            Self::Polling => "polling",
            Self::Analyzing => "analyzing",
            Self::Analyzed => "analyzed",
            Self::Closed => "closed",
        }
    }
}

/// Complete observable state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// A drag is hovering over the drop zone.
    pub drag_active: bool,
    pub selected: Option<SelectedFile>,
    pub error: Option<ErrorState>,
    /// Current session; bumped on every accepted selection and upload.
    pub session: SessionId,
    pub phase: Phase,
    pub handle: Option<UploadHandle>,
    pub extracted: Option<ExtractedText>,
    pub analysis: Option<AnalysisRecord>,
}

impl AppState {
    /// State of the results poller for the current session.
    pub fn poller_state(&self) -> PollerState {
        match (&self.handle, &self.extracted) {
            (None, _) => PollerState::Idle,
            (Some(_), None) => PollerState::Polling,
            (Some(_), Some(_)) => PollerState::Done,
        }
    }

    /// Whether the orchestrating context has been torn down.
    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }
}
