//! Events consumed by the reducer and effects it requests.

use super::SessionId;
use crate::models::{AnalysisRecord, ExtractedText, SelectedFile, UploadHandle};

/// Something that happened: user input or an async completion.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A drag entered the drop zone
    DragEntered,
    /// A drag left the drop zone without dropping
    DragLeft,
    /// Files were dropped or picked; only the first one counts
    FilesDropped(Vec<SelectedFile>),
    /// The user clicked upload
    UploadRequested,
    /// The upload endpoint returned a location
    UploadSucceeded {
        session: SessionId,
        handle: UploadHandle,
    },
    /// The upload request failed
    UploadFailed { session: SessionId, error: String },
    /// Re-arm polling if the current handle has no text yet
    ResumePolling,
    /// The poller observed extracted text
    TextExtracted {
        session: SessionId,
        text: ExtractedText,
    },
    /// The analysis endpoint produced a record
    AnalysisReady {
        session: SessionId,
        record: AnalysisRecord,
    },
    /// The analysis request or its parsing failed
    AnalysisFailed { session: SessionId, error: String },
    /// The orchestrating context is going away
    TornDown,
}

/// Side effect the orchestrator must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartUpload {
        session: SessionId,
        file: SelectedFile,
    },
    StartPolling {
        session: SessionId,
        handle: UploadHandle,
    },
    /// Cancel the pending poll of a superseded session
    CancelPolling { session: SessionId },
    StartAnalysis {
        session: SessionId,
        text: ExtractedText,
    },
    /// Cancel everything (teardown)
    CancelAll,
}
