//! State transitions.

use tracing::{debug, warn};

use super::{AppState, Effect, Event, Phase};
use crate::models::ErrorState;
use crate::services::Validator;

/// Apply one event to the state.
///
/// Completion events carry the session they belong to; anything from an
/// older session is dropped so a superseded upload can never overwrite the
/// current document's text or analysis.
pub fn reduce(mut state: AppState, event: Event, validator: &Validator) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    if state.phase == Phase::Closed {
        debug!("Ignoring {} after teardown", event_name(&event));
        return (state, effects);
    }

    match event {
        Event::DragEntered => state.drag_active = true,
        Event::DragLeft => state.drag_active = false,

        Event::FilesDropped(files) => {
            state.drag_active = false;
            match validator.validate_drop(&files) {
                None => debug!("Ignoring empty drop"),
                Some(Ok(file)) => {
                    debug!("Accepted {} ({} bytes)", file.name, file.size_bytes);
                    supersede(&mut state, &mut effects);
                    state.error = None;
                    state.selected = Some(file);
                    state.phase = Phase::Idle;
                }
                Some(Err(e)) => {
                    debug!("Rejected file: {}", e);
                    state.selected = None;
                    state.error = Some(ErrorState::new(e.to_string()));
                }
            }
        }

        Event::UploadRequested => {
            let Some(file) = state.selected.clone() else {
                debug!("Upload requested with no file selected");
                return (state, effects);
            };
            supersede(&mut state, &mut effects);
            state.phase = Phase::Uploading;
            effects.push(Effect::StartUpload {
                session: state.session,
                file,
            });
        }

        Event::UploadSucceeded { session, handle } => {
            if session != state.session || state.phase != Phase::Uploading {
                debug!("Dropping stale upload result for session {}", session);
            } else {
                state.handle = Some(handle.clone());
                state.phase = Phase::Polling;
                effects.push(Effect::StartPolling { session, handle });
            }
        }

        Event::UploadFailed { session, error } => {
            if session == state.session && state.phase == Phase::Uploading {
                warn!("Upload failed: {}", error);
                state.phase = Phase::Idle;
            } else {
                debug!("Dropping stale upload failure for session {}", session);
            }
        }

        Event::ResumePolling => {
            if let (Phase::Polling, Some(handle), None) =
                (state.phase, &state.handle, &state.extracted)
            {
                effects.push(Effect::StartPolling {
                    session: state.session,
                    handle: handle.clone(),
                });
            } else {
                debug!("Not re-arming poller in phase {}", state.phase.as_str());
            }
        }

        Event::TextExtracted { session, text } => {
            if session != state.session || state.extracted.is_some() {
                debug!("Dropping extracted text for session {}", session);
            } else {
                state.extracted = Some(text.clone());
                state.phase = Phase::Analyzing;
                effects.push(Effect::CancelPolling { session });
                effects.push(Effect::StartAnalysis { session, text });
            }
        }

        Event::AnalysisReady { session, record } => {
            if session != state.session || state.analysis.is_some() {
                debug!("Dropping analysis for session {}", session);
            } else {
                state.analysis = Some(record);
                state.phase = Phase::Analyzed;
            }
        }

        Event::AnalysisFailed { session, error } => {
            // No retry: the loading indicator stays up until a new upload.
            if session == state.session {
                warn!("Error fetching document data: {}", error);
            } else {
                debug!("Dropping analysis failure for session {}", session);
            }
        }

        Event::TornDown => {
            state.phase = Phase::Closed;
            effects.push(Effect::CancelAll);
        }
    }

    (state, effects)
}

/// Discard the current session's pipeline and start a new session.
fn supersede(state: &mut AppState, effects: &mut Vec<Effect>) {
    if state.phase == Phase::Polling {
        effects.push(Effect::CancelPolling {
            session: state.session,
        });
    }
    state.session += 1;
    state.handle = None;
    state.extracted = None;
    state.analysis = None;
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::DragEntered => "DragEntered",
        Event::DragLeft => "DragLeft",
        Event::FilesDropped(_) => "FilesDropped",
        Event::UploadRequested => "UploadRequested",
        Event::UploadSucceeded { .. } => "UploadSucceeded",
        Event::UploadFailed { .. } => "UploadFailed",
        Event::ResumePolling => "ResumePolling",
        Event::TextExtracted { .. } => "TextExtracted",
        Event::AnalysisReady { .. } => "AnalysisReady",
        Event::AnalysisFailed { .. } => "AnalysisFailed",
        Event::TornDown => "TornDown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisRecord, ExtractedText, SelectedFile, UploadHandle};
    use crate::services::PollerState;

    fn small_file(name: &str) -> SelectedFile {
        SelectedFile::new(name, "text/plain", b"lease text".to_vec())
    }

    fn big_file() -> SelectedFile {
        SelectedFile::new("scan.pdf", "application/pdf", vec![0u8; 200 * 1024])
    }

    fn handle(name: &str) -> UploadHandle {
        UploadHandle::from_location(&format!("https://bucket.example.com/{}", name), "-results.json")
    }

    fn text(content: &str) -> ExtractedText {
        ExtractedText {
            content: content.to_string(),
        }
    }

    fn apply(state: AppState, event: Event) -> (AppState, Vec<Effect>) {
        reduce(state, event, &Validator::default())
    }

    /// Drive a state to Polling for a file named `name`.
    fn polling(name: &str) -> AppState {
        let (state, _) = apply(AppState::default(), Event::FilesDropped(vec![small_file(name)]));
        let (state, _) = apply(state, Event::UploadRequested);
        let session = state.session;
        let (state, _) = apply(
            state,
            Event::UploadSucceeded {
                session,
                handle: handle(name),
            },
        );
        state
    }

    #[test]
    fn test_accept_clears_error() {
        let (state, _) = apply(AppState::default(), Event::FilesDropped(vec![big_file()]));
        assert!(state.selected.is_none());
        assert_eq!(
            state.error.as_ref().unwrap().message,
            "File size exceeds 150KB. Please upload a smaller file."
        );

        let (state, _) = apply(state, Event::FilesDropped(vec![small_file("a.txt")]));
        assert!(state.error.is_none());
        assert_eq!(state.selected.unwrap().name, "a.txt");
    }

    #[test]
    fn test_drag_hint() {
        let (state, _) = apply(AppState::default(), Event::DragEntered);
        assert!(state.drag_active);
        let (state, _) = apply(state, Event::FilesDropped(vec![small_file("a.txt")]));
        assert!(!state.drag_active);
    }

    #[test]
    fn test_upload_without_file_is_noop() {
        let (state, effects) = apply(AppState::default(), Event::UploadRequested);
        assert_eq!(state, AppState::default());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_happy_path() {
        let (state, _) = apply(AppState::default(), Event::FilesDropped(vec![small_file("a.txt")]));
        let (state, effects) = apply(state, Event::UploadRequested);
        assert_eq!(state.phase, Phase::Uploading);
        let session = state.session;
        assert!(matches!(&effects[..], [Effect::StartUpload { session: s, .. }] if *s == session));

        let (state, effects) = apply(
            state,
            Event::UploadSucceeded {
                session,
                handle: handle("a.txt"),
            },
        );
        assert_eq!(state.phase, Phase::Polling);
        assert_eq!(state.poller_state(), PollerState::Polling);
        assert_eq!(
            effects,
            vec![Effect::StartPolling {
                session,
                handle: handle("a.txt")
            }]
        );

        let (state, effects) = apply(
            state,
            Event::TextExtracted {
                session,
                text: text("a b c"),
            },
        );
        assert_eq!(state.phase, Phase::Analyzing);
        assert_eq!(state.poller_state(), PollerState::Done);
        assert_eq!(
            effects,
            vec![
                Effect::CancelPolling { session },
                Effect::StartAnalysis {
                    session,
                    text: text("a b c")
                }
            ]
        );

        let record = AnalysisRecord {
            risk_score: Some(7.0),
            ..Default::default()
        };
        let (state, effects) = apply(
            state,
            Event::AnalysisReady {
                session,
                record: record.clone(),
            },
        );
        assert_eq!(state.phase, Phase::Analyzed);
        assert_eq!(state.analysis, Some(record));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_text_set_once() {
        let state = polling("a.txt");
        let session = state.session;
        let (state, _) = apply(
            state,
            Event::TextExtracted {
                session,
                text: text("first"),
            },
        );
        let (state, effects) = apply(
            state,
            Event::TextExtracted {
                session,
                text: text("second"),
            },
        );
        assert_eq!(state.extracted.unwrap().content, "first");
        assert!(effects.is_empty());
    }

    #[test]
    fn test_no_rearm_after_done() {
        let state = polling("a.txt");
        let (state, effects) = apply(state, Event::ResumePolling);
        assert_eq!(effects.len(), 1);

        let session = state.session;
        let (state, _) = apply(
            state,
            Event::TextExtracted {
                session,
                text: text("done"),
            },
        );
        let (_, effects) = apply(state, Event::ResumePolling);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_text_cancels_rearmed_poller() {
        // Re-arm lands before the poller's queued text is applied
        let state = polling("a.txt");
        let session = state.session;
        let (state, effects) = apply(state, Event::ResumePolling);
        assert!(matches!(&effects[..], [Effect::StartPolling { .. }]));

        let (_, effects) = apply(
            state,
            Event::TextExtracted {
                session,
                text: text("a"),
            },
        );
        assert_eq!(effects[0], Effect::CancelPolling { session });
    }

    #[test]
    fn test_new_file_supersedes_poll() {
        let state = polling("old.txt");
        let old_session = state.session;

        let (state, effects) = apply(state, Event::FilesDropped(vec![small_file("new.txt")]));
        assert_eq!(
            effects,
            vec![Effect::CancelPolling {
                session: old_session
            }]
        );
        assert!(state.handle.is_none());
        assert_eq!(state.phase, Phase::Idle);

        // A late result for the abandoned upload must not land
        let (state, effects) = apply(
            state,
            Event::TextExtracted {
                session: old_session,
                text: text("stale"),
            },
        );
        assert!(state.extracted.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_rejected_file_keeps_pipeline() {
        let state = polling("a.txt");
        let (state, effects) = apply(state, Event::FilesDropped(vec![big_file()]));
        assert!(effects.is_empty());
        assert_eq!(state.phase, Phase::Polling);
        assert!(state.handle.is_some());
        assert!(state.selected.is_none());
        assert!(state.error.is_some());
    }

    #[test]
    fn test_upload_failure_returns_to_idle() {
        let (state, _) = apply(AppState::default(), Event::FilesDropped(vec![small_file("a.txt")]));
        let (state, _) = apply(state, Event::UploadRequested);
        let session = state.session;
        let (state, effects) = apply(
            state,
            Event::UploadFailed {
                session,
                error: "connection refused".into(),
            },
        );
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.selected.is_some());
        assert!(state.error.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_analysis_failure_stalls() {
        let state = polling("a.txt");
        let session = state.session;
        let (state, _) = apply(
            state,
            Event::TextExtracted {
                session,
                text: text("x"),
            },
        );
        let (state, effects) = apply(
            state,
            Event::AnalysisFailed {
                session,
                error: "bad json".into(),
            },
        );
        assert_eq!(state.phase, Phase::Analyzing);
        assert!(state.analysis.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_teardown_ignores_later_events() {
        let state = polling("a.txt");
        let session = state.session;
        let (state, effects) = apply(state, Event::TornDown);
        assert_eq!(effects, vec![Effect::CancelAll]);
        assert!(state.is_closed());

        let (state, effects) = apply(
            state,
            Event::TextExtracted {
                session,
                text: text("late"),
            },
        );
        assert!(state.extracted.is_none());
        assert!(effects.is_empty());
    }
}
