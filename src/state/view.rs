//! Display regions derived from state.

use super::{AppState, Phase};
use crate::models::AnalysisRecord;

/// Hint shown while a drag hovers over the drop zone.
pub const DRAG_ACTIVE_TEXT: &str = "Drop the files here ...";

/// Prompt shown when no file is selected.
pub const PLACEHOLDER_TEXT: &str = "Drag and drop some files here, or click to select files";

/// What the drop zone says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    DragActive,
    Selected(String),
    Placeholder,
}

impl Prompt {
    pub fn text(&self) -> &str {
        match self {
            Self::DragActive => DRAG_ACTIVE_TEXT,
            Self::Selected(name) => name.as_str(),
            Self::Placeholder => PLACEHOLDER_TEXT,
        }
    }
}

/// The upload form, always rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub prompt: Prompt,
    /// Validation message, shown in an alert color.
    pub error: Option<String>,
}

/// Everything the view layer renders for a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Regions {
    pub form: UploadForm,
    /// Show the loading indicator.
    pub loading: bool,
    /// Analysis panel contents, once available.
    pub analysis: Option<AnalysisRecord>,
    /// Document viewer URL, when the viewer is visible.
    pub viewer: Option<String>,
}

/// Derive the display regions.
///
/// The viewer is hidden while a document is being processed and shown again
/// next to the analysis once it arrives.
pub fn regions(state: &AppState, viewer_url: &str) -> Regions {
    let prompt = if state.drag_active {
        Prompt::DragActive
    } else if let Some(file) = &state.selected {
        Prompt::Selected(file.name.clone())
    } else {
        Prompt::Placeholder
    };

    let loading =
        matches!(state.phase, Phase::Polling | Phase::Analyzing) && state.analysis.is_none();

    let viewer = match state.phase {
        Phase::Idle | Phase::Analyzed => Some(viewer_url.to_string()),
        Phase::Uploading | Phase::Polling | Phase::Analyzing | Phase::Closed => None,
    };

    Regions {
        form: UploadForm {
            prompt,
            error: state.error.as_ref().map(|e| e.message.clone()),
        },
        loading,
        analysis: state.analysis.clone(),
        viewer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorState, ExtractedText, SelectedFile, UploadHandle};

    const VIEWER: &str = "https://docs.example.com/sample.pdf";

    #[test]
    fn test_initial_regions() {
        let regions = regions(&AppState::default(), VIEWER);
        assert_eq!(regions.form.prompt, Prompt::Placeholder);
        assert_eq!(regions.form.prompt.text(), PLACEHOLDER_TEXT);
        assert!(regions.form.error.is_none());
        assert!(!regions.loading);
        assert!(regions.analysis.is_none());
        assert_eq!(regions.viewer.as_deref(), Some(VIEWER));
    }

    #[test]
    fn test_prompt_priority() {
        let mut state = AppState {
            selected: Some(SelectedFile::new("lease.pdf", "application/pdf", vec![1, 2])),
            ..Default::default()
        };
        assert_eq!(
            regions(&state, VIEWER).form.prompt,
            Prompt::Selected("lease.pdf".into())
        );

        state.drag_active = true;
        assert_eq!(regions(&state, VIEWER).form.prompt.text(), DRAG_ACTIVE_TEXT);
    }

    #[test]
    fn test_error_shown() {
        let state = AppState {
            error: Some(ErrorState::new("too big")),
            ..Default::default()
        };
        assert_eq!(regions(&state, VIEWER).form.error.as_deref(), Some("too big"));
    }

    #[test]
    fn test_loading_hides_viewer() {
        let state = AppState {
            phase: Phase::Polling,
            handle: Some(UploadHandle::from_location("u", "-results.json")),
            ..Default::default()
        };
        let r = regions(&state, VIEWER);
        assert!(r.loading);
        assert!(r.viewer.is_none());

        let state = AppState {
            phase: Phase::Analyzing,
            extracted: Some(ExtractedText {
                content: "x".into(),
            }),
            ..state
        };
        let r = regions(&state, VIEWER);
        assert!(r.loading);
        assert!(r.viewer.is_none());
    }

    #[test]
    fn test_analyzed_shows_panel_and_viewer() {
        let state = AppState {
            phase: Phase::Analyzed,
            analysis: Some(AnalysisRecord {
                risk_score: Some(2.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let r = regions(&state, VIEWER);
        assert!(!r.loading);
        assert_eq!(r.analysis.unwrap().risk_score, Some(2.0));
        assert_eq!(r.viewer.as_deref(), Some(VIEWER));
    }
}
