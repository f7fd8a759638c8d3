//! Analysis output and user-facing error models.

use serde::{Deserialize, Serialize};

/// Structured analysis of a document's text.
///
/// Every field is optional; a partial record is still a valid result.
/// Older analysis prompts answer with `score` and `sketchyClauses`, which are
/// accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    #[serde(default, alias = "score", skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_points: Option<Vec<String>>,
    #[serde(
        default,
        alias = "sketchyClauses",
        skip_serializing_if = "Option::is_none"
    )]
    pub flagged_clauses: Option<Vec<String>>,
}

impl AnalysisRecord {
    /// Check whether the record carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.risk_score.is_none() && self.summary_points.is_none() && self.flagged_clauses.is_none()
    }
}

/// Error message shown in the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub message: String,
}

impl ErrorState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record() {
        let record: AnalysisRecord = serde_json::from_str(r#"{"riskScore":7}"#).unwrap();
        assert_eq!(record.risk_score, Some(7.0));
        assert!(record.summary_points.is_none());
        assert!(!record.is_empty());
    }

    #[test]
    fn test_legacy_field_names() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{"score":3,"summaryPoints":["short term"],"sketchyClauses":["auto renewal"]}"#,
        )
        .unwrap();
        assert_eq!(record.risk_score, Some(3.0));
        assert_eq!(record.summary_points.unwrap(), vec!["short term"]);
        assert_eq!(record.flagged_clauses.unwrap(), vec!["auto renewal"]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = AnalysisRecord {
            risk_score: Some(2.5),
            summary_points: None,
            flagged_clauses: Some(vec!["indemnity".to_string()]),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"riskScore": 2.5, "flaggedClauses": ["indemnity"]})
        );
    }
}
