//! Extraction of the analysis JSON from a chat completion.

use serde::Deserialize;
use serde_json::Value;

use super::AnalysisError;
use crate::models::AnalysisRecord;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Strip markdown code fences and newlines from completion content.
pub fn clean_completion_content(content: &str) -> String {
    content
        .replace("```json", "")
        .replace("```", "")
        .replace('\n', "")
}

/// Parse `choices[0].message.content` of a completion into an analysis record.
pub fn parse_completion(response: &Value) -> Result<AnalysisRecord, AnalysisError> {
    match response.as_object() {
        Some(obj) if !obj.is_empty() => {}
        _ => return Err(AnalysisError::EmptyResponse),
    }

    let completion: ChatCompletion =
        serde_json::from_value(response.clone()).map_err(|_| AnalysisError::MissingContent)?;
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(AnalysisError::MissingContent)?;

    let cleaned = clean_completion_content(&content);
    Ok(serde_json::from_str(&cleaned)?)
}
