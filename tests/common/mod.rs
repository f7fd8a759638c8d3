//! Shared helpers for pipeline tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use docsense::http_client::{Transport, TransportError};
use serde_json::{json, Value};
use tokio::time::Instant;

pub const UPLOAD_PATH: &str = "/api/upload";
pub const ANALYSIS_PATH: &str = "/api/getDocumentData";

/// A request observed by the scripted transport.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
    pub at: Instant,
}

type Reply = Result<Value, TransportError>;

/// In-memory transport with scripted replies.
///
/// Upload and analysis replies are consumed in order. Results replies are
/// scripted per URL and the last one repeats once the script runs out.
#[derive(Default)]
pub struct ScriptedTransport {
    uploads: Mutex<VecDeque<Reply>>,
    analyses: Mutex<VecDeque<Reply>>,
    results: Mutex<HashMap<String, VecDeque<Reply>>>,
    get_latency: Mutex<Duration>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_upload(&self, reply: Reply) {
        self.uploads.lock().unwrap().push_back(reply);
    }

    pub fn push_analysis(&self, reply: Reply) {
        self.analyses.lock().unwrap().push_back(reply);
    }

    pub fn script_results(&self, url: &str, replies: Vec<Reply>) {
        self.results
            .lock()
            .unwrap()
            .insert(url.to_string(), replies.into());
    }

    /// Make every GET take `latency` before answering.
    pub fn set_get_latency(&self, latency: Duration) {
        *self.get_latency.lock().unwrap() = latency;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn gets_to(&self, url: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == "GET" && c.url == url)
            .collect()
    }

    pub fn posts_to(&self, url: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == "POST" && c.url == url)
            .collect()
    }

    fn record(&self, method: &'static str, url: &str, body: Option<&Value>) {
        self.calls.lock().unwrap().push(Call {
            method,
            url: url.to_string(),
            body: body.cloned(),
            at: Instant::now(),
        });
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        self.record("POST", url, Some(body));
        let queue = match url {
            UPLOAD_PATH => &self.uploads,
            ANALYSIS_PATH => &self.analyses,
            _ => {
                return Err(TransportError::Status {
                    status: 404,
                    body: url.to_string(),
                })
            }
        };
        let reply = queue.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(TransportError::Connection("no scripted reply".into())))
    }

    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.record("GET", url, None);
        let latency = *self.get_latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut results = self.results.lock().unwrap();
        let Some(queue) = results.get_mut(url) else {
            return Err(TransportError::Status {
                status: 404,
                body: url.to_string(),
            });
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Ok(json!({"text": []})))
        }
    }
}

/// Upload endpoint reply pointing at `location`.
pub fn upload_reply(location: &str) -> Reply {
    Ok(json!({ "url": location }))
}

/// Results reply carrying `lines`.
pub fn text_reply(lines: &[&str]) -> Reply {
    Ok(json!({ "text": lines }))
}

/// Chat-completion reply whose content is `content`.
pub fn completion_reply(content: &str) -> Reply {
    Ok(json!({
        "id": "chatcmpl-test",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    }))
}

pub fn results_url(location: &str) -> String {
    format!("{}-results.json", location)
}
