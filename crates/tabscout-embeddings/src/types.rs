//! Request and response shapes for the embeddings agent.
//!
//! The agent is lenient about what it returns: a proxied failure arrives as a
//! bare `{"error": "..."}` object with no `status`. The raw `*Response` types
//! accept that and the conversions below fold it into typed values.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// POST /process
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct ProcessRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub chunks_processed: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the agent did with a submitted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Accepted for background processing; poll the task id.
    Processing { task_id: String },
    /// Processed synchronously.
    Completed { chunks_processed: u64 },
    /// Refused, with the agent's reason.
    Rejected(String),
}

impl From<ProcessResponse> for ProcessOutcome {
    fn from(raw: ProcessResponse) -> Self {
        match (raw.status.as_deref(), raw.task_id) {
            (Some("processing"), Some(task_id)) => ProcessOutcome::Processing { task_id },
            (Some("success"), _) => ProcessOutcome::Completed {
                chunks_processed: raw.chunks_processed.unwrap_or(0),
            },
            _ => ProcessOutcome::Rejected(
                raw.error
                    .or(raw.message)
                    .unwrap_or_else(|| "agent did not accept the page".to_string()),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// GET /task/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Processing,
    Success,
    Error,
}

impl TaskStatus {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("processing") => TaskStatus::Processing,
            Some("success") => TaskStatus::Success,
            _ => TaskStatus::Error,
        }
    }
}

/// Server-side unit of work created by `POST /process`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingTask {
    pub task_id: String,
    pub status: TaskStatus,
    pub chunks_processed: Option<u64>,
    pub error: Option<String>,
}

impl ProcessingTask {
    /// `true` once the task has left `processing`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status != TaskStatus::Processing
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TaskResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub chunks_processed: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TaskResponse {
    /// Falls back to the id that was asked for when the body omits it.
    pub(crate) fn into_task(self, requested_id: &str) -> ProcessingTask {
        ProcessingTask {
            task_id: self.task_id.unwrap_or_else(|| requested_id.to_string()),
            status: TaskStatus::parse(self.status.as_deref()),
            chunks_processed: self.chunks_processed,
            error: self.error,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /search
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
}

/// One ranked hit from the vector search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub content: String,
    /// Similarity in `[0, 1]`. Older agents omit it.
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_results: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SearchResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

// ---------------------------------------------------------------------------
// POST /preview
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct PreviewRequest<'a> {
    pub url: &'a str,
}

/// Title and first paragraph of a page, as extracted by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagePreview {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_response_becomes_processing_outcome() {
        let raw: ProcessResponse =
            serde_json::from_str(r#"{"status":"processing","task_id":"1717.5"}"#).unwrap();
        assert_eq!(
            ProcessOutcome::from(raw),
            ProcessOutcome::Processing {
                task_id: "1717.5".to_string()
            }
        );
    }

    #[test]
    fn synchronous_success_becomes_completed() {
        let raw: ProcessResponse =
            serde_json::from_str(r#"{"status":"success","chunks_processed":7}"#).unwrap();
        assert_eq!(
            ProcessOutcome::from(raw),
            ProcessOutcome::Completed {
                chunks_processed: 7
            }
        );
    }

    #[test]
    fn error_body_becomes_rejected() {
        let raw: ProcessResponse = serde_json::from_str(r#"{"error":"URL is required"}"#).unwrap();
        assert_eq!(
            ProcessOutcome::from(raw),
            ProcessOutcome::Rejected("URL is required".to_string())
        );
    }

    #[test]
    fn task_without_status_is_an_error_task() {
        let raw: TaskResponse =
            serde_json::from_str(r#"{"error":"connection refused"}"#).unwrap();
        let task = raw.into_task("42");
        assert_eq!(task.task_id, "42");
        assert_eq!(task.status, TaskStatus::Error);
        assert!(task.is_terminal());
        assert_eq!(task.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn processing_task_is_not_terminal() {
        let raw: TaskResponse =
            serde_json::from_str(r#"{"status":"processing","task_id":"9"}"#).unwrap();
        assert!(!raw.into_task("9").is_terminal());
    }

    #[test]
    fn search_response_without_results_defaults_to_empty() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"status":"no_results","message":"No relevant results found"}"#)
                .unwrap();
        assert!(!resp.is_success());
        assert!(resp.results.is_empty());
    }

    #[test]
    fn process_request_omits_missing_html() {
        let body = serde_json::to_value(ProcessRequest {
            url: "https://example.com",
            html_content: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"url": "https://example.com"}));
    }
}
