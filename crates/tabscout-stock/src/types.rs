//! Wire and domain types for the stock analysis flow.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Credential scoped to one analysis run.
///
/// Obtained from the backend's `/api-key` endpoint and passed explicitly to
/// every generative-language call of the run.
#[derive(Clone)]
pub struct AnalysisContext {
    api_key: String,
}

impl AnalysisContext {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for AnalysisContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisContext")
            .field("api_key", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

/// One news entry as the model is asked to produce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: NaiveDate,
    pub title: String,
    pub summary: String,
    pub impact: Impact,
}

/// Per-date movement analysis extracted by the backend.
///
/// Values are free text from the model (e.g. `"Up 3%"`), kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRow {
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub movement: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub correlation: String,
    #[serde(default)]
    pub sentiment: String,
}

/// Analysis rows keyed by `YYYY-MM-DD`; iteration is chronological.
pub type AnalysisTable = BTreeMap<String, AnalysisRow>;

// ---------------------------------------------------------------------------
// Local backend
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ApiKeyResponse {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LogRequest<'a> {
    pub stock_symbol: &'a str,
    pub response: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtractDatesRequest<'a> {
    pub news_data: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatesResponse {
    pub dates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtractAnalysisRequest<'a> {
    pub analysis_text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisResponse {
    pub analysis_data: AnalysisTable,
}

// ---------------------------------------------------------------------------
// generateContent
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    pub(crate) fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: Content,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    pub(crate) fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_debug_redacts_key() {
        let ctx = AnalysisContext::new("secret-key");
        let debug = format!("{ctx:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn generate_request_wraps_prompt() {
        let body = serde_json::to_value(GenerateRequest::from_prompt("hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn generate_response_yields_first_text() {
        let resp: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "first"}, {"text": "second"}]}}]
        }))
        .unwrap();
        assert_eq!(resp.into_text().as_deref(), Some("first"));
    }

    #[test]
    fn generate_response_without_candidates_yields_none() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_text().is_none());
    }

    #[test]
    fn analysis_table_iterates_by_date() {
        let resp: AnalysisResponse = serde_json::from_value(serde_json::json!({
            "analysis_data": {
                "2021-08-20": {"impact": "Negative"},
                "2021-08-03": {"impact": "Positive"}
            }
        }))
        .unwrap();
        let dates: Vec<&str> = resp.analysis_data.keys().map(String::as_str).collect();
        assert_eq!(dates, vec!["2021-08-03", "2021-08-20"]);
    }
}
