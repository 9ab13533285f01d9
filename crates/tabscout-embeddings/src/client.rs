//! HTTP client for the embeddings agent's JSON API.
//!
//! Wraps `reqwest` with agent-specific error handling and typed response
//! deserialization. Non-2xx responses that carry an `{"error": ...}` body are
//! surfaced as [`EmbeddingsError::Rejected`] so the caller can show the
//! agent's own message.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::EmbeddingsError;
use crate::types::{
    PagePreview, PreviewRequest, ProcessOutcome, ProcessRequest, ProcessResponse, ProcessingTask,
    SearchRequest, SearchResponse, TaskResponse,
};

/// Client for the local embeddings agent.
///
/// Use [`AgentClient::new`] with the agent's base URL; tests point it at a
/// wiremock server.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl AgentClient {
    /// Creates a client for the agent at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`EmbeddingsError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, EmbeddingsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| EmbeddingsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(EmbeddingsError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Submits a page for chunking and embedding.
    ///
    /// `html_content` is the serialized document when the caller captured it;
    /// otherwise the agent downloads `url` itself.
    ///
    /// # Errors
    ///
    /// - [`EmbeddingsError::Http`] on network failure.
    /// - [`EmbeddingsError::UnexpectedStatus`] on a non-2xx status without an error body.
    /// - [`EmbeddingsError::Deserialize`] if the body is not the expected JSON.
    pub async fn process(
        &self,
        url: &str,
        html_content: Option<&str>,
    ) -> Result<ProcessOutcome, EmbeddingsError> {
        let endpoint = self.endpoint(&["process"]);
        tracing::debug!(%url, with_html = html_content.is_some(), "submitting page to agent");
        let response = self
            .client
            .post(endpoint)
            .json(&ProcessRequest { url, html_content })
            .send()
            .await?;

        match decode::<ProcessResponse>(response, "POST /process").await {
            Ok(raw) => Ok(raw.into()),
            Err(EmbeddingsError::Rejected(message)) => Ok(ProcessOutcome::Rejected(message)),
            Err(e) => Err(e),
        }
    }

    /// Fetches the current state of a processing task.
    ///
    /// # Errors
    ///
    /// - [`EmbeddingsError::Http`] on network failure.
    /// - [`EmbeddingsError::Rejected`] / [`EmbeddingsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`EmbeddingsError::Deserialize`] if the body is not the expected JSON.
    pub async fn task_status(&self, task_id: &str) -> Result<ProcessingTask, EmbeddingsError> {
        let endpoint = self.endpoint(&["task", task_id]);
        let response = self.client.get(endpoint).send().await?;
        let raw: TaskResponse = decode(response, &format!("GET /task/{task_id}")).await?;
        Ok(raw.into_task(task_id))
    }

    /// Runs a similarity search over previously saved pages.
    ///
    /// # Errors
    ///
    /// - [`EmbeddingsError::Http`] on network failure.
    /// - [`EmbeddingsError::Rejected`] / [`EmbeddingsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`EmbeddingsError::Deserialize`] if the body is not the expected JSON.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, EmbeddingsError> {
        let endpoint = self.endpoint(&["search"]);
        let response = self
            .client
            .post(endpoint)
            .json(&SearchRequest { query })
            .send()
            .await?;
        decode(response, "POST /search").await
    }

    /// Asks the agent for a page's title and lead paragraph.
    ///
    /// # Errors
    ///
    /// - [`EmbeddingsError::Http`] on network failure.
    /// - [`EmbeddingsError::Rejected`] / [`EmbeddingsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`EmbeddingsError::Deserialize`] if the body is not the expected JSON.
    pub async fn preview(&self, url: &str) -> Result<PagePreview, EmbeddingsError> {
        let endpoint = self.endpoint(&["preview"]);
        let response = self
            .client
            .post(endpoint)
            .json(&PreviewRequest { url })
            .send()
            .await?;
        decode(response, "POST /preview").await
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Reads the body, maps non-2xx statuses to errors, and parses JSON.
async fn decode<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, EmbeddingsError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        if let Ok(err) = serde_json::from_str::<ErrorBody>(&body) {
            return Err(EmbeddingsError::Rejected(err.error));
        }
        return Err(EmbeddingsError::UnexpectedStatus {
            status: status.as_u16(),
            context: context.to_string(),
        });
    }

    serde_json::from_str(&body).map_err(|e| EmbeddingsError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
