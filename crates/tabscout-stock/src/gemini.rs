//! Client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::backend::parse_base_url;
use crate::error::StockError;
use crate::types::{AnalysisContext, GenerateRequest, GenerateResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: Url,
    model: String,
}

impl GeminiClient {
    /// Creates a client for the public API with the default model.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, StockError> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_MODEL, timeout_secs)
    }

    /// Creates a client with a custom base URL and model (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StockError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, StockError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            model: model.to_string(),
        })
    }

    /// Sends `prompt` and returns the text of the first candidate.
    ///
    /// # Errors
    ///
    /// - [`StockError::UnexpectedStatus`] on a non-2xx status, carrying the response body.
    /// - [`StockError::Http`] on network failure.
    /// - [`StockError::Deserialize`] if the body is not JSON.
    /// - [`StockError::EmptyResponse`] if no candidate text is present.
    pub async fn generate(&self, ctx: &AnalysisContext, prompt: &str) -> Result<String, StockError> {
        let url = self.build_url(ctx);
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "calling generateContent");

        let response = self
            .client
            .post(url)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "generateContent failed");
            return Err(StockError::UnexpectedStatus {
                context: format!("{} generateContent", self.model),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| StockError::Deserialize {
                context: format!("{} generateContent", self.model),
                source: e,
            })?;
        parsed.into_text().ok_or(StockError::EmptyResponse)
    }

    /// `{base}/v1beta/models/{model}:generateContent?key={key}`
    fn build_url(&self, ctx: &AnalysisContext) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push("v1beta")
                .push("models")
                .push(&format!("{}:generateContent", self.model));
        }
        url.query_pairs_mut().append_pair("key", ctx.api_key());
        url
    }
}
