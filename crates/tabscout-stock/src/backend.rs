//! HTTP client for the local stock-analysis backend.
//!
//! The backend hands out the generative-language credential, stores raw model
//! responses, and turns free-text model output into structured data. Its
//! error bodies are not meaningful to users, so non-2xx statuses are reported
//! as [`StockError::Backend`] naming the step that failed.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::StockError;
use crate::types::{
    AnalysisContext, AnalysisResponse, AnalysisTable, ApiKeyResponse, DatesResponse,
    ExtractAnalysisRequest, ExtractDatesRequest, LogRequest,
};

/// Client for the local backend (default `http://localhost:5000`).
#[derive(Debug, Clone)]
pub struct StockBackend {
    client: Client,
    base_url: Url,
}

impl StockBackend {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StockError::InvalidBaseUrl`] if `base_url`
    /// is not an absolute http(s) URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, StockError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetches the generative-language credential for one analysis run.
    ///
    /// # Errors
    ///
    /// - [`StockError::Backend`] on a non-2xx status.
    /// - [`StockError::Http`] on network failure.
    /// - [`StockError::Deserialize`] if the body lacks `api_key`.
    pub async fn api_key(&self) -> Result<AnalysisContext, StockError> {
        let response = self.client.get(self.endpoint("api-key")).send().await?;
        let body: ApiKeyResponse =
            decode(response, "GET /api-key", "Failed to fetch API key").await?;
        Ok(AnalysisContext::new(body.api_key))
    }

    /// Stores a raw model response for later inspection.
    ///
    /// # Errors
    ///
    /// - [`StockError::Backend`] on a non-2xx status.
    /// - [`StockError::Http`] on network failure.
    pub async fn log_response(&self, stock_symbol: &str, response: &str) -> Result<(), StockError> {
        let resp = self
            .client
            .post(self.endpoint("log-response"))
            .json(&LogRequest {
                stock_symbol,
                response,
            })
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(StockError::Backend(format!(
                "Failed to log response: HTTP {}",
                resp.status().as_u16()
            )));
        }
        Ok(())
    }

    /// Extracts the significant dates mentioned in the news text.
    ///
    /// # Errors
    ///
    /// - [`StockError::Backend`] (`"Failed to extract dates"`) on a non-2xx status.
    /// - [`StockError::Http`] on network failure.
    /// - [`StockError::Deserialize`] if the body lacks `dates`.
    pub async fn extract_dates(&self, news_data: &str) -> Result<Vec<String>, StockError> {
        let response = self
            .client
            .post(self.endpoint("extract-dates"))
            .json(&ExtractDatesRequest { news_data })
            .send()
            .await?;
        let body: DatesResponse =
            decode(response, "POST /extract-dates", "Failed to extract dates").await?;
        Ok(body.dates)
    }

    /// Extracts the per-date movement table from the analysis text.
    ///
    /// # Errors
    ///
    /// - [`StockError::Backend`] (`"Failed to extract analysis data"`) on a non-2xx status.
    /// - [`StockError::Http`] on network failure.
    /// - [`StockError::Deserialize`] if the body lacks `analysis_data`.
    pub async fn extract_analysis(&self, analysis_text: &str) -> Result<AnalysisTable, StockError> {
        let response = self
            .client
            .post(self.endpoint("extract-analysis"))
            .json(&ExtractAnalysisRequest { analysis_text })
            .send()
            .await?;
        let body: AnalysisResponse = decode(
            response,
            "POST /extract-analysis",
            "Failed to extract analysis data",
        )
        .await?;
        Ok(body.analysis_data)
    }

    fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `parse_base_url`: the base URL can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(segment);
        }
        url
    }
}

/// Parses a base URL, normalising it to end with exactly one slash.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, StockError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let parsed = Url::parse(&normalised).map_err(|e| StockError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.cannot_be_a_base() {
        return Err(StockError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "URL cannot carry a path".to_string(),
        });
    }
    Ok(parsed)
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    context: &str,
    failure: &str,
) -> Result<T, StockError> {
    if !response.status().is_success() {
        tracing::warn!(
            status = response.status().as_u16(),
            endpoint = context,
            "backend request failed"
        );
        return Err(StockError::Backend(failure.to_string()));
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| StockError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_segment_to_base() {
        let backend = StockBackend::new("http://localhost:5000", 30, "tabscout-test/0.1").unwrap();
        assert_eq!(
            backend.endpoint("extract-dates").as_str(),
            "http://localhost:5000/extract-dates"
        );
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(StockError::InvalidBaseUrl { .. })
        ));
    }
}
