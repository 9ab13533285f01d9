use thiserror::Error;

/// Errors returned by the stock analysis clients and pipeline.
#[derive(Debug, Error)]
pub enum StockError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-2xx from the generative-language API; `body` is its error text.
    #[error("{context} returned {status}\nDetails: {body}")]
    UnexpectedStatus {
        context: String,
        status: u16,
        body: String,
    },

    /// The local backend failed a step; the message names the step.
    #[error("{0}")]
    Backend(String),

    #[error("generative-language response contained no candidate text")]
    EmptyResponse,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to fetch stock {symbol} news: {source}")]
    News {
        symbol: String,
        #[source]
        source: Box<StockError>,
    },

    #[error("Failed to analyze stock movements: {0}")]
    Movements(#[source] Box<StockError>),
}
