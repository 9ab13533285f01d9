use thiserror::Error;

/// Errors returned by the embeddings agent client.
#[derive(Debug, Error)]
pub enum EmbeddingsError {
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

    /// Non-2xx response without an `{"error": ...}` body.
    #[error("unexpected HTTP status {status} from {context}")]
    UnexpectedStatus { status: u16, context: String },

    /// The agent refused the request and said why.
    #[error("{0}")]
    Rejected(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The task was still `processing` when the poll budget ran out.
    #[error("task {task_id} still processing after {attempts} status checks")]
    PollLimit { task_id: String, attempts: u32 },

    #[error("polling for task {task_id} was cancelled")]
    Cancelled { task_id: String },
}
