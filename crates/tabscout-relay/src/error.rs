use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid relay message: {0}")]
    Decode(#[from] serde_json::Error),
}
