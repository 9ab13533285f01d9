use serde::{Deserialize, Serialize};

/// A request sent to the relay, tagged by its `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayMessage {
    ValidateText,
    GetPageText,
    /// Any type no responder recognises.
    #[serde(other)]
    Other,
}

/// A responder's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Ack { status: String },
    PageText { text: String },
}

impl Reply {
    #[must_use]
    pub fn received() -> Self {
        Reply::Ack {
            status: "received".to_string(),
        }
    }
}
