//! Delivery of one message to every registered responder.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::RelayError;
use crate::message::{RelayMessage, Reply};
use crate::responder::{Channel, ReplyHandle, Responder};

const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Relay {
    responders: Vec<Box<dyn Responder>>,
    reply_timeout: Duration,
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}

impl Relay {
    #[must_use]
    pub fn new() -> Self {
        Self {
            responders: Vec::new(),
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_responder(mut self, responder: impl Responder + 'static) -> Self {
        self.responders.push(Box::new(responder));
        self
    }

    /// How long to wait for a responder that kept the channel open.
    #[must_use]
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// Delivers `message` to every responder and returns the first reply.
    ///
    /// `None` means nobody answered: every responder closed the channel
    /// without replying, every handle was dropped, or the timeout elapsed.
    pub async fn dispatch(&self, message: &RelayMessage) -> Option<Reply> {
        let (tx, mut rx) = oneshot::channel();
        let handle = ReplyHandle::new(tx);

        let mut keep_open = false;
        for responder in &self.responders {
            if responder.respond(message, handle.clone()) == Channel::KeepOpen {
                keep_open = true;
            }
        }
        drop(handle);

        if !keep_open {
            return rx.try_recv().ok();
        }

        match tokio::time::timeout(self.reply_timeout, rx).await {
            Ok(Ok(reply)) => Some(reply),
            Ok(Err(_)) => None,
            Err(_) => {
                tracing::warn!(?message, "no reply before timeout");
                None
            }
        }
    }

    /// Decodes a JSON message and dispatches it.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Decode`] if `raw` is not a relay message.
    pub async fn dispatch_json(&self, raw: &str) -> Result<Option<Reply>, RelayError> {
        let message: RelayMessage = serde_json::from_str(raw)?;
        Ok(self.dispatch(&message).await)
    }
}
