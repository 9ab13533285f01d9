//! Responders and the reply channel they answer through.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::message::{RelayMessage, Reply};

/// Whether a responder may still reply after `respond` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Closed,
    /// The responder keeps its [`ReplyHandle`] and may answer later.
    KeepOpen,
}

/// One-shot reply slot shared by every responder of a message.
///
/// Only the first [`ReplyHandle::send`] is delivered.
#[derive(Debug, Clone)]
pub struct ReplyHandle {
    slot: Arc<Mutex<Option<oneshot::Sender<Reply>>>>,
}

impl ReplyHandle {
    pub(crate) fn new(sender: oneshot::Sender<Reply>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(sender))),
        }
    }

    /// Delivers `reply`. Returns `false` if another responder already replied
    /// or the requester stopped waiting.
    pub fn send(&self, reply: Reply) -> bool {
        let sender = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match sender {
            Some(sender) => sender.send(reply).is_ok(),
            None => false,
        }
    }
}

pub trait Responder: Send + Sync {
    fn respond(&self, message: &RelayMessage, reply: ReplyHandle) -> Channel;
}

/// Acknowledges `VALIDATE_TEXT` requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct BackgroundResponder;

impl Responder for BackgroundResponder {
    fn respond(&self, message: &RelayMessage, reply: ReplyHandle) -> Channel {
        if *message == RelayMessage::ValidateText {
            tracing::debug!("acknowledging VALIDATE_TEXT");
            reply.send(Reply::received());
        }
        Channel::KeepOpen
    }
}

/// Read access to the user's current text selection in the page.
pub trait SelectionSource: Send + Sync {
    fn selected_text(&self) -> Option<String>;
}

/// A selection fixed at construction time.
#[derive(Debug, Default, Clone)]
pub struct FixedSelection(pub Option<String>);

impl SelectionSource for FixedSelection {
    fn selected_text(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Answers `GET_PAGE_TEXT` with the current selection, or `""` when none.
#[derive(Debug, Clone)]
pub struct ContentResponder<S> {
    selection: S,
}

impl<S: SelectionSource> ContentResponder<S> {
    pub fn new(selection: S) -> Self {
        Self { selection }
    }
}

impl<S: SelectionSource> Responder for ContentResponder<S> {
    fn respond(&self, message: &RelayMessage, reply: ReplyHandle) -> Channel {
        if *message == RelayMessage::GetPageText {
            let text = self.selection.selected_text().unwrap_or_default();
            tracing::debug!(chars = text.chars().count(), "returning page selection");
            reply.send(Reply::PageText { text });
        }
        Channel::KeepOpen
    }
}
