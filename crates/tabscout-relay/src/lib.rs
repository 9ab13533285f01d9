//! Message relay between the page context and the extension.
//!
//! Two passive responders answer requests from the active tab:
//! [`BackgroundResponder`] acknowledges `VALIDATE_TEXT` and
//! [`ContentResponder`] returns the current selection for `GET_PAGE_TEXT`.
//! [`Relay`] delivers each message to every registered responder and hands
//! back the first reply.

pub mod error;
pub mod message;
pub mod relay;
pub mod responder;

pub use error::RelayError;
pub use message::{RelayMessage, Reply};
pub use relay::Relay;
pub use responder::{
    BackgroundResponder, Channel, ContentResponder, FixedSelection, ReplyHandle, Responder,
    SelectionSource,
};
