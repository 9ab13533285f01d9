//! Client for the local page-embeddings agent.
//!
//! Submits the active page for asynchronous chunking and indexing, polls the
//! resulting task to completion, and runs similarity searches. Every action
//! renders the HTML fragment shown in the results area.

pub mod client;
pub mod error;
pub mod page;
pub mod poll;
pub mod popup;
pub mod render;
pub mod types;

pub use client::AgentClient;
pub use error::EmbeddingsError;
pub use page::{ActivePage, FetchedPage, PageSource, StaticPage};
pub use poll::{poll_task, PollPolicy};
pub use popup::EmbeddingsPopup;
pub use types::{
    PagePreview, ProcessOutcome, ProcessingTask, SearchResponse, SearchResult, TaskStatus,
};

pub use tokio_util::sync::CancellationToken;
