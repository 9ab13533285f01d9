//! The save/search actions behind the embeddings popup.
//!
//! Each action returns the HTML that replaces the results area. Failures are
//! rendered inline as `Error: <message>`; nothing is retried.

use tokio_util::sync::CancellationToken;

use crate::client::AgentClient;
use crate::page::PageSource;
use crate::poll::{poll_task, PollPolicy};
use crate::render;
use crate::types::ProcessOutcome;

pub struct EmbeddingsPopup {
    agent: AgentClient,
    policy: PollPolicy,
}

impl EmbeddingsPopup {
    #[must_use]
    pub fn new(agent: AgentClient, policy: PollPolicy) -> Self {
        Self { agent, policy }
    }

    /// Saves the active page.
    ///
    /// `on_progress` receives the interim "processing" fragment when the agent
    /// queues the page; the returned fragment is the final state.
    pub async fn save<P, F>(&self, page: &P, cancel: &CancellationToken, mut on_progress: F) -> String
    where
        P: PageSource,
        F: FnMut(&str),
    {
        let page = match page.active_page().await {
            Ok(page) => page,
            Err(e) => return render::render_error(e),
        };

        let outcome = match self
            .agent
            .process(&page.url, page.html_content.as_deref())
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(url = %page.url, error = %e, "page submission failed");
                return render::render_error(e);
            }
        };

        match outcome {
            ProcessOutcome::Processing { task_id } => {
                tracing::info!(url = %page.url, %task_id, "page queued for processing");
                on_progress(&render::render_processing());
                match poll_task(&self.agent, &task_id, self.policy, cancel).await {
                    Ok(task) => render::render_task_outcome(&task),
                    Err(e) => render::render_error(e),
                }
            }
            ProcessOutcome::Completed { chunks_processed } => {
                render::render_saved(chunks_processed)
            }
            ProcessOutcome::Rejected(message) => render::render_error(message),
        }
    }

    /// Searches saved pages.
    ///
    /// Returns `None`, without touching the network, when `query` is blank.
    pub async fn search(&self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let rendered = match self.agent.search(query).await {
            Ok(response) if response.is_success() => {
                tracing::info!(query, hits = response.results.len(), "search complete");
                render::render_search_results(&response.results)
            }
            Ok(response) => {
                let message = response
                    .message
                    .or(response.error)
                    .unwrap_or_else(|| "No relevant results found".to_string());
                render::render_message(&message)
            }
            Err(e) => render::render_error(e),
        };
        Some(rendered)
    }

    /// Shows the agent's title and lead paragraph for `url`.
    pub async fn preview(&self, url: &str) -> String {
        match self.agent.preview(url).await {
            Ok(preview) => render::render_preview(url, &preview),
            Err(e) => render::render_error(e),
        }
    }
}
