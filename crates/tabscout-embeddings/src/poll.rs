//! Bounded, cancellable polling of an agent task.
//!
//! [`poll_task`] checks `GET /task/{id}` until the task leaves `processing`,
//! sleeping [`PollPolicy::interval`] between checks. It gives up after
//! [`PollPolicy::max_attempts`] checks and stops early when the caller's
//! [`CancellationToken`] fires.

use std::time::Duration;

use tabscout_core::AppConfig;
use tokio_util::sync::CancellationToken;

use crate::client::AgentClient;
use crate::error::EmbeddingsError;
use crate::types::ProcessingTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between consecutive status checks.
    pub interval: Duration,
    /// Total number of status checks, including the first.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 120,
        }
    }
}

impl PollPolicy {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.poll_interval_ms),
            max_attempts: config.poll_max_attempts.max(1),
        }
    }
}

/// Polls `task_id` until it reaches a terminal status.
///
/// Returns the terminal task (`success` or `error`). A terminal answer is
/// never followed by another request.
///
/// # Errors
///
/// - [`EmbeddingsError::PollLimit`] if the task is still processing after
///   `policy.max_attempts` checks.
/// - [`EmbeddingsError::Cancelled`] if `cancel` fires while waiting.
/// - Any error from [`AgentClient::task_status`].
pub async fn poll_task(
    client: &AgentClient,
    task_id: &str,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> Result<ProcessingTask, EmbeddingsError> {
    let cancelled = || EmbeddingsError::Cancelled {
        task_id: task_id.to_string(),
    };

    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let task = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled()),
            result = client.task_status(task_id) => result?,
        };

        if task.is_terminal() {
            tracing::info!(
                task_id,
                attempt,
                status = ?task.status,
                "task reached terminal status"
            );
            return Ok(task);
        }

        if attempt >= policy.max_attempts {
            tracing::warn!(task_id, attempt, "task still processing; giving up");
            return Err(EmbeddingsError::PollLimit {
                task_id: task_id.to_string(),
                attempts: attempt,
            });
        }

        tracing::debug!(
            task_id,
            attempt,
            delay_ms = u64::try_from(policy.interval.as_millis()).unwrap_or(u64::MAX),
            "task still processing"
        );
        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(cancelled()),
            () = tokio::time::sleep(policy.interval) => {}
        }
    }
}
