//! Fire-and-forget storage of raw model responses.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinSet;

use crate::backend::StockBackend;

/// Posts model responses to the backend's `/log-response` on spawned tasks.
///
/// A failed upload is reported through `tracing` and never reaches the
/// caller. Finished uploads are reaped on each [`ResponseLogger::log`].
/// Uploads still running when the logger is dropped are aborted; call
/// [`ResponseLogger::flush`] before shutting down to let them finish.
#[derive(Debug, Clone)]
pub struct ResponseLogger {
    backend: StockBackend,
    pending: Arc<Mutex<JoinSet<()>>>,
}

impl ResponseLogger {
    #[must_use]
    pub fn new(backend: StockBackend) -> Self {
        Self {
            backend,
            pending: Arc::new(Mutex::new(JoinSet::new())),
        }
    }

    /// Spawns the upload and returns immediately.
    pub fn log(&self, stock_symbol: &str, response: &str) {
        let backend = self.backend.clone();
        let stock_symbol = stock_symbol.to_string();
        let response = response.to_string();
        let mut pending = self.pending();
        while let Some(joined) = pending.try_join_next() {
            if let Err(e) = joined {
                tracing::warn!(error = %e, "response log task did not complete");
            }
        }
        pending.spawn(async move {
            match backend.log_response(&stock_symbol, &response).await {
                Ok(()) => tracing::debug!(symbol = %stock_symbol, "model response logged"),
                Err(e) => tracing::warn!(
                    symbol = %stock_symbol,
                    error = %e,
                    "failed to log model response"
                ),
            }
        });
    }

    /// Waits for every upload spawned so far.
    pub async fn flush(&self) {
        let mut uploads = std::mem::take(&mut *self.pending());
        while let Some(joined) = uploads.join_next().await {
            if let Err(e) = joined {
                tracing::warn!(error = %e, "response log task did not complete");
            }
        }
    }

    /// Uploads spawned and not yet reaped.
    #[must_use]
    pub fn pending_uploads(&self) -> usize {
        self.pending().len()
    }

    fn pending(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
