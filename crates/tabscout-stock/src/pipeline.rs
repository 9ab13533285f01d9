//! Stock analysis orchestration.
//!
//! One run walks these stages in order, stopping at the first failure:
//!
//! 1. Fetch a month of news for the symbol from the model.
//! 2. Log the raw answer (spawned; never blocks or fails the run).
//! 3. Extract significant dates via the backend.
//! 4. Ask the model how the stock moved on those dates, log that answer.
//! 5. Extract the per-date table via the backend and render it.
//!
//! Progress is appended to an [`AnalysisOutput`]. A failure replaces the
//! output with `Error: <message>`. The loading flag is cleared on every exit.

use tabscout_core::{escape_html, NewsWindow};

use crate::backend::StockBackend;
use crate::error::StockError;
use crate::gemini::GeminiClient;
use crate::logger::ResponseLogger;
use crate::prompt::{movements_prompt, news_prompt, parse_news_items, strip_code_fences};
use crate::render::render_analysis_table;
use crate::types::{AnalysisContext, AnalysisTable};

/// Shown when the credential cannot be obtained.
pub const INIT_FAILURE_MESSAGE: &str = "Failed to initialize the AI model. Please try again later.";

/// Shown when the symbol is blank.
pub const EMPTY_SYMBOL_MESSAGE: &str = "Please enter a stock symbol";

/// The output area and loading indicator of one analysis view.
#[derive(Debug, Default, Clone)]
pub struct AnalysisOutput {
    html: String,
    loading: bool,
}

impl AnalysisOutput {
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn replace(&mut self, html: &str) {
        self.html.clear();
        self.html.push_str(html);
    }

    pub fn append(&mut self, html: &str) {
        self.html.push_str(html);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

pub struct StockAnalyzer {
    backend: StockBackend,
    gemini: GeminiClient,
    logger: ResponseLogger,
    window: NewsWindow,
}

impl StockAnalyzer {
    #[must_use]
    pub fn new(backend: StockBackend, gemini: GeminiClient, window: NewsWindow) -> Self {
        let logger = ResponseLogger::new(backend.clone());
        Self {
            backend,
            gemini,
            logger,
            window,
        }
    }

    /// Obtains the credential for a run.
    ///
    /// On failure the output shows [`INIT_FAILURE_MESSAGE`] and `None` is
    /// returned; the caller must not start an analysis.
    pub async fn initialize(&self, out: &mut AnalysisOutput) -> Option<AnalysisContext> {
        match self.backend.api_key().await {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                tracing::error!(error = %e, "failed to obtain generative-language credential");
                out.replace(INIT_FAILURE_MESSAGE);
                None
            }
        }
    }

    /// Waits for outstanding response uploads.
    pub async fn flush_logs(&self) {
        self.logger.flush().await;
    }

    /// Runs the full analysis for `raw_symbol` (trimmed and upper-cased).
    pub async fn analyze(&self, ctx: &AnalysisContext, raw_symbol: &str, out: &mut AnalysisOutput) {
        let symbol = raw_symbol.trim().to_uppercase();
        if symbol.is_empty() {
            out.replace(EMPTY_SYMBOL_MESSAGE);
            return;
        }

        out.set_loading(true);
        out.replace("Starting analysis...<br><br>");

        if let Err(e) = self.run_stages(ctx, &symbol, out).await {
            tracing::error!(symbol = %symbol, error = %e, "stock analysis failed");
            out.replace(&format!("Error: {}", escape_html(&e.to_string())));
        }

        out.set_loading(false);
    }

    async fn run_stages(
        &self,
        ctx: &AnalysisContext,
        symbol: &str,
        out: &mut AnalysisOutput,
    ) -> Result<(), StockError> {
        out.append("Fetching news for the last month...<br>");
        let news = self.fetch_news(ctx, symbol).await?;
        out.append("News fetched successfully.<br><br><br>");

        self.logger.log(symbol, &news);

        let dates = self.backend.extract_dates(&news).await?;
        tracing::info!(symbol, dates = dates.len(), "significant dates extracted");
        out.append(&format!("Found {} significant dates.<br><br>", dates.len()));

        out.append("Analyzing stock movements...<br>");
        let table = self.fetch_movements(ctx, symbol, &dates, &news).await?;

        out.append("<br>Analysis Complete:<br><br>");
        out.append(&render_analysis_table(&table));
        Ok(())
    }

    /// Asks the model for the configured month's news, with code fences removed.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::News`] wrapping the underlying failure.
    pub async fn fetch_news(&self, ctx: &AnalysisContext, symbol: &str) -> Result<String, StockError> {
        let prompt = news_prompt(symbol, &self.window);
        let text = self
            .gemini
            .generate(ctx, &prompt)
            .await
            .map_err(|e| StockError::News {
                symbol: symbol.to_string(),
                source: Box::new(e),
            })?;
        let news = strip_code_fences(&text);

        match parse_news_items(&news) {
            Ok(items) => tracing::info!(symbol, items = items.len(), "news fetched"),
            Err(e) => tracing::debug!(symbol, error = %e, "news answer is not a JSON news list"),
        }
        Ok(news)
    }

    /// Asks the model how the stock moved on `dates` and tabulates the answer.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Movements`] wrapping the underlying failure.
    pub async fn fetch_movements(
        &self,
        ctx: &AnalysisContext,
        symbol: &str,
        dates: &[String],
        previous_news: &str,
    ) -> Result<AnalysisTable, StockError> {
        let stage = async {
            let prompt = movements_prompt(symbol, dates, previous_news);
            let analysis_text = self.gemini.generate(ctx, &prompt).await?;
            self.logger.log(symbol, &analysis_text);
            self.backend.extract_analysis(&analysis_text).await
        };
        stage.await.map_err(|e| StockError::Movements(Box::new(e)))
    }
}
