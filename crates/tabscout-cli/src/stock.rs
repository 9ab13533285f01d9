//! Stock analysis command handler.

use tabscout_core::AppConfig;
use tabscout_stock::{AnalysisOutput, GeminiClient, StockAnalyzer, StockBackend};

/// Runs one analysis and prints the final output area.
///
/// # Errors
///
/// Returns an error if the backend or model client cannot be built. Failures
/// during the analysis itself are part of the printed output.
pub(crate) async fn run_analyze(config: &AppConfig, symbol: &str) -> anyhow::Result<()> {
    let backend = StockBackend::new(
        &config.stock_backend_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let gemini = GeminiClient::with_base_url(
        &config.gemini_base_url,
        &config.gemini_model,
        config.request_timeout_secs,
    )?;
    let analyzer = StockAnalyzer::new(backend, gemini, config.news_window);

    let mut out = AnalysisOutput::default();
    if let Some(ctx) = analyzer.initialize(&mut out).await {
        analyzer.analyze(&ctx, symbol, &mut out).await;
    }
    analyzer.flush_logs().await;

    println!("{}", out.html());
    Ok(())
}
