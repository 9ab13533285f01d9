//! Embeddings command handlers for the CLI.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tabscout_core::AppConfig;
use tabscout_embeddings::{
    AgentClient, CancellationToken, EmbeddingsPopup, FetchedPage, PageSource, PollPolicy,
    StaticPage,
};

fn build_popup(config: &AppConfig) -> anyhow::Result<EmbeddingsPopup> {
    let agent = AgentClient::new(
        &config.agent_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    Ok(EmbeddingsPopup::new(agent, PollPolicy::from_config(config)))
}

/// Cancels `token` when the process receives Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received; cancelling");
            token.cancel();
        }
    });
}

async fn save_page<P: PageSource>(popup: &EmbeddingsPopup, page: &P) {
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());
    let html = popup
        .save(page, &cancel, |progress| println!("{progress}"))
        .await;
    println!("{html}");
}

/// Submits a page and polls until the agent reports an outcome.
///
/// The page HTML comes from `html_file`, a download of `url` when
/// `fetch_html` is set, or is omitted so the agent fetches it itself.
///
/// # Errors
///
/// Returns an error if the clients cannot be built or `html_file` cannot be
/// read. Agent failures are printed as an error fragment instead.
pub(crate) async fn run_save(
    config: &AppConfig,
    url: &str,
    html_file: Option<&Path>,
    fetch_html: bool,
) -> anyhow::Result<()> {
    let popup = build_popup(config)?;

    if let Some(path) = html_file {
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        save_page(&popup, &StaticPage::new(url, Some(html))).await;
    } else if fetch_html {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        save_page(&popup, &FetchedPage::new(client, url)).await;
    } else {
        save_page(&popup, &StaticPage::new(url, None)).await;
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if the agent client cannot be built.
pub(crate) async fn run_search(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let popup = build_popup(config)?;
    match popup.search(query).await {
        Some(html) => println!("{html}"),
        None => tracing::info!("empty query; nothing searched"),
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the agent client cannot be built.
pub(crate) async fn run_preview(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let popup = build_popup(config)?;
    println!("{}", popup.preview(url).await);
    Ok(())
}
