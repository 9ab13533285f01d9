mod pages;
mod relay;
mod stock;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tabscout-cli")]
#[command(about = "Save and search page embeddings, analyze stocks, relay extension messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit a page to the embeddings agent and wait for it to be indexed
    Save {
        /// URL of the page to save
        #[arg(long)]
        url: String,

        /// Read the page HTML from a local file
        #[arg(long, conflicts_with = "fetch_html")]
        html_file: Option<PathBuf>,

        /// Download the page HTML before submitting it
        #[arg(long)]
        fetch_html: bool,
    },
    /// Semantic search over saved pages
    Search {
        /// Free-text query
        query: String,
    },
    /// Show the title and opening text of a page
    Preview {
        #[arg(long)]
        url: String,
    },
    /// Run the news and price-movement analysis for a ticker symbol
    Analyze {
        /// Ticker symbol, e.g. AAPL
        symbol: String,
    },
    /// Answer relay messages read from stdin, one JSON object per line
    Relay {
        /// Text reported as the current page selection
        #[arg(long)]
        selection: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = tabscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Save {
            url,
            html_file,
            fetch_html,
        } => pages::run_save(&config, &url, html_file.as_deref(), fetch_html).await?,
        Commands::Search { query } => pages::run_search(&config, &query).await?,
        Commands::Preview { url } => pages::run_preview(&config, &url).await?,
        Commands::Analyze { symbol } => stock::run_analyze(&config, &symbol).await?,
        Commands::Relay { selection } => relay::run_relay(selection).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
