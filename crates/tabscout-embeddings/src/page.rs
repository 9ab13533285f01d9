//! Where the page to save comes from.
//!
//! A browser extension reads the active tab's URL and, through an injected
//! script, its serialized document. [`PageSource`] is that capability;
//! [`StaticPage`] is supplied directly by the caller and [`FetchedPage`]
//! serializes the document by downloading it.

use std::future::Future;

use reqwest::Client;

use crate::error::EmbeddingsError;

/// The page the user is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePage {
    pub url: String,
    pub html_content: Option<String>,
}

pub trait PageSource {
    /// Returns the current page's URL and, when available, its HTML.
    fn active_page(&self) -> impl Future<Output = Result<ActivePage, EmbeddingsError>> + Send;
}

/// A page whose URL (and optional HTML) is already known.
#[derive(Debug, Clone)]
pub struct StaticPage {
    page: ActivePage,
}

impl StaticPage {
    #[must_use]
    pub fn new(url: impl Into<String>, html_content: Option<String>) -> Self {
        Self {
            page: ActivePage {
                url: url.into(),
                html_content,
            },
        }
    }
}

impl PageSource for StaticPage {
    async fn active_page(&self) -> Result<ActivePage, EmbeddingsError> {
        Ok(self.page.clone())
    }
}

/// A page whose HTML is captured by downloading `url`.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    client: Client,
    url: String,
}

impl FetchedPage {
    #[must_use]
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl PageSource for FetchedPage {
    async fn active_page(&self) -> Result<ActivePage, EmbeddingsError> {
        let html = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        tracing::debug!(url = %self.url, bytes = html.len(), "captured page html");
        Ok(ActivePage {
            url: self.url.clone(),
            html_content: Some(html),
        })
    }
}
