//! HTML fragments for the results area.
//!
//! Every fragment is one or more `<div class="result-item">` blocks. Text
//! that came from the agent is escaped before it is embedded.

use std::fmt::Display;

use tabscout_core::escape_html;

use crate::types::{PagePreview, ProcessingTask, SearchResult, TaskStatus};

/// Number of content characters shown per search hit.
pub const PREVIEW_CHARS: usize = 150;

fn result_item(inner: &str) -> String {
    format!("<div class=\"result-item\">{inner}</div>")
}

#[must_use]
pub fn render_processing() -> String {
    result_item("Processing page... Please wait.")
}

#[must_use]
pub fn render_saved(chunks_processed: u64) -> String {
    result_item(&format!(
        "Page processed successfully! ({chunks_processed} chunks created)"
    ))
}

/// Renders a finished task: the chunk count on success, the agent's error otherwise.
#[must_use]
pub fn render_task_outcome(task: &ProcessingTask) -> String {
    match task.status {
        TaskStatus::Success => render_saved(task.chunks_processed.unwrap_or(0)),
        TaskStatus::Error | TaskStatus::Processing => {
            render_error(task.error.as_deref().unwrap_or("unknown error"))
        }
    }
}

#[must_use]
pub fn render_error(err: impl Display) -> String {
    result_item(&format!("Error: {}", escape_html(&err.to_string())))
}

#[must_use]
pub fn render_message(message: &str) -> String {
    result_item(&escape_html(message))
}

/// Relevance as a percentage with one decimal place, e.g. `"87.3%"`.
#[must_use]
pub fn format_relevance(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// The first [`PREVIEW_CHARS`] characters of `content`.
#[must_use]
pub fn content_preview(content: &str) -> &str {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Link, content preview, and the relevance line when the agent scored the hit.
#[must_use]
pub fn render_search_result(result: &SearchResult) -> String {
    let url = escape_html(&result.url);
    let relevance = result
        .relevance_score
        .map(|score| format!("<small>Relevance: {}</small>", format_relevance(score)))
        .unwrap_or_default();
    result_item(&format!(
        "<a href=\"{url}\" target=\"_blank\">{url}</a><p>{}...</p>{relevance}",
        escape_html(content_preview(&result.content)),
    ))
}

/// One `result-item` per hit, in the order the agent ranked them.
#[must_use]
pub fn render_search_results(results: &[SearchResult]) -> String {
    results.iter().map(render_search_result).collect()
}

#[must_use]
pub fn render_preview(url: &str, preview: &PagePreview) -> String {
    if !preview.success {
        return render_error(preview.error.as_deref().unwrap_or("preview unavailable"));
    }
    let title = preview.title.as_deref().unwrap_or(url);
    result_item(&format!(
        "<strong>{}</strong><p>{}</p>",
        escape_html(title),
        escape_html(preview.preview.as_deref().unwrap_or_default()),
    ))
}
