//! HTML table for the extracted movement analysis.

use std::fmt::Write as _;

use tabscout_core::escape_html;

use crate::types::AnalysisTable;

const HEADERS: [&str; 6] = [
    "Date",
    "Impact",
    "Movement",
    "Volume",
    "Correlation",
    "Sentiment",
];

/// Renders one body row per date, oldest first.
///
/// The impact cell carries the lower-cased impact as its `class`, so styles
/// can target `positive`, `negative` and `neutral`.
#[must_use]
pub fn render_analysis_table(table: &AnalysisTable) -> String {
    let mut html = String::from(
        "<div class=\"analysis-container\"><table class=\"analysis-table\"><thead><tr>",
    );
    for header in HEADERS {
        let _ = write!(html, "<th>{header}</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for (date, row) in table {
        let _ = write!(
            html,
            "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(date),
            escape_html(&row.impact.to_lowercase()),
            escape_html(&row.impact),
            escape_html(&row.movement),
            escape_html(&row.volume),
            escape_html(&row.correlation),
            escape_html(&row.sentiment),
        );
    }

    html.push_str("</tbody></table></div>");
    html
}
