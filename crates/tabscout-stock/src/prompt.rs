//! Prompt text and model-output cleanup.

use regex::Regex;
use tabscout_core::NewsWindow;

use crate::types::NewsItem;

/// Prompt asking for one month of price-relevant news as a JSON array.
#[must_use]
pub fn news_prompt(symbol: &str, window: &NewsWindow) -> String {
    format!(
        "Get the news for a stock {symbol} in the {month} month. \n\
         Format the response as a JSON array of objects with the following structure:\n\
         {{\n  \"date\": \"YYYY-MM-DD\",\n  \"title\": \"News title\",\n  \
         \"summary\": \"Brief summary of the news\",\n  \"impact\": \"positive/negative/neutral\"\n}}\n\
         Only include significant news that might affect the stock price.\n\
         Return ONLY the JSON array without any markdown formatting or code block markers.",
        month = window.label(),
    )
}

/// Prompt asking how the stock moved on `dates`, given the earlier news.
#[must_use]
pub fn movements_prompt(symbol: &str, dates: &[String], previous_news: &str) -> String {
    format!(
        "Based on the following news and dates, analyze how {symbol} stock moved on these dates:\n\n\
         Previous News Analysis:\n{previous_news}\n\n\
         Significant Dates:\n{dates}\n\n\
         Please provide a detailed analysis of the stock's movement on these dates, including:\n\
         1. Price movement (up/down)\n\
         2. Volume changes\n\
         3. Correlation with the news events\n\
         4. Overall market sentiment\n\n\
         Format the response in a clear, structured way with column date, impact, movement, \
         volume, correlation, and sentiment.",
        dates = dates.join(", "),
    )
}

/// Removes ```` ```json ```` / ```` ``` ```` fence markers and surrounding whitespace.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    let fences = Regex::new(r"```(?:json)?\n?").expect("valid code fence regex");
    fences.replace_all(text, "").trim().to_string()
}

/// Decodes the model's news answer into [`NewsItem`]s.
///
/// # Errors
///
/// Returns the `serde_json` error if the text is not a JSON array of news items.
pub fn parse_news_items(text: &str) -> Result<Vec<NewsItem>, serde_json::Error> {
    serde_json::from_str(&strip_code_fences(text))
}
