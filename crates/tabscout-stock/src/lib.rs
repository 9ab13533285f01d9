//! Two-stage LLM stock news analysis.
//!
//! Fetches a month of news for a ticker from Gemini, has the local backend
//! pull out the significant dates, asks Gemini how the stock moved on those
//! dates, has the backend tabulate that answer, and renders an HTML table.

pub mod backend;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod types;

pub use backend::StockBackend;
pub use error::StockError;
pub use gemini::GeminiClient;
pub use logger::ResponseLogger;
pub use pipeline::{AnalysisOutput, StockAnalyzer, EMPTY_SYMBOL_MESSAGE, INIT_FAILURE_MESSAGE};
pub use prompt::{movements_prompt, news_prompt, parse_news_items, strip_code_fences};
pub use render::render_analysis_table;
pub use types::{AnalysisContext, AnalysisRow, AnalysisTable, Impact, NewsItem};
