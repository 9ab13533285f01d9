use chrono::NaiveDate;

/// The calendar month the news prompt asks about.
///
/// Stored as the first day of the month; [`NewsWindow::label`] renders it the
/// way the prompt expects (`"August 2021"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsWindow {
    pub month_start: NaiveDate,
}

impl NewsWindow {
    /// Human-readable month label, e.g. `"August 2021"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.month_start.format("%B %Y").to_string()
    }
}

impl Default for NewsWindow {
    fn default() -> Self {
        Self {
            month_start: NaiveDate::from_ymd_opt(2021, 8, 1).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub agent_url: String,
    pub stock_backend_url: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub news_window: NewsWindow,
    pub request_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,
    pub user_agent: String,
    pub log_level: String,
}
