use crate::decision::SellRule;
use crate::error::FetchError;
use crate::quote::QuoteStore;
use crate::series::ChartSeries;
use crate::settings::Settings;
use chrono::{Local, TimeZone};

pub const PRICE_LABEL_PREFIX: &str = "Current Stock Price: $";
pub const SELL_CONFIRMATION: &str = "Stock Sold!";

/// Feed health shown under the chart. Each failure class renders differently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Waiting,
    Live { as_of: String },
    RateLimited(String),
    ProviderError(String),
    TransportError(String),
    Malformed(String),
}

/// Colour class for the status line (matches `status-kind` in the UI markup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Neutral = 0,
    Ok = 1,
    Warning = 2,
    Error = 3,
}

impl FeedStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            FeedStatus::Waiting => StatusKind::Neutral,
            FeedStatus::Live { .. } => StatusKind::Ok,
            FeedStatus::RateLimited(_) => StatusKind::Warning,
            FeedStatus::ProviderError(_)
            | FeedStatus::TransportError(_)
            | FeedStatus::Malformed(_) => StatusKind::Error,
        }
    }

    pub fn text(&self) -> String {
        match self {
            FeedStatus::Waiting => "Waiting for first quote...".to_string(),
            FeedStatus::Live { as_of } => format!("Live, updated {as_of}"),
            FeedStatus::RateLimited(note) => format!("Rate limited: {note}"),
            FeedStatus::ProviderError(msg) => format!("Provider error: {msg}"),
            FeedStatus::TransportError(msg) => format!("Network error: {msg}"),
            FeedStatus::Malformed(msg) => format!("Unexpected response: {msg}"),
        }
    }
}

impl From<&FetchError> for FeedStatus {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::RateLimited(note) => FeedStatus::RateLimited(note.clone()),
            FetchError::Provider(msg) => FeedStatus::ProviderError(msg.clone()),
            FetchError::Transport(msg) => FeedStatus::TransportError(msg.clone()),
            FetchError::HttpStatus(code) => FeedStatus::TransportError(format!("HTTP {code}")),
            FetchError::Malformed(msg) => FeedStatus::Malformed(msg.clone()),
        }
    }
}

/// Everything the window shows, plus the history behind the chart.
#[derive(Debug, Clone)]
pub struct AppState {
    pub symbol: String,
    pub quotes: QuoteStore,
    pub series: ChartSeries,
    pub sell_rule: SellRule,

    pub status: FeedStatus,
    pub price_label: String,
    pub sell_enabled: bool,
    pub sell_dialog_open: bool,
    pub current_time: String,

    /// Newest tick handed to the fetcher.
    pub last_dispatched_tick: u64,
    /// Newest successful tick; owns the label and button.
    pub last_applied_tick: u64,
    /// Newest tick of either outcome; owns the status line.
    pub last_status_tick: u64,
    pub fetch_ok: u64,
    pub fetch_failed: u64,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            symbol: settings.symbol.clone(),
            quotes: QuoteStore::new(settings.history_capacity),
            series: ChartSeries::new(settings.history_capacity),
            sell_rule: SellRule::new(settings.sell_threshold.clone()),

            status: FeedStatus::Waiting,
            price_label: format!("{PRICE_LABEL_PREFIX}0.00"),
            sell_enabled: false,
            sell_dialog_open: false,
            current_time: String::new(),

            last_dispatched_tick: 0,
            last_applied_tick: 0,
            last_status_tick: 0,
            fetch_ok: 0,
            fetch_failed: 0,
        }
    }
}

impl AppState {
    /// Status text plus the newest dispatched tick, e.g. `Live, updated 10:00:05 (tick 12)`.
    pub fn status_line(&self) -> String {
        if self.last_dispatched_tick == 0 {
            return self.status.text();
        }
        format!("{} (tick {})", self.status.text(), self.last_dispatched_tick)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

pub fn format_ts_local(ts: i64) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format!("unix:{ts}"))
}

pub fn format_hms_local(ts: i64) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
