use crate::debug_hooks;
use crate::error::{FetchError, Result};
use crate::quote::Quote;
use crate::settings::Settings;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;

const SERIES_KEY: &str = "Time Series (Daily)";
const OPEN_KEY: &str = "1. open";

/// Top-level shapes the provider answers with. Only one is expected to be
/// present; success wins if several are.
#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<Map<String, Value>>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "1. open")]
    open: String,
}

/// Issues the daily time-series request for one symbol.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct QuoteFetcher {
    client: reqwest::Client,
    url: reqwest::Url,
    symbol: String,
}

impl QuoteFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            client,
            url: settings.request_url()?,
            symbol: settings.symbol.clone(),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub async fn fetch(&self) -> Result<Quote, FetchError> {
        let resp = self.client.get(self.url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        let body = resp.text().await?;
        debug_hooks::log_response_body(status.as_u16(), &body);
        parse_daily_response(&body, Utc::now())
    }
}

/// Turn a response body into a quote stamped with `fetched_at`.
///
/// The first date key in document order is taken as the latest session and
/// its open price becomes the quote price.
pub fn parse_daily_response(
    body: &str,
    fetched_at: DateTime<Utc>,
) -> Result<Quote, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(top) = value else {
        return Err(FetchError::Malformed("top-level JSON is not an object".into()));
    };
    let keys: Vec<String> = top.keys().cloned().collect();
    let resp: DailyResponse = serde_json::from_value(Value::Object(top))?;

    if let Some(series) = resp.series {
        let (date_key, bar) = series
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed(format!("\"{SERIES_KEY}\" is empty")))?;
        let bar: DailyBar = serde_json::from_value(bar)
            .map_err(|e| FetchError::Malformed(format!("{date_key}: {e}")))?;
        let price = BigDecimal::from_str(bar.open.trim()).map_err(|e| {
            FetchError::Malformed(format!("{date_key}: bad \"{OPEN_KEY}\" {:?}: {e}", bar.open))
        })?;

        let mut quote = Quote::new(price, fetched_at);
        if let Ok(date) = NaiveDate::parse_from_str(&date_key, "%Y-%m-%d") {
            quote = quote.with_session_date(date);
        }
        return Ok(quote);
    }
    if let Some(note) = resp.note.or(resp.information) {
        return Err(FetchError::RateLimited(note));
    }
    if let Some(msg) = resp.error_message {
        return Err(FetchError::Provider(msg));
    }

    let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
    debug_hooks::log_unrecognised_shape(&keys);
    Err(FetchError::Malformed("unexpected response format".into()))
}
