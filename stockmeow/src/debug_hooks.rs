//! Topic-scoped log lines for the feed and the app reducer.
//!
//! Each helper logs under a fixed `target` so `RUST_LOG=feed.fetch=debug`
//! style filters work with `env_logger`.
use crate::error::FetchError;
use crate::quote::Quote;
use log::{debug, info, warn};

const MAX_BODY_LOG: usize = 512;

pub fn log_poller_start(symbol: &str, interval_secs: f64) {
    info!(
        target: "feed.tick",
        "poller starting; symbol={symbol} interval={interval_secs:.1}s"
    );
}

pub fn log_poller_stop(ticks: u64) {
    info!(target: "feed.tick", "poller stopped after {ticks} ticks");
}

pub fn log_tick(tick: u64) {
    debug!(target: "feed.tick", "tick {tick}: dispatching fetch");
}

pub fn log_response_body(status: u16, body: &str) {
    debug!(target: "feed.fetch", "status={status} body={}", truncate(body, MAX_BODY_LOG));
}

pub fn log_quote_stored(tick: u64, quote: &Quote, stored: usize) {
    info!(
        target: "feed.fetch",
        "tick {tick}: stored {quote} (session {}); history={stored}",
        quote
            .session_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".into())
    );
}

pub fn log_fetch_failed(tick: u64, err: &FetchError) {
    match err {
        FetchError::RateLimited(note) => warn!(target: "feed.fetch", "tick {tick}: note: {note}"),
        FetchError::Provider(msg) => warn!(target: "feed.fetch", "tick {tick}: error: {msg}"),
        other => warn!(target: "feed.fetch", "tick {tick}: {other}"),
    }
}

pub fn log_stale_result(tick: u64, newest: u64) {
    debug!(
        target: "feed.fetch",
        "tick {tick} finished after tick {newest}; stored without touching the label"
    );
}

pub fn log_unplottable_price(tick: u64, quote: &Quote) {
    warn!(target: "feed.fetch", "tick {tick}: price {} cannot be charted; dropped", quote.price);
}

pub fn log_unrecognised_shape(keys: &[&str]) {
    warn!(target: "feed.parse", "unexpected response format; top-level keys={keys:?}");
}

pub fn log_sell_clicked(price: &str) {
    info!(target: "app.sell", "sell pressed at {price}; confirmation only, nothing is traded");
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
