pub mod fetch;
pub mod poller;

pub use fetch::{parse_daily_response, QuoteFetcher};
pub use poller::QuotePoller;
