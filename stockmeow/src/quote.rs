use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::VecDeque;
use std::fmt;

/// One (price, time) observation for the tracked symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub price: BigDecimal,
    /// Wall-clock time the response was parsed, not the exchange time.
    pub timestamp: DateTime<Utc>,
    /// Date key the price was read from (latest daily session in the payload).
    pub session_date: Option<NaiveDate>,
}

impl Quote {
    pub fn new(price: BigDecimal, timestamp: DateTime<Utc>) -> Self {
        Self {
            price,
            timestamp,
            session_date: None,
        }
    }

    pub fn with_session_date(mut self, date: NaiveDate) -> Self {
        self.session_date = Some(date);
        self
    }

    /// Chart key: unix seconds of the fetch time.
    pub fn second_key(&self) -> i64 {
        self.timestamp.timestamp()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.price, self.timestamp.to_rfc3339())
    }
}

/// Bounded, append-only history of fetched quotes.
///
/// Once `capacity` is reached the oldest quote is evicted for each new one.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    capacity: usize,
    quotes: VecDeque<Quote>,
}

impl QuoteStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            quotes: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    pub fn push(&mut self, quote: Quote) {
        if self.quotes.len() == self.capacity {
            self.quotes.pop_front();
        }
        self.quotes.push_back(quote);
    }

    pub fn latest(&self) -> Option<&Quote> {
        self.quotes.back()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
