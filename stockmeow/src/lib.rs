//! Stock quote watcher: polls a daily time-series endpoint on a fixed
//! interval, keeps a bounded history of quotes, and derives a cosmetic
//! "sell" signal from a price threshold.
//!
//! The library holds everything that does not touch the UI toolkit so it can
//! be tested headless; `src/main.rs` wires it into the Slint window.

pub mod app;
pub mod chart;
pub mod debug_hooks;
pub mod decision;
pub mod error;
pub mod feed;
pub mod quote;
pub mod series;
pub mod settings;

pub use error::{Error, FetchError, Result};
