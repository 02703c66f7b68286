use crate::app::{AppEvent, FeedEvent};
use crate::debug_hooks;
use crate::error::{Error, Result};
use crate::feed::fetch::QuoteFetcher;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// How long in-flight fetches may keep running after shutdown is requested.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Fixed-rate quote poller running on its own thread and tokio runtime.
///
/// Each tick spawns a fetch task and returns to the timer immediately, so a
/// slow request never delays the next tick. Outcomes are sent to the UI side
/// as [`AppEvent::Feed`].
pub struct QuotePoller {
    stop: watch::Sender<bool>,
    thread: Option<JoinHandle<u64>>,
}

impl QuotePoller {
    pub fn start(fetcher: QuoteFetcher, interval: Duration, tx: Sender<AppEvent>) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("quote-fetch")
            .enable_all()
            .build()?;
        let (stop, stop_rx) = watch::channel(false);

        debug_hooks::log_poller_start(fetcher.symbol(), interval.as_secs_f64());

        let thread = thread::Builder::new()
            .name("quote-poller".into())
            .spawn(move || {
                let ticks = rt.block_on(run_ticks(fetcher, interval, tx, stop_rx));
                rt.shutdown_timeout(DRAIN_TIMEOUT);
                debug_hooks::log_poller_stop(ticks);
                ticks
            })?;

        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    /// Stop ticking, drain in-flight fetches (bounded) and join the thread.
    /// Returns the number of ticks dispatched.
    pub fn shutdown(mut self) -> Result<u64> {
        let _ = self.stop.send(true);
        match self.thread.take() {
            Some(handle) => handle.join().map_err(|_| Error::PollerPanicked),
            None => Ok(0),
        }
    }
}

impl Drop for QuotePoller {
    fn drop(&mut self) {
        // signal only; joining here could block the UI thread on drop
        let _ = self.stop.send(true);
    }
}

async fn run_ticks(
    fetcher: QuoteFetcher,
    interval: Duration,
    tx: Sender<AppEvent>,
    mut stop_rx: watch::Receiver<bool>,
) -> u64 {
    let mut timer = tokio::time::interval(interval.max(Duration::from_millis(1)));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            _ = timer.tick() => {
                tick += 1;
                debug_hooks::log_tick(tick);
                if tx.send(AppEvent::Feed(FeedEvent::TickDispatched { tick })).is_err() {
                    // UI side is gone
                    break;
                }
                let fetcher = fetcher.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let event = match fetcher.fetch().await {
                        Ok(quote) => FeedEvent::QuoteFetched { tick, quote },
                        Err(error) => FeedEvent::FetchFailed { tick, error },
                    };
                    let _ = tx.send(AppEvent::Feed(event));
                });
            }
        }
    }
    tick
}
