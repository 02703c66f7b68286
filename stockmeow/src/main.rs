mod shell;

slint::include_modules!();

use crate::shell::AppRuntime;
use anyhow::{Context, Result};
use log::{info, warn};
use slint::{ComponentHandle, Timer, TimerMode};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;
use stockmeow::feed::{QuoteFetcher, QuotePoller};
use stockmeow::settings::{self, Settings};

/// How often the UI thread drains feed events.
const UI_DRAIN_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    init_logger();

    let settings = Settings::load();
    info!(
        "symbol={} interval={}s threshold={} history={} (settings file: {})",
        settings.symbol,
        settings.poll_interval_secs,
        settings.sell_threshold,
        settings.history_capacity,
        settings::settings_path().display()
    );

    let app = AppWindow::new().context("create main window")?;
    let (tx, rx) = mpsc::channel();

    let runtime = Rc::new(RefCell::new(AppRuntime::new(app.as_weak(), &settings)));
    shell::commands::wire_ui(&app, tx.clone());
    runtime.borrow_mut().render();

    let fetcher = QuoteFetcher::new(&settings).context("build quote fetcher")?;
    let poller = QuotePoller::start(fetcher, settings.poll_interval(), tx)
        .context("start quote poller")?;

    ctrlc::set_handler(|| {
        info!("Ctrl+C received; closing window");
        let _ = slint::invoke_from_event_loop(|| {
            let _ = slint::quit_event_loop();
        });
    })
    .context("install Ctrl+C handler")?;

    let timer = Timer::default();
    {
        let runtime = runtime.clone();
        timer.start(TimerMode::Repeated, UI_DRAIN_INTERVAL, move || {
            let mut rt = runtime.borrow_mut();
            rt.drain(&rx);
            rt.tick_if_needed();
            rt.render_if_dirty();
        });
    }

    info!("Starting stock watcher window...");
    app.run().context("run event loop")?;
    timer.stop();

    match poller.shutdown() {
        Ok(ticks) => {
            let rt = runtime.borrow();
            let state = &rt.state;
            if state.quotes.is_empty() {
                warn!("shut down after {ticks} ticks without a single quote");
            }
            info!(
                "shut down after {ticks} ticks; {}/{} quotes held, {} ok / {} failed fetches",
                state.quotes.len(),
                state.quotes.capacity(),
                state.fetch_ok,
                state.fetch_failed
            );
        }
        Err(err) => warn!("poller shutdown: {err}"),
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
