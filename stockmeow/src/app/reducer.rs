use super::event::*;
use super::state::*;
use crate::debug_hooks;
use crate::quote::Quote;
use bigdecimal::ToPrimitive;

/// Apply one event. Returns true when anything visible changed.
pub fn reduce(state: &mut AppState, ev: AppEvent) -> bool {
    match ev {
        AppEvent::Ui(u) => reduce_ui(state, u),
        AppEvent::Feed(f) => reduce_feed(state, f),
        AppEvent::Timer(t) => reduce_timer(state, t),
    }
}

fn reduce_ui(state: &mut AppState, ev: UiEvent) -> bool {
    match ev {
        UiEvent::SellClicked => {
            if !state.sell_enabled {
                return false;
            }
            let price = state
                .quotes
                .latest()
                .map(|q| q.price.to_string())
                .unwrap_or_default();
            debug_hooks::log_sell_clicked(&price);
            state.sell_dialog_open = true;
            true
        }
        UiEvent::SellDialogDismissed => {
            let was_open = state.sell_dialog_open;
            state.sell_dialog_open = false;
            was_open
        }
    }
}

fn reduce_feed(state: &mut AppState, ev: FeedEvent) -> bool {
    match ev {
        FeedEvent::TickDispatched { tick } => {
            if tick <= state.last_dispatched_tick {
                return false;
            }
            state.last_dispatched_tick = tick;
            true
        }
        FeedEvent::QuoteFetched { tick, quote } => {
            apply_quote(state, tick, quote);
            true
        }
        FeedEvent::FetchFailed { tick, error } => {
            debug_hooks::log_fetch_failed(tick, &error);
            state.fetch_failed += 1;
            // a late failure must not mask a newer outcome
            if tick < state.last_status_tick {
                return false;
            }
            state.last_status_tick = tick;
            state.status = FeedStatus::from(&error);
            true
        }
    }
}

fn apply_quote(state: &mut AppState, tick: u64, quote: Quote) {
    let Some(price_f) = quote.price.to_f64().filter(|p| p.is_finite()) else {
        // not plottable; skip so store and chart stay in step
        debug_hooks::log_unplottable_price(tick, &quote);
        state.fetch_failed += 1;
        return;
    };
    state.fetch_ok += 1;
    state.series.upsert(quote.second_key(), price_f);
    state.quotes.push(quote);

    let Some(latest) = state.quotes.latest() else {
        return;
    };
    debug_hooks::log_quote_stored(tick, latest, state.quotes.len());

    if tick < state.last_applied_tick {
        debug_hooks::log_stale_result(tick, state.last_applied_tick);
    } else {
        state.last_applied_tick = tick;
        state.price_label = format!("{PRICE_LABEL_PREFIX}{}", latest.price);
        state.sell_enabled = state.sell_rule.should_sell(&latest.price);
    }

    if tick >= state.last_status_tick {
        state.last_status_tick = tick;
        state.status = FeedStatus::Live {
            as_of: format_hms_local(latest.timestamp.timestamp()),
        };
    }
}

fn reduce_timer(state: &mut AppState, ev: TimerEvent) -> bool {
    match ev {
        TimerEvent::Tick1s { now_unix } => {
            let now = format_ts_local(now_unix);
            if now == state.current_time {
                return false;
            }
            state.current_time = now;
            true
        }
    }
}
