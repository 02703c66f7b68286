use crate::error::FetchError;
use crate::quote::Quote;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Ui(UiEvent),
    Feed(FeedEvent),
    Timer(TimerEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SellClicked,
    SellDialogDismissed,
}

#[derive(Debug, Clone)]
pub enum FeedEvent {
    TickDispatched { tick: u64 },
    QuoteFetched { tick: u64, quote: Quote },
    FetchFailed { tick: u64, error: FetchError },
}

#[derive(Debug, Clone)]
pub enum TimerEvent {
    Tick1s { now_unix: i64 },
}
