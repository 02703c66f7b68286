use bigdecimal::BigDecimal;
use std::str::FromStr;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use stockmeow::app::{reduce, AppEvent, AppState, FeedEvent, FeedStatus};
use stockmeow::feed::{QuoteFetcher, QuotePoller};
use stockmeow::settings::Settings;
use stockmeow::FetchError;
use tiny_http::{Response, Server, StatusCode};

const OK_BODY: &str = r#"{
    "Meta Data": {"2. Symbol": "DIA"},
    "Time Series (Daily)": {
        "2024-03-07": {"1. open": "55.2500", "4. close": "55.9000"},
        "2024-03-06": {"1. open": "54.1000", "4. close": "54.9000"}
    }
}"#;

/// Local stand-in for the quote provider. Answers every request with the same
/// status and body and reports each request URL on the returned channel.
fn spawn_provider(status: u16, body: &'static str) -> (Settings, Receiver<String>, Arc<Server>) {
    let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
    let addr = server.server_addr().to_ip().unwrap();
    let (seen_tx, seen_rx) = mpsc::channel();

    let srv = server.clone();
    thread::spawn(move || {
        for req in srv.incoming_requests() {
            let _ = seen_tx.send(req.url().to_string());
            let resp = Response::from_string(body)
                .with_status_code(StatusCode(status));
            let _ = req.respond(resp);
        }
    });

    let mut settings = Settings::default();
    settings.base_url = format!("http://{addr}/query");
    settings.api_key = "TESTKEY".into();
    settings.request_timeout_secs = 2;
    (settings, seen_rx, server)
}

#[tokio::test]
async fn fetch_reads_latest_open_and_sends_expected_query() {
    let (settings, seen, server) = spawn_provider(200, OK_BODY);
    let fetcher = QuoteFetcher::new(&settings).unwrap();

    let quote = fetcher.fetch().await.unwrap();
    assert_eq!(quote.price, BigDecimal::from_str("55.25").unwrap());
    assert_eq!(quote.session_date.map(|d| d.to_string()).as_deref(), Some("2024-03-07"));

    let url = seen.recv_timeout(Duration::from_secs(1)).unwrap();
    assert_eq!(url, "/query?function=TIME_SERIES_DAILY&symbol=DIA&apikey=TESTKEY");
    server.unblock();
}

#[tokio::test]
async fn non_success_status_is_reported_with_code() {
    let (settings, _seen, server) = spawn_provider(503, "busy");
    let fetcher = QuoteFetcher::new(&settings).unwrap();
    assert_eq!(fetcher.fetch().await, Err(FetchError::HttpStatus(503)));
    server.unblock();
}

#[tokio::test]
async fn rate_limit_note_is_typed() {
    let (settings, _seen, server) =
        spawn_provider(200, r#"{"Note": "API call frequency is 5 calls per minute."}"#);
    let fetcher = QuoteFetcher::new(&settings).unwrap();
    assert!(matches!(fetcher.fetch().await, Err(FetchError::RateLimited(_))));
    server.unblock();
}

#[tokio::test]
async fn refused_connection_is_transport_error_without_key() {
    // grab a free port, then close it so nothing is listening
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let mut settings = Settings::default();
    settings.base_url = format!("http://127.0.0.1:{port}/query");
    settings.api_key = "SECRETKEY123".into();
    settings.request_timeout_secs = 2;

    let fetcher = QuoteFetcher::new(&settings).unwrap();
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");

    // the error text reaches the log and the status line
    let shown = FeedStatus::from(&err).text();
    for text in [err.to_string(), format!("{err:?}"), shown] {
        assert!(!text.contains("SECRETKEY123"), "{text}");
        assert!(!text.contains("apikey="), "{text}");
    }
}

#[test]
fn poller_feeds_one_quote_per_successful_tick() {
    let (settings, _seen, server) = spawn_provider(200, OK_BODY);
    let fetcher = QuoteFetcher::new(&settings).unwrap();
    let (tx, rx) = mpsc::channel();
    let poller = QuotePoller::start(fetcher, Duration::from_millis(50), tx).unwrap();

    let mut state = AppState::new(&settings);
    let mut fetched = 0usize;
    let deadline = Instant::now() + Duration::from_secs(10);
    while fetched < 3 && Instant::now() < deadline {
        if let Ok(ev) = rx.recv_timeout(Duration::from_millis(200)) {
            if matches!(ev, AppEvent::Feed(FeedEvent::QuoteFetched { .. })) {
                fetched += 1;
            }
            reduce(&mut state, ev);
            assert_eq!(state.quotes.len(), fetched);
        }
    }
    let ticks = poller.shutdown().unwrap();

    assert_eq!(fetched, 3);
    assert!(ticks >= 3, "ticks={ticks}");
    assert!(state.sell_enabled);
    assert_eq!(state.price_label, "Current Stock Price: $55.2500");
    assert_eq!(state.fetch_failed, 0);
    server.unblock();
}

#[test]
fn shutdown_stops_ticking() {
    let (settings, _seen, server) = spawn_provider(200, OK_BODY);
    let fetcher = QuoteFetcher::new(&settings).unwrap();
    let (tx, rx) = mpsc::channel();
    let poller = QuotePoller::start(fetcher, Duration::from_millis(20), tx).unwrap();

    // first tick fires immediately
    let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(
        first,
        AppEvent::Feed(FeedEvent::TickDispatched { tick: 1 })
    ));
    let ticks = poller.shutdown().unwrap();

    let dispatched_after: Vec<u64> = rx
        .try_iter()
        .filter_map(|ev| match ev {
            AppEvent::Feed(FeedEvent::TickDispatched { tick }) => Some(tick),
            _ => None,
        })
        .collect();
    assert!(dispatched_after.iter().all(|&t| t <= ticks));
    server.unblock();
}
