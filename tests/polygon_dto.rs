use stock_chart_wasm::domain::errors::ChartError;
use stock_chart_wasm::domain::market_data::PriceSeries;
use stock_chart_wasm::infrastructure::polygon::{
    SocketAction, SocketEvent, TradeEvent, next_delay, parse_aggregates, parse_socket_frame,
};

const AGGREGATES: &str = r#"{
    "ticker": "AAPL",
    "queryCount": 3,
    "resultsCount": 3,
    "adjusted": true,
    "status": "OK",
    "request_id": "6a7e466379af0a71039d60cc78e72282",
    "results": [
        {"v": 70790813, "vw": 131.6292, "o": 130.465, "c": 131.96, "h": 132.63, "l": 130.23, "t": 1673240400000, "n": 645365},
        {"v": 63896155, "vw": 133.5685, "o": 132.47, "c": 133.49, "h": 134.09, "l": 132.2, "t": 1673326800000, "n": 506723},
        {"v": 69458949, "o": 133.88, "c": 133.41, "h": 134.26, "l": 132.81, "t": 1673154000000}
    ]
}"#;

#[test]
fn aggregates_decode_into_sorted_series() {
    let candles = parse_aggregates(AGGREGATES).unwrap();
    assert_eq!(candles.len(), 3);
    assert!((candles[0].ohlcv.open.value() - 130.465).abs() < f64::EPSILON);
    assert!((candles[0].ohlcv.volume.value() - 70_790_813.0).abs() < f64::EPSILON);

    let series = PriceSeries::from_candles(candles);
    let times: Vec<i64> = series.candles().iter().map(|c| c.time.value()).collect();
    assert_eq!(times, vec![1_673_154_000, 1_673_240_400, 1_673_326_800]);
}

#[test]
fn delayed_status_is_accepted() {
    let body = r#"{"status":"DELAYED","results":[{"o":1,"h":1,"l":1,"c":1,"v":0,"t":0}]}"#;
    assert_eq!(parse_aggregates(body).unwrap().len(), 1);
}

#[test]
fn missing_results_is_empty_not_error() {
    let body = r#"{"ticker":"ZZZZ","status":"OK","resultsCount":0}"#;
    assert!(parse_aggregates(body).unwrap().is_empty());
}

#[test]
fn error_status_is_network_error() {
    let body = r#"{"status":"ERROR","request_id":"x","error":"Unknown API Key"}"#;
    match parse_aggregates(body) {
        Err(ChartError::Network(msg)) => assert!(msg.contains("Unknown API Key")),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn malformed_body_is_decode_error() {
    assert!(matches!(parse_aggregates("<html>"), Err(ChartError::Decode(_))));
}

#[test]
fn socket_frame_mixes_status_and_trades() {
    let frame = r#"[
        {"ev":"status","status":"auth_success","message":"authenticated"},
        {"ev":"T","sym":"AAPL","i":"52983525029461","x":4,"p":171.25,"s":100,"c":[14,41],"t":1700000000123,"q":1,"z":3},
        {"ev":"Q","sym":"AAPL","bp":171.2,"ap":171.3}
    ]"#;
    let events = parse_socket_frame(frame).unwrap();
    assert_eq!(
        events[0],
        SocketEvent::Status { status: "auth_success".into(), message: "authenticated".into() }
    );
    assert_eq!(
        events[1],
        SocketEvent::Trade(TradeEvent {
            sym: "AAPL".into(),
            price: 171.25,
            size: Some(100.0),
            timestamp: 1_700_000_000_123,
        })
    );
    assert_eq!(events[2], SocketEvent::Other);

    let SocketEvent::Trade(trade) = &events[1] else {
        unreachable!()
    };
    let trade = trade.to_domain_trade();
    assert_eq!(trade.timestamp.to_chart_time().value(), 1_700_000_000);
    assert_eq!(trade.price.value(), 171.25);
}

#[test]
fn subscribe_frame_targets_trade_channel() {
    assert_eq!(
        SocketAction::subscribe_trades("AAPL").to_json().unwrap(),
        r#"{"action":"subscribe","params":"T.AAPL"}"#
    );
}

#[test]
fn reconnect_backoff_respects_uneven_cap() {
    assert_eq!(next_delay(8, 20), 16);
    assert_eq!(next_delay(16, 20), 20);
    assert_eq!(next_delay(20, 20), 20);
    assert_eq!(next_delay(u64::MAX, 60), 60);
}
