use futures::executor::block_on;
use std::cell::Cell;
use stock_chart_wasm::application::{AcquisitionState, CHART_ERROR_MESSAGE, GateView, acquire};
use stock_chart_wasm::domain::errors::{ChartError, ChartResult};
use stock_chart_wasm::domain::market_data::{
    Candle, OHLCV, OhlcProvider, Price, PriceSeries, SeriesRequest, Timespan, Timestamp, Volume,
};

/// Provider answering every request with a fixed outcome.
struct StubProvider {
    outcome: ChartResult<PriceSeries>,
    calls: Cell<usize>,
}

impl StubProvider {
    fn new(outcome: ChartResult<PriceSeries>) -> Self {
        Self { outcome, calls: Cell::new(0) }
    }
}

impl OhlcProvider for StubProvider {
    async fn fetch_series(&self, _request: &SeriesRequest) -> ChartResult<PriceSeries> {
        self.calls.set(self.calls.get() + 1);
        self.outcome.clone()
    }
}

fn one_bar() -> PriceSeries {
    PriceSeries::from_candles(vec![Candle::new(
        Timestamp::from_millis(1_000),
        OHLCV::new(
            Price::from(10.0),
            Price::from(11.0),
            Price::from(9.0),
            Price::from(10.5),
            Volume::from(42.0),
        ),
    )])
}

#[test]
fn successful_fetch_is_ready() {
    let provider = StubProvider::new(Ok(one_bar()));
    let state = block_on(acquire(&provider, SeriesRequest::new("aapl", 1, Timespan::Day)));
    let series = state.ready().expect("ready");
    assert_eq!(series.len(), 1);
    assert_eq!(series.volumes()[0].value.value(), 42.0);
    assert_eq!(GateView::for_state(&state), GateView::Surface);
}

#[test]
fn empty_series_is_no_data() {
    let provider = StubProvider::new(Ok(PriceSeries::default()));
    let state = block_on(acquire(&provider, SeriesRequest::new("AAPL", 5, Timespan::Minute)));
    match &state {
        AcquisitionState::Failed(ChartError::NoData(what)) => assert_eq!(what, "AAPL 5 minute"),
        other => panic!("expected NoData, got {:?}", other),
    }
    assert_eq!(GateView::for_state(&state), GateView::Error);
}

#[test]
fn transport_error_is_failed() {
    let provider = StubProvider::new(Err(ChartError::Network("HTTP error: 503".into())));
    let state = block_on(acquire(&provider, SeriesRequest::new("MSFT", 1, Timespan::Hour)));
    assert_eq!(state, AcquisitionState::Failed(ChartError::Network("HTTP error: 503".into())));
    assert!(state.is_failed());
}

#[test]
fn invalid_request_never_reaches_provider() {
    let provider = StubProvider::new(Ok(one_bar()));
    let empty_symbol = block_on(acquire(&provider, SeriesRequest::new("  ", 1, Timespan::Day)));
    let zero_multiplier = block_on(acquire(&provider, SeriesRequest::new("AAPL", 0, Timespan::Day)));
    assert!(matches!(empty_symbol, AcquisitionState::Failed(ChartError::Validation(_))));
    assert!(matches!(zero_multiplier, AcquisitionState::Failed(ChartError::Validation(_))));
    assert_eq!(provider.calls.get(), 0);
}

#[test]
fn gate_follows_acquisition_state() {
    assert_eq!(GateView::for_state(&AcquisitionState::<()>::from_outcome(None)), GateView::Placeholder);
    assert!(AcquisitionState::<()>::from_outcome(None).is_pending());
    let failed = AcquisitionState::<()>::from_outcome(Some(Err(ChartError::Decode("bad".into()))));
    assert_eq!(GateView::for_state(&failed), GateView::Error);
    assert!(!GateView::Error.hosts_chart());
    assert!(!GateView::Placeholder.hosts_chart());
    assert_eq!(CHART_ERROR_MESSAGE, "Error loading chart data.");
}
