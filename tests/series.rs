use quickcheck_macros::quickcheck;
use stock_chart_wasm::domain::market_data::{
    Candle, OHLCV, Price, PriceSeries, Timestamp, Trade, Volume,
};

fn bar(ms: i64, close: f64) -> Candle {
    Candle::new(
        Timestamp::from_millis(ms),
        OHLCV::new(
            Price::from(close),
            Price::from(close + 1.0),
            Price::from(close - 1.0),
            Price::from(close),
            Volume::from(close.abs()),
        ),
    )
}

#[quickcheck]
fn normalized_series_is_strictly_increasing(times: Vec<i32>) -> bool {
    let candles: Vec<Candle> = times.iter().map(|&t| bar(i64::from(t) * 250, 1.0)).collect();
    let series = PriceSeries::from_candles(candles);
    series.candles().windows(2).all(|w| w[0].time < w[1].time)
        && series.candles().len() == series.volumes().len()
        && series.candles().iter().zip(series.volumes()).all(|(c, v)| c.time == v.time)
}

#[quickcheck]
fn one_point_per_distinct_second(times: Vec<u16>) -> bool {
    let mut seconds: Vec<i64> = times.iter().map(|&t| i64::from(t) / 4).collect();
    seconds.sort_unstable();
    seconds.dedup();
    let series = PriceSeries::from_candles(times.iter().map(|&t| bar(i64::from(t) * 250, 5.0)).collect());
    series.len() == seconds.len()
}

#[test]
fn later_bar_wins_within_one_second() {
    let series = PriceSeries::from_candles(vec![bar(5_000, 1.0), bar(1_000, 2.0), bar(5_400, 3.0)]);
    assert_eq!(series.len(), 2);
    assert_eq!(series.candles()[0].time.value(), 1);
    assert_eq!(series.candles()[1].time.value(), 5);
    assert_eq!(series.candles()[1].close.value(), 3.0);
    assert_eq!(series.volumes()[1].value.value(), 3.0);
}

#[test]
fn range_and_volume_extremes() {
    let series = PriceSeries::from_candles(vec![bar(0, 10.0), bar(1_000, 20.0), bar(2_000, 15.0)]);
    let (low, high) = series.price_range().unwrap();
    assert_eq!(low.value(), 9.0);
    assert_eq!(high.value(), 21.0);
    assert_eq!(series.max_volume().unwrap().value(), 20.0);
    assert_eq!(series.latest().unwrap().close.value(), 15.0);
    assert!(PriceSeries::default().price_range().is_none());
}

#[test]
fn trade_merges_into_latest_candle() {
    let series = PriceSeries::from_candles(vec![bar(0, 10.0), bar(60_000, 12.0)]);
    let merged = series.merge_trade(&Trade::new(Price::from(9.5), Timestamp::from_millis(60_500))).unwrap();
    assert_eq!(merged.time.value(), 60);
    assert_eq!(merged.low.value(), 9.5);
    assert_eq!(merged.high.value(), 13.0);
    assert_eq!(merged.close.value(), 9.5);
}
