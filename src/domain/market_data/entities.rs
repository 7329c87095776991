pub use super::value_objects::{ChartTime, OHLCV, Price, Timestamp, Volume};
use serde::{Deserialize, Serialize};

/// Domain entity - provider-side bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: Timestamp,
    pub ohlcv: OHLCV,
}

impl Candle {
    pub fn new(timestamp: Timestamp, ohlcv: OHLCV) -> Self {
        Self { timestamp, ohlcv }
    }
}

/// Candlestick point in chart time, shaped the way the chart surface reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandlePoint {
    pub time: ChartTime,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl CandlePoint {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

impl From<&Candle> for CandlePoint {
    fn from(candle: &Candle) -> Self {
        Self {
            time: candle.timestamp.to_chart_time(),
            open: candle.ohlcv.open,
            high: candle.ohlcv.high,
            low: candle.ohlcv.low,
            close: candle.ohlcv.close,
        }
    }
}

/// Histogram point for the volume overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumePoint {
    pub time: ChartTime,
    pub value: Volume,
}

impl From<&Candle> for VolumePoint {
    fn from(candle: &Candle) -> Self {
        Self { time: candle.timestamp.to_chart_time(), value: candle.ohlcv.volume }
    }
}

/// Latest trade from the live feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub price: Price,
    pub timestamp: Timestamp,
    pub size: Option<f64>,
}

impl Trade {
    pub fn new(price: Price, timestamp: Timestamp) -> Self {
        Self { price, timestamp, size: None }
    }
}

/// Candle and volume series for one symbol/resolution, strictly increasing by
/// chart time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    candles: Vec<CandlePoint>,
    volumes: Vec<VolumePoint>,
}

impl PriceSeries {
    /// Build from provider bars in any order. Bars falling into the same
    /// chart second collapse to the last one received.
    pub fn from_candles(mut candles: Vec<Candle>) -> Self {
        // stable sort keeps arrival order inside one timestamp
        candles.sort_by_key(|c| c.timestamp.to_chart_time());

        let mut series = Self {
            candles: Vec::with_capacity(candles.len()),
            volumes: Vec::with_capacity(candles.len()),
        };
        for candle in &candles {
            let point = CandlePoint::from(candle);
            let volume = VolumePoint::from(candle);
            match series.candles.last_mut() {
                Some(last) if last.time == point.time => {
                    *last = point;
                    if let Some(last_volume) = series.volumes.last_mut() {
                        *last_volume = volume;
                    }
                }
                _ => {
                    series.candles.push(point);
                    series.volumes.push(volume);
                }
            }
        }
        series
    }

    pub fn candles(&self) -> &[CandlePoint] {
        &self.candles
    }

    pub fn volumes(&self) -> &[VolumePoint] {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn latest(&self) -> Option<&CandlePoint> {
        self.candles.last()
    }

    /// Price range over all candles as (low, high).
    pub fn price_range(&self) -> Option<(Price, Price)> {
        let first = self.candles.first()?;
        Some(self.candles.iter().fold((first.low, first.high), |(lo, hi), c| {
            (
                if c.low < lo { c.low } else { lo },
                if c.high > hi { c.high } else { hi },
            )
        }))
    }

    pub fn max_volume(&self) -> Option<Volume> {
        self.volumes
            .iter()
            .map(|v| v.value)
            .fold(None, |acc, v| match acc {
                Some(max) if max >= v => Some(max),
                _ => Some(v),
            })
    }

    /// Fold a live trade into the last candle. Returns `None` when there is no
    /// candle yet or the trade predates it.
    pub fn merge_trade(&self, trade: &Trade) -> Option<CandlePoint> {
        let last = self.candles.last()?;
        if trade.timestamp.to_chart_time() < last.time {
            return None;
        }
        let price = trade.price;
        Some(CandlePoint {
            time: last.time,
            open: last.open,
            high: if price > last.high { price } else { last.high },
            low: if price < last.low { price } else { last.low },
            close: price,
        })
    }
}
