use crate::domain::chart::Dimensions;
use crate::domain::market_data::{CandlePoint, ChartTime, VolumePoint};

/// Fraction of the height kept empty above the highest and below the lowest price.
const PRICE_PADDING: f64 = 0.08;
const BODY_RATIO: f64 = 0.6;

/// Pixel geometry of one canvas frame, computed once per redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    width: f64,
    height: f64,
    bars: usize,
    min_price: f64,
    max_price: f64,
    max_volume: f64,
    volume_top: f64,
}

/// Wick and body of one candle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    pub x: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub body_width: f64,
    pub bullish: bool,
}

impl CanvasLayout {
    /// `None` for an empty surface or an empty series.
    pub fn new(
        size: Dimensions,
        candles: &[CandlePoint],
        volumes: &[VolumePoint],
        volume_top_margin: f64,
    ) -> Option<Self> {
        if size.is_empty() || candles.is_empty() {
            return None;
        }
        let (min_price, max_price) = candles.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.low.value()), hi.max(c.high.value()))
        });
        let max_volume = volumes.iter().map(|v| v.value.value()).fold(0.0, f64::max);
        Some(Self {
            width: f64::from(size.width),
            height: f64::from(size.height),
            bars: candles.len(),
            min_price,
            max_price,
            max_volume,
            volume_top: volume_top_margin.clamp(0.0, 1.0),
        })
    }

    pub fn bar_spacing(&self) -> f64 {
        self.width / self.bars as f64
    }

    pub fn x(&self, index: usize) -> f64 {
        self.bar_spacing() * (index as f64 + 0.5)
    }

    /// Vertical pixel of a price; a flat series sits on the middle line.
    pub fn price_y(&self, price: f64) -> f64 {
        let range = self.max_price - self.min_price;
        if range <= f64::EPSILON {
            return self.height / 2.0;
        }
        let padding = self.height * PRICE_PADDING;
        padding + (self.max_price - price) / range * (self.height - 2.0 * padding)
    }

    pub fn candle(&self, index: usize, candle: &CandlePoint) -> CandleGeometry {
        let open_y = self.price_y(candle.open.value());
        let close_y = self.price_y(candle.close.value());
        CandleGeometry {
            x: self.x(index),
            high_y: self.price_y(candle.high.value()),
            low_y: self.price_y(candle.low.value()),
            body_top: open_y.min(close_y),
            body_height: (open_y - close_y).abs().max(1.0),
            body_width: (self.bar_spacing() * BODY_RATIO).max(1.0),
            bullish: candle.is_bullish(),
        }
    }

    /// Volume bar as (top, height). Bars share the band below `volume_top`.
    pub fn volume_bar(&self, value: f64) -> (f64, f64) {
        let band = self.height * (1.0 - self.volume_top);
        let bar = if self.max_volume > 0.0 { value / self.max_volume * band } else { 0.0 };
        (self.height - bar, bar)
    }

    pub fn grid_lines(&self, count: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        (1..=count).map(move |i| {
            let t = i as f64 / (count + 1) as f64;
            (self.width * t, self.height * t)
        })
    }
}

/// Bar index at a chart time, if a candle starts exactly there.
pub fn index_at(candles: &[CandlePoint], time: ChartTime) -> Option<usize> {
    candles.binary_search_by_key(&time, |c| c.time).ok()
}
