use crate::domain::errors::ChartResult;
use crate::domain::market_data::{Multiplier, PriceSeries, Symbol, Timespan, Trade};

/// Validated parameters of one OHLC/volume request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesRequest {
    pub symbol: Symbol,
    pub multiplier: Multiplier,
    pub timespan: Timespan,
}

impl SeriesRequest {
    pub fn new(symbol: &str, multiplier: u32, timespan: Timespan) -> ChartResult<Self> {
        Ok(Self { symbol: Symbol::new(symbol)?, multiplier: Multiplier::new(multiplier)?, timespan })
    }

    /// Length of one bar in milliseconds, clamped at `i64::MAX`.
    pub fn bar_ms(&self) -> i64 {
        self.timespan.duration_ms().saturating_mul(i64::from(self.multiplier.value()))
    }
}

/// Source of historical candles and volumes.
#[allow(async_fn_in_trait)]
pub trait OhlcProvider {
    async fn fetch_series(&self, request: &SeriesRequest) -> ChartResult<PriceSeries>;
}

/// Source of live trades for one symbol. Runs until the stream ends or the
/// surrounding future is aborted.
#[allow(async_fn_in_trait)]
pub trait TradeFeed {
    async fn stream_trades<F>(&self, symbol: &Symbol, on_trade: F) -> ChartResult<()>
    where
        F: FnMut(Trade) + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_length_scales_with_multiplier() {
        assert_eq!(SeriesRequest::new("AAPL", 5, Timespan::Minute).unwrap().bar_ms(), 300_000);
    }

    #[test]
    fn huge_multiplier_saturates_bar_length() {
        let request = SeriesRequest::new("AAPL", 300_000_000, Timespan::Year).unwrap();
        assert_eq!(request.bar_ms(), i64::MAX);
    }
}
