//! Chart engine backed by TradingView Lightweight Charts.

pub mod bindings;

use self::bindings::{IChartApi, ISeriesApi, ISeriesMarkersPluginApi};
use crate::domain::{
    chart::{
        CandleStyle, ChartEngine, ChartHandle, ChartOptions, Dimensions, Marker, PriceScaleOptions,
        SeriesId, SizeOptions, TimeScaleOptions, VolumeStyle,
    },
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{CandlePoint, VolumePoint},
};
use crate::infrastructure::browser::to_js;
use crate::log_debug;
use serde::Serialize;
use web_sys::HtmlElement;

#[derive(Debug, Clone, Copy, Default)]
pub struct LightweightEngine;

impl LightweightEngine {
    pub fn is_available() -> bool {
        bindings::namespace().is_some()
    }
}

impl ChartEngine for LightweightEngine {
    type Container = HtmlElement;
    type Chart = LightweightChart;

    fn create_chart(&self, container: &HtmlElement, options: &ChartOptions) -> ChartResult<LightweightChart> {
        let chart = bindings::create_chart(container, &to_js(options)?)?;
        log_debug!(
            LogComponent::Infrastructure("LightweightEngine"),
            "🆕 createChart {}x{}",
            options.width,
            options.height
        );
        Ok(LightweightChart { chart, series: Vec::new(), markers: None, removed: false })
    }
}

pub struct LightweightChart {
    chart: IChartApi,
    series: Vec<ISeriesApi>,
    markers: Option<ISeriesMarkersPluginApi>,
    removed: bool,
}

impl LightweightChart {
    fn series(&self, id: SeriesId) -> ChartResult<&ISeriesApi> {
        self.series.get(id.0).ok_or_else(|| ChartError::rendering(format!("unknown series {}", id.0)))
    }

    fn add_series<S: Serialize>(&mut self, definition: &str, style: &S, scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        let definition = bindings::series_definition(definition)?;
        let series = self.chart.add_series(&definition, &to_js(style)?)?;
        series.price_scale().apply_options(&to_js(scale)?)?;
        self.series.push(series);
        Ok(SeriesId(self.series.len() - 1))
    }

    fn set_data<T: Serialize>(&self, id: SeriesId, data: &[T]) -> ChartResult<()> {
        self.series(id)?.set_data(&to_js(&data)?)?;
        Ok(())
    }
}

impl ChartHandle for LightweightChart {
    fn configure_time_scale(&mut self, options: &TimeScaleOptions) -> ChartResult<()> {
        self.chart.time_scale().apply_options(&to_js(options)?)?;
        Ok(())
    }

    fn fit_content(&mut self) -> ChartResult<()> {
        self.chart.time_scale().fit_content()?;
        Ok(())
    }

    fn add_candlestick_series(&mut self, style: &CandleStyle, scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        self.add_series("CandlestickSeries", style, scale)
    }

    fn add_volume_series(&mut self, style: &VolumeStyle, scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        self.add_series("HistogramSeries", style, scale)
    }

    fn set_markers(&mut self, series: SeriesId, markers: &[Marker]) -> ChartResult<()> {
        let payload = to_js(&markers)?;
        if let Some(plugin) = &self.markers {
            plugin.set_markers(&payload)?;
            return Ok(());
        }
        let plugin = bindings::create_series_markers(self.series(series)?, &payload)?;
        self.markers = Some(plugin);
        Ok(())
    }

    fn set_candles(&mut self, series: SeriesId, data: &[CandlePoint]) -> ChartResult<()> {
        self.set_data(series, data)
    }

    fn set_volumes(&mut self, series: SeriesId, data: &[VolumePoint]) -> ChartResult<()> {
        self.set_data(series, data)
    }

    fn update_candle(&mut self, series: SeriesId, point: &CandlePoint) -> ChartResult<()> {
        self.series(series)?.update(&to_js(point)?)?;
        Ok(())
    }

    fn resize(&mut self, size: Dimensions) -> ChartResult<()> {
        self.chart.apply_options(&to_js(&SizeOptions::from(size))?)?;
        Ok(())
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        self.markers = None;
        self.series.clear();
        self.chart.remove();
    }
}
