//! Browser glue shared by the DOM-backed chart engines.

pub mod resize;

pub use resize::*;

use crate::domain::{
    chart::{
        CandleStyle, ChartEngine, ChartHandle, ChartOptions, Dimensions, Marker, PriceScaleOptions,
        SeriesId, TimeScaleOptions, VolumeStyle,
    },
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{CandlePoint, VolumePoint},
};
use crate::infrastructure::canvas::{CanvasChart, CanvasEngine};
use crate::infrastructure::lightweight::{LightweightChart, LightweightEngine};
use crate::log_info;
use gloo::utils::format::JsValueSerdeExt;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

impl From<JsValue> for ChartError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        ChartError::Rendering(message)
    }
}

/// Serialize an option payload into a plain JS object.
pub fn to_js<T: Serialize>(value: &T) -> ChartResult<JsValue> {
    JsValue::from_serde(value).map_err(|e| ChartError::rendering(format!("Failed to serialize options: {}", e)))
}

/// Lightweight Charts when the page loaded it, the Canvas renderer otherwise.
#[derive(Debug, Clone, Copy)]
pub enum BrowserEngine {
    Lightweight(LightweightEngine),
    Canvas(CanvasEngine),
}

impl BrowserEngine {
    pub fn detect() -> Self {
        if LightweightEngine::is_available() {
            Self::Lightweight(LightweightEngine)
        } else {
            log_info!(
                LogComponent::Infrastructure("BrowserEngine"),
                "🎨 LightweightCharts not found, using canvas renderer"
            );
            Self::Canvas(CanvasEngine)
        }
    }
}

impl ChartEngine for BrowserEngine {
    type Container = HtmlElement;
    type Chart = BrowserChart;

    fn create_chart(&self, container: &HtmlElement, options: &ChartOptions) -> ChartResult<BrowserChart> {
        match self {
            Self::Lightweight(engine) => engine.create_chart(container, options).map(BrowserChart::Lightweight),
            Self::Canvas(engine) => engine.create_chart(container, options).map(BrowserChart::Canvas),
        }
    }
}

pub enum BrowserChart {
    Lightweight(LightweightChart),
    Canvas(CanvasChart),
}

macro_rules! delegate {
    ($self:ident, $chart:ident => $call:expr) => {
        match $self {
            BrowserChart::Lightweight($chart) => $call,
            BrowserChart::Canvas($chart) => $call,
        }
    };
}

impl ChartHandle for BrowserChart {
    fn configure_time_scale(&mut self, options: &TimeScaleOptions) -> ChartResult<()> {
        delegate!(self, chart => chart.configure_time_scale(options))
    }

    fn fit_content(&mut self) -> ChartResult<()> {
        delegate!(self, chart => chart.fit_content())
    }

    fn add_candlestick_series(&mut self, style: &CandleStyle, scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        delegate!(self, chart => chart.add_candlestick_series(style, scale))
    }

    fn add_volume_series(&mut self, style: &VolumeStyle, scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        delegate!(self, chart => chart.add_volume_series(style, scale))
    }

    fn set_markers(&mut self, series: SeriesId, markers: &[Marker]) -> ChartResult<()> {
        delegate!(self, chart => chart.set_markers(series, markers))
    }

    fn set_candles(&mut self, series: SeriesId, data: &[CandlePoint]) -> ChartResult<()> {
        delegate!(self, chart => chart.set_candles(series, data))
    }

    fn set_volumes(&mut self, series: SeriesId, data: &[VolumePoint]) -> ChartResult<()> {
        delegate!(self, chart => chart.set_volumes(series, data))
    }

    fn update_candle(&mut self, series: SeriesId, point: &CandlePoint) -> ChartResult<()> {
        delegate!(self, chart => chart.update_candle(series, point))
    }

    fn resize(&mut self, size: Dimensions) -> ChartResult<()> {
        delegate!(self, chart => chart.resize(size))
    }

    fn remove(&mut self) {
        delegate!(self, chart => chart.remove())
    }
}
