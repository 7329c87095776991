//! Canvas 2D fallback engine used when Lightweight Charts is not on the page.

pub mod layout;

pub use layout::*;

use crate::domain::{
    chart::{
        CandleStyle, ChartEngine, ChartHandle, ChartOptions, Dimensions, Marker, PriceScaleOptions,
        SeriesId, TimeScaleOptions, VolumeStyle,
    },
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{CandlePoint, VolumePoint},
};
use crate::{log_debug, log_trace};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

const GRID_LINES: usize = 6;
const MARKER_SIZE: f64 = 6.0;
const MARKER_FONT: &str = "11px sans-serif";

#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasEngine;

impl ChartEngine for CanvasEngine {
    type Container = HtmlElement;
    type Chart = CanvasChart;

    fn create_chart(&self, container: &HtmlElement, options: &ChartOptions) -> ChartResult<CanvasChart> {
        let document = container
            .owner_document()
            .ok_or_else(|| ChartError::rendering("container is detached from the document"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ChartError::rendering("Failed to create canvas element"))?;
        canvas.style().set_property("display", "block")?;
        container.append_child(&canvas)?;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| ChartError::rendering("2D context is not available"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::rendering("Failed to cast to 2D context"))?;

        let mut chart = CanvasChart {
            canvas,
            context,
            options: *options,
            series: Vec::new(),
            candle_style: None,
            volume_style: None,
            volume_top: 0.0,
            candles: Vec::new(),
            volumes: Vec::new(),
            markers: Vec::new(),
            removed: false,
        };
        chart.redraw()?;
        Ok(chart)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CanvasSeries {
    Candles,
    Volume,
}

pub struct CanvasChart {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    options: ChartOptions,
    series: Vec<CanvasSeries>,
    candle_style: Option<CandleStyle>,
    volume_style: Option<VolumeStyle>,
    volume_top: f64,
    candles: Vec<CandlePoint>,
    volumes: Vec<VolumePoint>,
    markers: Vec<Marker>,
    removed: bool,
}

impl CanvasChart {
    fn expect_series(&self, id: SeriesId, kind: CanvasSeries) -> ChartResult<()> {
        match self.series.get(id.0) {
            Some(found) if *found == kind => Ok(()),
            _ => Err(ChartError::rendering(format!("series {} is not a {:?} series", id.0, kind))),
        }
    }

    fn add(&mut self, kind: CanvasSeries) -> SeriesId {
        self.series.push(kind);
        SeriesId(self.series.len() - 1)
    }

    fn redraw(&mut self) -> ChartResult<()> {
        if self.removed {
            return Ok(());
        }
        let size = self.options.size();
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        let (width, height) = (f64::from(size.width), f64::from(size.height));
        let ctx = &self.context;

        ctx.set_fill_style_str(self.options.layout.background.color.as_str());
        ctx.fill_rect(0.0, 0.0, width, height);

        let Some(layout) = CanvasLayout::new(size, &self.candles, &self.volumes, self.volume_top) else {
            return Ok(());
        };

        if let Some(grid) = &self.options.grid {
            ctx.set_line_width(1.0);
            ctx.set_stroke_style_str(grid.vert_lines.color.as_str());
            ctx.begin_path();
            for (x, y) in layout.grid_lines(GRID_LINES) {
                ctx.move_to(x, 0.0);
                ctx.line_to(x, height);
                ctx.move_to(0.0, y);
                ctx.line_to(width, y);
            }
            ctx.stroke();
        }

        if let Some(style) = &self.volume_style {
            ctx.set_fill_style_str(style.color.as_str());
            let bar_width = (layout.bar_spacing() * 0.8).max(1.0);
            for (index, volume) in self.volumes.iter().enumerate() {
                let (top, bar_height) = layout.volume_bar(volume.value.value());
                ctx.fill_rect(layout.x(index) - bar_width / 2.0, top, bar_width, bar_height);
            }
        }

        if let Some(style) = &self.candle_style {
            for (index, candle) in self.candles.iter().enumerate() {
                let geometry = layout.candle(index, candle);
                let (body, wick) = if geometry.bullish {
                    (style.up_color, style.wick_up_color)
                } else {
                    (style.down_color, style.wick_down_color)
                };
                ctx.set_stroke_style_str(wick.as_str());
                ctx.begin_path();
                ctx.move_to(geometry.x, geometry.high_y);
                ctx.line_to(geometry.x, geometry.low_y);
                ctx.stroke();

                ctx.set_fill_style_str(body.as_str());
                ctx.fill_rect(
                    geometry.x - geometry.body_width / 2.0,
                    geometry.body_top,
                    geometry.body_width,
                    geometry.body_height,
                );
            }
        }

        ctx.set_font(MARKER_FONT);
        ctx.set_text_align("center");
        for marker in &self.markers {
            let Some(index) = index_at(&self.candles, marker.time) else {
                log_trace!(LogComponent::Infrastructure("CanvasChart"), "marker at {:?} has no bar", marker.time);
                continue;
            };
            let geometry = layout.candle(index, &self.candles[index]);
            let tip = geometry.high_y - MARKER_SIZE;
            ctx.set_fill_style_str(marker.color.as_str());
            ctx.begin_path();
            ctx.move_to(geometry.x, tip);
            ctx.line_to(geometry.x - MARKER_SIZE, tip - MARKER_SIZE);
            ctx.line_to(geometry.x + MARKER_SIZE, tip - MARKER_SIZE);
            ctx.close_path();
            ctx.fill();
            ctx.fill_text(&marker.text, geometry.x, tip - MARKER_SIZE * 2.0)?;
        }

        Ok(())
    }
}

impl ChartHandle for CanvasChart {
    fn configure_time_scale(&mut self, _options: &TimeScaleOptions) -> ChartResult<()> {
        Ok(())
    }

    fn fit_content(&mut self) -> ChartResult<()> {
        // every bar is always on screen
        self.redraw()
    }

    fn add_candlestick_series(&mut self, style: &CandleStyle, _scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        self.candle_style = Some(*style);
        Ok(self.add(CanvasSeries::Candles))
    }

    fn add_volume_series(&mut self, style: &VolumeStyle, scale: &PriceScaleOptions) -> ChartResult<SeriesId> {
        self.volume_style = Some(*style);
        self.volume_top = scale.scale_margins.map_or(0.0, |margins| margins.top);
        Ok(self.add(CanvasSeries::Volume))
    }

    fn set_markers(&mut self, series: SeriesId, markers: &[Marker]) -> ChartResult<()> {
        self.expect_series(series, CanvasSeries::Candles)?;
        self.markers = markers.to_vec();
        self.redraw()
    }

    fn set_candles(&mut self, series: SeriesId, data: &[CandlePoint]) -> ChartResult<()> {
        self.expect_series(series, CanvasSeries::Candles)?;
        self.candles = data.to_vec();
        self.redraw()
    }

    fn set_volumes(&mut self, series: SeriesId, data: &[VolumePoint]) -> ChartResult<()> {
        self.expect_series(series, CanvasSeries::Volume)?;
        self.volumes = data.to_vec();
        self.redraw()
    }

    fn update_candle(&mut self, series: SeriesId, point: &CandlePoint) -> ChartResult<()> {
        self.expect_series(series, CanvasSeries::Candles)?;
        match self.candles.last_mut() {
            Some(last) if last.time == point.time => *last = *point,
            _ => self.candles.push(*point),
        }
        self.redraw()
    }

    fn resize(&mut self, size: Dimensions) -> ChartResult<()> {
        self.options.width = size.width;
        self.options.height = size.height;
        self.redraw()
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        self.canvas.remove();
        log_debug!(LogComponent::Infrastructure("CanvasChart"), "🗑️ Canvas removed");
    }
}
