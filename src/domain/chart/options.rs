//! Option payloads handed to the chart engine. Field names serialize to the
//! camelCase keys Lightweight Charts expects; unset options are omitted so the
//! library default applies.

use super::value_objects::{Color, Dimensions, Palette};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorType {
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Background {
    #[serde(rename = "type")]
    pub kind: ColorType,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub text_color: Color,
    pub background: Background,
    pub attribution_logo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceScaleBorder {
    pub border_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridLine {
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub vert_lines: GridLine,
    pub horz_lines: GridLine,
}

/// `Normal` lets the crosshair move freely instead of snapping to bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosshairMode {
    Normal,
}

impl Serialize for CrosshairMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match self {
            Self::Normal => 0,
        };
        serializer.serialize_u8(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairLine {
    pub color: Color,
    pub label_background_color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairOptions {
    pub mode: CrosshairMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vert_line: Option<CrosshairLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horz_line: Option<CrosshairLine>,
}

/// Options for `createChart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub layout: LayoutOptions,
    pub right_price_scale: PriceScaleBorder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOptions>,
    pub crosshair: CrosshairOptions,
}

impl ChartOptions {
    pub fn new(palette: &Palette, size: Dimensions) -> Self {
        let crosshair_line =
            palette.crosshair.map(|color| CrosshairLine { color, label_background_color: color });
        Self {
            width: size.width,
            height: size.height,
            layout: LayoutOptions {
                text_color: palette.text,
                background: Background { kind: ColorType::Solid, color: palette.background },
                attribution_logo: false,
            },
            right_price_scale: PriceScaleBorder { border_visible: false },
            grid: palette.grid.map(|color| GridOptions {
                vert_lines: GridLine { color },
                horz_lines: GridLine { color },
            }),
            crosshair: CrosshairOptions {
                mode: CrosshairMode::Normal,
                vert_line: crosshair_line,
                horz_line: crosshair_line,
            },
        }
    }

    pub fn size(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Payload for `chart.applyOptions` on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeOptions {
    pub width: u32,
    pub height: u32,
}

impl From<Dimensions> for SizeOptions {
    fn from(size: Dimensions) -> Self {
        Self { width: size.width, height: size.height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeScaleOptions {
    pub time_visible: bool,
    pub seconds_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleStyle {
    pub up_color: Color,
    pub down_color: Color,
    pub border_visible: bool,
    pub wick_up_color: Color,
    pub wick_down_color: Color,
}

impl CandleStyle {
    pub fn new(palette: &Palette) -> Self {
        Self {
            up_color: palette.candle_up,
            down_color: palette.candle_down,
            border_visible: false,
            wick_up_color: palette.candle_up,
            wick_down_color: palette.candle_down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeStyle {
    pub color: Color,
    pub price_format: PriceFormat,
    /// Empty id places the histogram on its own overlay scale.
    pub price_scale_id: &'static str,
}

impl VolumeStyle {
    pub fn new(palette: &Palette) -> Self {
        Self { color: palette.volume, price_format: PriceFormat { kind: "volume" }, price_scale_id: "" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleMargins {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceScaleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_margins: Option<ScaleMargins>,
}

impl PriceScaleOptions {
    pub fn auto_scale(enabled: bool) -> Self {
        Self { auto_scale: Some(enabled), scale_margins: None }
    }

    /// `top` is the fraction of the pane kept free above the series.
    pub fn margins(top: f64, bottom: f64) -> Self {
        Self { auto_scale: None, scale_margins: Some(ScaleMargins { top, bottom }) }
    }
}
