use super::options::{
    CandleStyle, ChartOptions, PriceScaleOptions, TimeScaleOptions, VolumeStyle,
};
use super::value_objects::{Dimensions, Marker, MarkerPosition, MarkerShape, Palette, Theme};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Timespan;
use crate::domain::post::Post;
use crate::log_warn;

pub const POST_MARKER_TEXT: &str = "Tweet here.";

/// Fraction of the pane height left free above the volume histogram.
pub const VOLUME_TOP_MARGIN: f64 = 0.9;

/// Per-component switches of the chart lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSettings {
    resize: bool,
    lock_scale: bool,
    live_updates: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ChartSettings {
    /// `resize` is the only caller-controlled switch. The price scale always
    /// auto-fits and streaming trades never patch the last candle in place.
    pub fn new(resize: bool) -> Self {
        Self { resize, lock_scale: true, live_updates: false }
    }

    pub fn resize(&self) -> bool {
        self.resize
    }

    pub fn lock_scale(&self) -> bool {
        self.lock_scale
    }

    pub fn live_updates(&self) -> bool {
        self.live_updates
    }
}

/// Complete configuration of one chart activation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBlueprint {
    pub theme: Theme,
    pub options: ChartOptions,
    pub time_scale: TimeScaleOptions,
    pub candle_style: CandleStyle,
    pub candle_scale: PriceScaleOptions,
    pub volume_style: VolumeStyle,
    pub volume_scale: PriceScaleOptions,
    pub marker: Option<Marker>,
}

impl ChartBlueprint {
    pub fn new(
        theme: Theme,
        size: Dimensions,
        timespan: Timespan,
        settings: &ChartSettings,
        post: Option<&Post>,
    ) -> Self {
        let palette = Palette::for_theme(theme);
        Self {
            theme,
            options: ChartOptions::new(&palette, size),
            time_scale: TimeScaleOptions {
                time_visible: true,
                seconds_visible: timespan == Timespan::Second,
            },
            candle_style: CandleStyle::new(&palette),
            candle_scale: PriceScaleOptions::auto_scale(settings.lock_scale()),
            volume_style: VolumeStyle::new(&palette),
            volume_scale: PriceScaleOptions::margins(VOLUME_TOP_MARGIN, 0.0),
            marker: post.and_then(|post| post_marker(post, &palette)),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        self.marker.as_slice()
    }
}

/// Arrow above the bar at the post's time. A post whose time cannot be read
/// is logged and left off the chart.
fn post_marker(post: &Post, palette: &Palette) -> Option<Marker> {
    match post.timestamp() {
        Ok(timestamp) => Some(Marker {
            time: timestamp.to_chart_time(),
            position: MarkerPosition::AboveBar,
            color: palette.marker,
            shape: MarkerShape::ArrowDown,
            text: POST_MARKER_TEXT.to_string(),
            price: 0.0,
        }),
        Err(e) => {
            log_warn!(LogComponent::Domain("ChartBlueprint"), "⚠️ Skipping post marker: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::Color;

    fn blueprint(theme: Theme, post: Option<&Post>) -> ChartBlueprint {
        ChartBlueprint::new(theme, Dimensions::new(640, 480), Timespan::Minute, &ChartSettings::default(), post)
    }

    #[test]
    fn dark_theme_overrides_candles_and_grid() {
        let dark = blueprint(Theme::Dark, None);
        assert_eq!(dark.candle_style.up_color, Color::DARK_UP);
        assert_eq!(dark.candle_style.wick_down_color, Color::DARK_DOWN);
        assert_eq!(dark.options.layout.background.color, Color::NEAR_BLACK);
        assert!(dark.options.grid.is_some());
        assert!(dark.options.crosshair.vert_line.is_some());

        let light = blueprint(Theme::Light, None);
        assert_eq!(light.candle_style.up_color, Color::TEAL);
        assert!(light.options.grid.is_none());
        assert!(light.options.crosshair.horz_line.is_none());
    }

    #[test]
    fn marker_sits_above_bar_at_post_second() {
        let post = Post::new("", "2024-03-01T14:30:15.999Z");
        let blueprint = blueprint(Theme::Dark, Some(&post));
        let marker = blueprint.marker.as_ref().expect("marker");
        assert_eq!(marker.time.value(), 1_709_303_415);
        assert_eq!(marker.position, MarkerPosition::AboveBar);
        assert_eq!(marker.shape, MarkerShape::ArrowDown);
        assert_eq!(marker.color, Color::WHITE);
        assert_eq!(marker.text, POST_MARKER_TEXT);
        assert_eq!(blueprint.markers().len(), 1);
    }

    #[test]
    fn unreadable_post_time_drops_marker() {
        let post = Post::new("", "not a time");
        assert!(blueprint(Theme::Light, Some(&post)).marker.is_none());
    }

    #[test]
    fn seconds_only_for_second_bars() {
        let settings = ChartSettings::new(true);
        let seconds = ChartBlueprint::new(Theme::Light, Dimensions::default(), Timespan::Second, &settings, None);
        assert!(seconds.time_scale.seconds_visible);
        assert!(!blueprint(Theme::Light, None).time_scale.seconds_visible);
        assert!(seconds.time_scale.time_visible);
        assert_eq!(seconds.candle_scale.auto_scale, Some(true));
    }
}
