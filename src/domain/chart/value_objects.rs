use crate::domain::market_data::ChartTime;
use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - CSS color string passed through to the chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub const fn css(value: &'static str) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub const BLACK: Color = Color("black");
    pub const WHITE: Color = Color("white");
    pub const TEAL: Color = Color("#26a69a");
    pub const CORAL: Color = Color("#ef5350");
    pub const NEAR_BLACK: Color = Color("#0a0a0a");
    pub const LIGHT_GRAY_TEXT: Color = Color("#DDD");
    pub const DARK_GRID: Color = Color("#444");
    pub const VIOLET: Color = Color("#9B7DFF");
    pub const DARK_UP: Color = Color("rgb(54, 116, 217)");
    pub const DARK_DOWN: Color = Color("rgb(225, 50, 85)");
}

/// Value Object - visual theme, derived from the page's theme name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Only an explicit "dark" selects the dark theme; "system", unknown or
    /// missing names fall back to light.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(n) if n.trim().eq_ignore_ascii_case("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Colors for one theme. `None` leaves the chart library default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub background: Color,
    pub grid: Option<Color>,
    pub crosshair: Option<Color>,
    pub candle_up: Color,
    pub candle_down: Color,
    pub volume: Color,
    pub marker: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        text: Color::BLACK,
        background: Color::WHITE,
        grid: None,
        crosshair: None,
        candle_up: Color::TEAL,
        candle_down: Color::CORAL,
        volume: Color::TEAL,
        marker: Color::BLACK,
    };

    pub const DARK: Palette = Palette {
        text: Color::LIGHT_GRAY_TEXT,
        background: Color::NEAR_BLACK,
        grid: Some(Color::DARK_GRID),
        crosshair: Some(Color::VIOLET),
        candle_up: Color::DARK_UP,
        candle_down: Color::DARK_DOWN,
        volume: Color::TEAL,
        marker: Color::WHITE,
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }
}

/// Value Object - surface size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    AboveBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    ArrowDown,
}

/// Single point-in-time annotation on the candle series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub time: ChartTime,
    pub position: MarkerPosition,
    pub color: Color,
    pub shape: MarkerShape,
    pub text: String,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_name_mapping() {
        assert_eq!(Theme::from_name(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_name(Some("Dark ")), Theme::Dark);
        assert_eq!(Theme::from_name(Some("system")), Theme::Light);
        assert_eq!(Theme::from_name(None), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn marker_enums_serialize_camel_case() {
        assert_eq!(serde_json::to_string(&MarkerPosition::AboveBar).unwrap(), "\"aboveBar\"");
        assert_eq!(serde_json::to_string(&MarkerShape::ArrowDown).unwrap(), "\"arrowDown\"");
    }
}
