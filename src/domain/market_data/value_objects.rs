use crate::domain::errors::{ChartError, ChartResult};
use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - Price
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - Volume
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - Unix epoch milliseconds, as delivered by providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whole seconds, rounded toward negative infinity.
    pub fn to_chart_time(&self) -> ChartTime {
        ChartTime(self.0.div_euclid(1000))
    }
}

/// Value Object - Unix epoch seconds, the time unit the chart surface works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartTime(i64);

impl ChartTime {
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Value Object - Ticker symbol, upper-cased and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: &str) -> ChartResult<Self> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(ChartError::validation("Symbol cannot be empty"));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ChartError;

    fn try_from(value: &str) -> ChartResult<Self> {
        Self::new(value)
    }
}

/// Value Object - Bar-size multiplier (e.g. the 5 in "5 minute bars").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Multiplier(NonZeroU32);

impl Multiplier {
    pub fn new(value: u32) -> ChartResult<Self> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| ChartError::validation("Multiplier must be positive"))
    }

    pub fn value(&self) -> u32 {
        self.0.get()
    }
}

/// Value Object - Bar resolution unit accepted by the aggregates endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Timespan {
    Second,
    Minute,
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Timespan {
    /// Nominal bar length; months, quarters and years are approximate.
    pub fn duration_ms(&self) -> i64 {
        const SECOND: i64 = 1000;
        const DAY: i64 = 24 * 60 * 60 * SECOND;
        match self {
            Self::Second => SECOND,
            Self::Minute => 60 * SECOND,
            Self::Hour => 60 * 60 * SECOND,
            Self::Day => DAY,
            Self::Week => 7 * DAY,
            Self::Month => 30 * DAY,
            Self::Quarter => 91 * DAY,
            Self::Year => 365 * DAY,
        }
    }
}

/// Value Object - OHLCV bar values
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct OHLCV {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

impl OHLCV {
    pub fn is_valid(&self) -> bool {
        self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low <= self.open
            && self.low <= self.close
            && self.volume.value() >= 0.0
    }
}
