use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::market_data::Timestamp;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A scraped social post that can be pinned onto the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub person_id: Option<i64>,
    #[serde(default)]
    pub text: String,
    /// RFC 3339 publication time. A value without offset is read as UTC, a
    /// bare date as its UTC midnight.
    pub time: String,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub retweets: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
}

impl Post {
    pub fn new(text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: None,
            person_id: None,
            text: text.into(),
            time: time.into(),
            comments: 0,
            retweets: 0,
            likes: 0,
            views: 0,
        }
    }

    pub fn timestamp(&self) -> ChartResult<Timestamp> {
        let raw = self.time.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Timestamp::from_millis(parsed.timestamp_millis()));
        }
        let naive = match NAIVE_FORMATS.iter().find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok()) {
            Some(naive) => naive,
            None => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| ChartError::validation(format!("Invalid post time '{}': {}", raw, e)))?
                .and_time(NaiveTime::MIN),
        };
        Ok(Timestamp::from_millis(naive.and_utc().timestamp_millis()))
    }
}
