use crate::domain::{
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{Candle, OHLCV, Price, Timestamp, Trade, Volume},
};
use crate::log_warn;
use serde::{Deserialize, Serialize};

/// Body of `/v2/aggs/ticker/.../range/...`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatesResponse {
    #[serde(default)]
    pub ticker: Option<String>,
    pub status: String,
    #[serde(default)]
    pub results_count: Option<u64>,
    #[serde(default)]
    pub results: Vec<AggregateBar>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AggregateBar {
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
    /// Bar start, Unix milliseconds.
    #[serde(rename = "t")]
    pub start: i64,
    #[serde(rename = "vw", default)]
    pub vwap: Option<f64>,
    #[serde(rename = "n", default)]
    pub transactions: Option<u64>,
}

impl AggregateBar {
    pub fn to_domain_candle(&self) -> ChartResult<Candle> {
        let ohlcv = OHLCV::new(
            Price::new(self.open),
            Price::new(self.high),
            Price::new(self.low),
            Price::new(self.close),
            Volume::new(self.volume),
        );
        if !ohlcv.is_valid() {
            return Err(ChartError::Decode(format!("Invalid OHLCV bar at {}", self.start)));
        }
        Ok(Candle::new(Timestamp::from_millis(self.start), ohlcv))
    }
}

/// Decode an aggregates body. Malformed bars are dropped; a non-OK status is
/// an error.
pub fn parse_aggregates(body: &str) -> ChartResult<Vec<Candle>> {
    let response: AggregatesResponse = serde_json::from_str(body)
        .map_err(|e| ChartError::Decode(format!("Failed to parse aggregates: {}", e)))?;

    match response.status.as_str() {
        "OK" | "DELAYED" => {}
        status => {
            let reason = response.error.or(response.message).unwrap_or_default();
            return Err(ChartError::Network(format!("Polygon status {}: {}", status, reason)));
        }
    }

    Ok(response
        .results
        .iter()
        .filter_map(|bar| match bar.to_domain_candle() {
            Ok(candle) => Some(candle),
            Err(e) => {
                log_warn!(LogComponent::Infrastructure("PolygonDto"), "⚠️ {}", e);
                None
            }
        })
        .collect())
}

/// Client → server control message.
#[derive(Debug, Serialize)]
pub struct SocketAction {
    pub action: &'static str,
    pub params: String,
}

impl SocketAction {
    pub fn auth(api_key: &str) -> Self {
        Self { action: "auth", params: api_key.to_string() }
    }

    pub fn subscribe_trades(symbol: &str) -> Self {
        Self { action: "subscribe", params: format!("T.{}", symbol) }
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|e| ChartError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "ev")]
pub enum SocketEvent {
    #[serde(rename = "status")]
    Status {
        status: String,
        #[serde(default)]
        message: String,
    },
    #[serde(rename = "T")]
    Trade(TradeEvent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeEvent {
    pub sym: String,
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "s", default)]
    pub size: Option<f64>,
    #[serde(rename = "t")]
    pub timestamp: i64,
}

impl TradeEvent {
    pub fn to_domain_trade(&self) -> Trade {
        Trade { price: Price::new(self.price), timestamp: Timestamp::from_millis(self.timestamp), size: self.size }
    }
}

/// Every socket frame is a JSON array of events.
pub fn parse_socket_frame(text: &str) -> ChartResult<Vec<SocketEvent>> {
    serde_json::from_str(text).map_err(|e| ChartError::Decode(format!("Failed to parse socket frame: {}", e)))
}
