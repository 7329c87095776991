use super::dto::parse_aggregates;
use crate::config::ProviderConfig;
use crate::domain::{
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{OhlcProvider, PriceSeries, SeriesRequest, Timestamp},
};
use crate::{log_debug, log_info};
use gloo_net::http::Request;

/// Largest page the aggregates endpoint returns.
const AGGREGATES_LIMIT: u32 = 50_000;

/// Historical aggregates from the Polygon REST API.
#[derive(Debug, Clone)]
pub struct PolygonRestClient {
    base_url: String,
    api_key: Option<String>,
    history_bars: u32,
}

impl PolygonRestClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            base_url: config.rest_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            history_bars: config.history_bars,
        }
    }

    /// Aggregates URL for the `history_bars` bars ending at `now`. Bounds are
    /// Unix milliseconds.
    pub fn aggregates_url(&self, request: &SeriesRequest, now: Timestamp) -> ChartResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ChartError::Config("Polygon API key is not configured".to_string()))?;
        let span = request.bar_ms().saturating_mul(i64::from(self.history_bars));
        let from = now.value().saturating_sub(span).max(0);
        Ok(format!(
            "{}/v2/aggs/ticker/{}/range/{}/{}/{}/{}?adjusted=true&sort=asc&limit={}&apiKey={}",
            self.base_url,
            request.symbol.value(),
            request.multiplier.value(),
            request.timespan,
            from,
            now.value(),
            AGGREGATES_LIMIT,
            api_key
        ))
    }
}

impl OhlcProvider for PolygonRestClient {
    async fn fetch_series(&self, request: &SeriesRequest) -> ChartResult<PriceSeries> {
        let url = self.aggregates_url(request, Timestamp::from_millis(js_sys::Date::now() as i64))?;
        log_info!(
            LogComponent::Infrastructure("PolygonRest"),
            "📡 Fetching {} x{} {} bars",
            request.symbol,
            request.multiplier,
            request.timespan
        );

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ChartError::Network(format!("Failed to send request: {:?}", e)))?;

        if !response.ok() {
            return Err(ChartError::Network(format!(
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChartError::Network(format!("Failed to read body: {:?}", e)))?;
        let series = PriceSeries::from_candles(parse_aggregates(&body)?);

        log_debug!(
            LogComponent::Infrastructure("PolygonRest"),
            "✅ {} bars for {}",
            series.len(),
            request.symbol
        );
        Ok(series)
    }
}
