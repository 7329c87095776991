//! Runtime configuration, read once from the page.

use crate::domain::{
    errors::{ChartError, ChartResult},
    logging::LogLevel,
};
use gloo::utils::format::JsValueSerdeExt;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Name of the JS global holding the configuration (object or JSON string).
pub const CONFIG_GLOBAL: &str = "STOCK_CHART_CONFIG";

static CONFIG: OnceCell<ChartConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    pub rest_base_url: String,
    pub socket_url: String,
    pub api_key: Option<String>,
    /// Bars requested per series, counted back from now.
    pub history_bars: u32,
    pub reconnect_max_delay_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rest_base_url: "https://api.polygon.io".to_string(),
            socket_url: "wss://socket.polygon.io/stocks".to_string(),
            api_key: None,
            history_bars: 500,
            reconnect_max_delay_secs: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub log_level: LogLevel,
    pub provider: ProviderConfig,
}

impl ChartConfig {
    pub fn from_json(json: &str) -> ChartResult<Self> {
        serde_json::from_str::<Self>(json)
            .map_err(|e| ChartError::Config(format!("Invalid configuration: {}", e)))?
            .validated()
    }

    /// Read `window.STOCK_CHART_CONFIG`; defaults when it is not set.
    pub fn from_window() -> ChartResult<Self> {
        let value = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL))
            .map_err(|_| ChartError::Config(format!("{} is not readable", CONFIG_GLOBAL)))?;
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        if let Some(json) = value.as_string() {
            return Self::from_json(&json);
        }
        value
            .into_serde::<Self>()
            .map_err(|e| ChartError::Config(format!("Invalid configuration: {}", e)))?
            .validated()
    }

    fn validated(self) -> ChartResult<Self> {
        if self.provider.history_bars == 0 {
            return Err(ChartError::Config("historyBars must be positive".to_string()));
        }
        if self.provider.reconnect_max_delay_secs == 0 {
            return Err(ChartError::Config("reconnectMaxDelaySecs must be positive".to_string()));
        }
        Ok(self)
    }
}

/// Install the process-wide configuration. Later calls are ignored.
pub fn init(config: ChartConfig) {
    let _ = CONFIG.set(config);
}

pub fn global() -> &'static ChartConfig {
    CONFIG.get_or_init(ChartConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ChartConfig::from_json(r#"{"logLevel":"warn","provider":{"apiKey":"abc"}}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.provider.api_key.as_deref(), Some("abc"));
        assert_eq!(config.provider.history_bars, 500);
        assert_eq!(config.provider.reconnect_max_delay_secs, 32);
    }

    #[test]
    fn rejects_zero_history() {
        let err = ChartConfig::from_json(r#"{"provider":{"historyBars":0}}"#).unwrap_err();
        assert!(matches!(err, ChartError::Config(_)));
        assert!(ChartConfig::from_json("{").is_err());
    }
}
