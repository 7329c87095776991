use super::dto::{SocketAction, SocketEvent, parse_socket_frame};
use crate::config::ProviderConfig;
use crate::domain::{
    errors::{ChartError, ChartResult},
    logging::LogComponent,
    market_data::{Symbol, Trade, TradeFeed},
};
use crate::{log_debug, log_error, log_info, log_warn};
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{Message, futures::WebSocket};
use gloo_timers::future::sleep;
use std::time::Duration;

/// Live trades from the Polygon stocks socket.
#[derive(Debug, Clone)]
pub struct PolygonTradeStream {
    socket_url: String,
    api_key: Option<String>,
    max_delay_secs: u64,
}

/// Reconnect delay sequence: 1, 2, 4, ... capped at `max`.
pub fn next_delay(current: u64, max: u64) -> u64 {
    current.saturating_mul(2).min(max.max(1))
}

impl PolygonTradeStream {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            socket_url: config.socket_url.clone(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            max_delay_secs: config.reconnect_max_delay_secs,
        }
    }

    async fn connect(&self, api_key: &str, symbol: &Symbol) -> ChartResult<WebSocket> {
        log_info!(LogComponent::Infrastructure("PolygonWS"), "🔌 Connecting to {}", self.socket_url);
        let mut ws = WebSocket::open(&self.socket_url)
            .map_err(|e| ChartError::Network(format!("Failed to open WebSocket: {:?}", e)))?;

        for action in [SocketAction::auth(api_key), SocketAction::subscribe_trades(symbol.value())] {
            ws.send(Message::Text(action.to_json()?))
                .await
                .map_err(|e| ChartError::Network(format!("Failed to send {}: {:?}", action.action, e)))?;
        }
        Ok(ws)
    }

    /// Drain one connection. Returns `Err` only for failures retrying cannot fix.
    async fn pump<F>(&self, mut ws: WebSocket, symbol: &Symbol, on_trade: &mut F) -> ChartResult<()>
    where
        F: FnMut(Trade),
    {
        while let Some(msg) = ws.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text,
                Ok(Message::Bytes(_)) => continue,
                Err(e) => {
                    log_error!(LogComponent::Infrastructure("PolygonWS"), "❌ WebSocket error: {:?}", e);
                    return Ok(());
                }
            };
            let events = match parse_socket_frame(&text) {
                Ok(events) => events,
                Err(e) => {
                    log_warn!(LogComponent::Infrastructure("PolygonWS"), "⚠️ {}", e);
                    continue;
                }
            };
            for event in events {
                match event {
                    SocketEvent::Trade(trade) if trade.sym == symbol.value() => on_trade(trade.to_domain_trade()),
                    SocketEvent::Status { status, message } if status == "auth_failed" => {
                        return Err(ChartError::Config(format!("Polygon rejected the API key: {}", message)));
                    }
                    SocketEvent::Status { status, message } => {
                        log_debug!(LogComponent::Infrastructure("PolygonWS"), "ℹ️ {}: {}", status, message);
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl TradeFeed for PolygonTradeStream {
    async fn stream_trades<F>(&self, symbol: &Symbol, mut on_trade: F) -> ChartResult<()>
    where
        F: FnMut(Trade) + 'static,
    {
        let Some(api_key) = self.api_key.as_deref() else {
            log_warn!(LogComponent::Infrastructure("PolygonWS"), "⚠️ No API key, live trades disabled");
            return Ok(());
        };

        let mut delay = 1u64;
        loop {
            match self.connect(api_key, symbol).await {
                Ok(ws) => {
                    delay = 1;
                    self.pump(ws, symbol, &mut on_trade).await?;
                }
                Err(e) => {
                    log_error!(LogComponent::Infrastructure("PolygonWS"), "❌ Connection error: {}", e);
                }
            }

            log_warn!(LogComponent::Infrastructure("PolygonWS"), "🔌 Reconnecting in {}s", delay);
            sleep(Duration::from_secs(delay)).await;
            delay = next_delay(delay, self.max_delay_secs);
        }
    }
}
