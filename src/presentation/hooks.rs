//! Reactive data sources for the chart component.

use crate::application::{AcquisitionState, SeriesState, acquire};
use crate::config;
use crate::domain::{
    errors::ChartResult,
    logging::LogComponent,
    market_data::{OhlcProvider, PriceSeries, SeriesRequest, Symbol, Timespan, Trade, TradeFeed},
};
use crate::infrastructure::polygon::{PolygonRestClient, PolygonTradeStream};
use crate::{log_debug, log_warn};
use futures::FutureExt;
use futures::future::{AbortHandle, Abortable, LocalBoxFuture};
use leptos::*;
use std::rc::Rc;

type FetchSeries = dyn Fn(SeriesRequest) -> LocalBoxFuture<'static, ChartResult<PriceSeries>>;

/// Series loader that replaces the Polygon REST client for every chart below
/// the component that provides it.
#[derive(Clone)]
pub struct SeriesSource {
    fetch: Rc<FetchSeries>,
}

impl SeriesSource {
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(SeriesRequest) -> Fut + 'static,
        Fut: Future<Output = ChartResult<PriceSeries>> + 'static,
    {
        Self { fetch: Rc::new(move |request| fetch(request).boxed_local()) }
    }
}

impl OhlcProvider for SeriesSource {
    async fn fetch_series(&self, request: &SeriesRequest) -> ChartResult<PriceSeries> {
        (self.fetch)(request.clone()).await
    }
}

pub fn provide_series_source(source: SeriesSource) {
    provide_context(source);
}

/// Candle/volume series for the current symbol and resolution.
#[derive(Clone, Copy)]
pub struct OhlcHandle {
    resource: Resource<(String, u32, Timespan), SeriesState>,
}

impl OhlcHandle {
    /// Pending while the first response for the current key is outstanding.
    pub fn state(&self) -> SeriesState {
        if self.resource.loading().get() {
            return AcquisitionState::Pending;
        }
        self.resource.get().unwrap_or(AcquisitionState::Pending)
    }
}

/// Loads through the nearest [`SeriesSource`], or Polygon when none is provided.
pub fn use_ohlc(
    symbol: MaybeSignal<String>,
    multiplier: MaybeSignal<u32>,
    timespan: MaybeSignal<Timespan>,
) -> OhlcHandle {
    let source = use_context::<SeriesSource>();
    let resource = create_local_resource(
        move || (symbol.get(), multiplier.get(), timespan.get()),
        move |(symbol, multiplier, timespan)| {
            let source = source.clone();
            async move {
                let request = SeriesRequest::new(&symbol, multiplier, timespan);
                match source {
                    Some(source) => acquire(&source, request).await,
                    None => acquire(&PolygonRestClient::new(&config::global().provider), request).await,
                }
            }
        },
    );
    OhlcHandle { resource }
}

/// Latest trade for `symbol`. The stream restarts on symbol change and stops
/// when the owner is cleaned up.
pub fn use_trades(symbol: MaybeSignal<String>) -> ReadSignal<Option<Trade>> {
    let (trade, set_trade) = create_signal(None::<Trade>);
    let running = store_value(None::<AbortHandle>);

    let stop = move || {
        running.update_value(|handle| {
            if let Some(handle) = handle.take() {
                handle.abort();
            }
        });
    };

    create_effect(move |_| {
        let raw = symbol.get();
        stop();
        set_trade.set(None);

        let Ok(symbol) = Symbol::new(&raw) else {
            return;
        };
        let (abort, registration) = AbortHandle::new_pair();
        running.set_value(Some(abort));

        spawn_local(async move {
            let stream = PolygonTradeStream::new(&config::global().provider);
            let feed = Abortable::new(
                async move { stream.stream_trades(&symbol, move |trade| set_trade.set(Some(trade))).await },
                registration,
            );
            match feed.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    log_warn!(LogComponent::Presentation("UseTrades"), "⚠️ Trade feed stopped: {}", e);
                }
                Err(_aborted) => {
                    log_debug!(LogComponent::Presentation("UseTrades"), "🛑 Trade feed aborted");
                }
            }
        });
    });

    on_cleanup(stop);
    trade
}
