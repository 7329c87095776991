use super::hooks::{use_ohlc, use_trades};
use super::theme::use_theme;
use crate::application::{ActivationInputs, CHART_ERROR_MESSAGE, ChartLifecycle, GateView, LifecycleStats};
use crate::domain::{
    chart::ChartSettings,
    logging::LogComponent,
    market_data::Timespan,
    post::Post,
};
use crate::infrastructure::browser::{BrowserEngine, WindowResizeEvents};
use crate::{log_debug, log_error};
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

type BrowserLifecycle = ChartLifecycle<BrowserEngine, WindowResizeEvents>;

/// Candlestick chart with a volume overlay and an optional post marker.
///
/// The chart is rebuilt from scratch whenever the series, theme, post, latest
/// trade or `dependency` changes. `on_activate` receives the lifecycle
/// counters after every successful build.
#[component]
pub fn StockChart(
    #[prop(into)] symbol: MaybeSignal<String>,
    #[prop(into)] multiplier: MaybeSignal<u32>,
    #[prop(into)] time_span: MaybeSignal<Timespan>,
    #[prop(optional, into)] post: MaybeSignal<Option<Post>>,
    #[prop(optional)] resize: bool,
    #[prop(optional)] dependency: Option<Trigger>,
    #[prop(optional, into)] on_activate: Option<Callback<LifecycleStats>>,
) -> impl IntoView {
    let ohlc = use_ohlc(symbol.clone(), multiplier, time_span.clone());
    let trade = use_trades(symbol);
    let theme = use_theme();
    // Set once the surface is attached to the document.
    let surface = create_rw_signal(None::<web_sys::HtmlElement>);

    let state = create_memo(move |_| ohlc.state());
    let gate = create_memo(move |_| state.with(GateView::for_state));

    let lifecycle: Rc<RefCell<Option<BrowserLifecycle>>> = Rc::new(RefCell::new(
        match WindowResizeEvents::new() {
            Ok(window) => Some(ChartLifecycle::new(BrowserEngine::detect(), window, ChartSettings::new(resize))),
            Err(e) => {
                log_error!(LogComponent::Presentation("StockChart"), "❌ {}", e);
                None
            }
        },
    ));

    {
        let lifecycle = Rc::clone(&lifecycle);
        create_effect(move |_| {
            let state = state.get();
            let theme = theme.get();
            let timespan = time_span.get();
            let post = post.get();
            let trade = trade.get();
            if let Some(dependency) = dependency {
                dependency.track();
            }
            // Still holds the previous surface after the gate swaps it out.
            let element = surface.get().filter(|element| element.is_connected());

            let stats = {
                let mut guard = lifecycle.borrow_mut();
                let Some(lifecycle) = guard.as_mut() else {
                    return;
                };
                let (Some(series), Some(element)) = (state.ready(), element) else {
                    lifecycle.teardown();
                    return;
                };

                let inputs = ActivationInputs {
                    series: series.as_ref(),
                    theme,
                    timespan,
                    post: post.as_ref(),
                    trade: trade.as_ref(),
                };
                if let Err(e) = lifecycle.activate(&element, inputs) {
                    log_error!(LogComponent::Presentation("StockChart"), "❌ Chart activation failed: {}", e);
                    return;
                }
                lifecycle.stats()
            };
            if let Some(on_activate) = on_activate {
                on_activate.call(stats);
            }
        });
    }

    on_cleanup(move || {
        if let Some(lifecycle) = lifecycle.borrow_mut().as_mut() {
            lifecycle.unmount();
            log_debug!(
                LogComponent::Presentation("StockChart"),
                "👋 Unmounted after {} activations",
                lifecycle.stats().activations
            );
        }
    });

    move || match gate.get() {
        GateView::Placeholder => view! {
            <div class="stock-chart-skeleton" style="width: 100%; height: 100%;"></div>
        }
        .into_view(),
        GateView::Error => view! {
            <div style="width: 100%; height: 100%; display: flex; justify-content: center; align-items: center;">
                <h4 class="stock-chart-error">{CHART_ERROR_MESSAGE}</h4>
            </div>
        }
        .into_view(),
        GateView::Surface => view! {
            <div style="width: 100%; height: 100%; cursor: crosshair;"></div>
        }
        .on_mount(move |element| surface.set(Some(element.unchecked_ref::<web_sys::HtmlElement>().clone())))
        .into_view(),
    }
}
