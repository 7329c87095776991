use gloo_timers::future::sleep;
use leptos::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use stock_chart_wasm::application::LifecycleStats;
use stock_chart_wasm::domain::market_data::{Candle, OHLCV, Price, PriceSeries, Timespan, Timestamp, Volume};
use stock_chart_wasm::presentation::{SeriesSource, StockChart, ThemeContext, provide_series_source, provide_theme};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn host() -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap().dyn_into::<web_sys::HtmlElement>().unwrap();
    element.style().set_property("width", "400px").unwrap();
    element.style().set_property("height", "300px").unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn series() -> PriceSeries {
    PriceSeries::from_candles(
        (0..20)
            .map(|i| {
                let base = 100.0 + i as f64;
                Candle::new(
                    Timestamp::from_millis(1_700_000_000_000 + i * 86_400_000),
                    OHLCV::new(
                        Price::from(base),
                        Price::from(base + 2.0),
                        Price::from(base - 1.0),
                        Price::from(base + 1.0),
                        Volume::from(1_000.0),
                    ),
                )
            })
            .collect(),
    )
}

/// Answers every request with `series()` after `delay`.
fn delayed_source(delay: Duration) -> SeriesSource {
    SeriesSource::new(move |_request| async move {
        sleep(delay).await;
        Ok(series())
    })
}

fn canvas(host: &web_sys::HtmlElement) -> Option<web_sys::Element> {
    host.query_selector("canvas").unwrap()
}

/// The canvas is the only child of its surface.
fn sole_canvas(host: &web_sys::HtmlElement) -> web_sys::Element {
    let canvas = canvas(host).expect("chart canvas");
    assert_eq!(canvas.parent_element().unwrap().child_element_count(), 1);
    canvas
}

#[derive(Clone, Copy)]
struct Handles {
    theme: ThemeContext,
    rebuild: Trigger,
    symbol: RwSignal<String>,
}

/// Mounts a chart fed by `source` and returns the signals driving it plus
/// the lifecycle counters reported after each activation.
fn mount_chart(host: &web_sys::HtmlElement, source: SeriesSource) -> (Handles, Rc<RefCell<Vec<LifecycleStats>>>) {
    let activations = Rc::new(RefCell::new(Vec::new()));
    let handles = Rc::new(Cell::new(None));
    {
        let activations = Rc::clone(&activations);
        let handles = Rc::clone(&handles);
        mount_to(host.clone(), move || {
            let theme = provide_theme(Some("light"));
            provide_series_source(source);
            let rebuild = create_trigger();
            let symbol = create_rw_signal("AAPL".to_string());
            handles.set(Some(Handles { theme, rebuild, symbol }));
            let on_activate = Callback::new(move |stats: LifecycleStats| activations.borrow_mut().push(stats));
            view! {
                <StockChart
                    symbol=symbol
                    multiplier=1u32
                    time_span=Timespan::Day
                    dependency=rebuild
                    on_activate=on_activate
                />
            }
        });
    }
    (handles.get().expect("mounted"), activations)
}

fn stats(activations: u64, teardowns: u64) -> LifecycleStats {
    LifecycleStats { activations, teardowns }
}

#[wasm_bindgen_test(async)]
async fn pending_series_keeps_skeleton_and_builds_nothing() {
    let host = host();
    let (_handles, activations) =
        mount_chart(&host, SeriesSource::new(|_request| futures::future::pending()));

    sleep(Duration::from_millis(100)).await;

    assert!(host.query_selector(".stock-chart-skeleton").unwrap().is_some());
    assert!(canvas(&host).is_none());
    assert!(activations.borrow().is_empty());
}

#[wasm_bindgen_test(async)]
async fn theme_toggle_and_trigger_rebuild_exactly_once() {
    let host = host();
    let (handles, activations) = mount_chart(&host, delayed_source(Duration::from_millis(20)));

    sleep(Duration::from_millis(300)).await;
    assert_eq!(*activations.borrow(), vec![stats(1, 0)]);
    let first = sole_canvas(&host);
    assert_eq!(first.client_width(), 400);

    handles.theme.toggle();
    assert_eq!(*activations.borrow(), vec![stats(1, 0), stats(2, 1)]);
    let second = sole_canvas(&host);
    assert_ne!(first, second);
    assert!(!first.is_connected());

    handles.rebuild.notify();
    assert_eq!(*activations.borrow(), vec![stats(1, 0), stats(2, 1), stats(3, 2)]);
    assert!(!second.is_connected());
    sole_canvas(&host);
}

#[wasm_bindgen_test(async)]
async fn losing_the_surface_tears_down_instead_of_building() {
    let host = host();
    let (handles, activations) = mount_chart(&host, delayed_source(Duration::from_millis(150)));

    sleep(Duration::from_millis(400)).await;
    assert_eq!(*activations.borrow(), vec![stats(1, 0)]);
    let first = sole_canvas(&host);

    handles.symbol.set("MSFT".to_string());
    sleep(Duration::from_millis(20)).await;

    assert!(host.query_selector(".stock-chart-skeleton").unwrap().is_some());
    assert!(!first.is_connected());
    assert!(canvas(&host).is_none());
    assert_eq!(activations.borrow().len(), 1);

    handles.rebuild.notify();
    assert_eq!(activations.borrow().len(), 1);

    sleep(Duration::from_millis(400)).await;
    assert_eq!(*activations.borrow(), vec![stats(1, 0), stats(2, 1)]);
    sole_canvas(&host);
}
