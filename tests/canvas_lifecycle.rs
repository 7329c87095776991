use stock_chart_wasm::application::{ActivationInputs, ChartLifecycle, LifecyclePhase};
use stock_chart_wasm::domain::chart::{ChartSettings, Theme};
use stock_chart_wasm::domain::market_data::{Candle, OHLCV, Price, PriceSeries, Timespan, Timestamp, Volume};
use stock_chart_wasm::domain::post::Post;
use stock_chart_wasm::infrastructure::browser::WindowResizeEvents;
use stock_chart_wasm::infrastructure::canvas::CanvasEngine;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container(width: u32, height: u32) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap().dyn_into::<web_sys::HtmlElement>().unwrap();
    element.style().set_property("width", &format!("{}px", width)).unwrap();
    element.style().set_property("height", &format!("{}px", height)).unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn only_canvas(element: &web_sys::HtmlElement) -> web_sys::HtmlCanvasElement {
    assert_eq!(element.child_element_count(), 1);
    element.first_element_child().unwrap().dyn_into::<web_sys::HtmlCanvasElement>().unwrap()
}

fn series() -> PriceSeries {
    PriceSeries::from_candles(
        (0..20)
            .map(|i| {
                let base = 50.0 + (i % 5) as f64;
                Candle::new(
                    Timestamp::from_millis(1_700_000_000_000 + i * 86_400_000),
                    OHLCV::new(
                        Price::from(base),
                        Price::from(base + 3.0),
                        Price::from(base - 2.0),
                        Price::from(base + 1.0),
                        Volume::from(10_000.0),
                    ),
                )
            })
            .collect(),
    )
}

#[wasm_bindgen_test]
fn canvas_chart_is_replaced_on_every_activation() {
    let element = container(400, 240);
    let data = series();
    let post = Post::new("pinned", "2023-11-16T00:00:00Z");
    let mut lifecycle =
        ChartLifecycle::new(CanvasEngine, WindowResizeEvents::new().unwrap(), ChartSettings::new(true));

    let inputs = ActivationInputs {
        series: &data,
        theme: Theme::Dark,
        timespan: Timespan::Day,
        post: Some(&post),
        trade: None,
    };
    lifecycle.activate(&element, inputs).unwrap();
    let first = only_canvas(&element);
    assert_eq!((first.width(), first.height()), (400, 240));

    lifecycle.activate(&element, ActivationInputs { theme: Theme::Light, post: None, ..inputs }).unwrap();
    let second = only_canvas(&element);
    assert_ne!(first, second);
    assert!(first.parent_node().is_none());

    lifecycle.unmount();
    assert_eq!(element.child_element_count(), 0);
    assert_eq!(lifecycle.phase(), LifecyclePhase::TornDown);
    element.remove();
}
