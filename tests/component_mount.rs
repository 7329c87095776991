use gloo_timers::future::sleep;
use leptos::*;
use std::time::Duration;
use stock_chart_wasm::application::CHART_ERROR_MESSAGE;
use stock_chart_wasm::domain::market_data::Timespan;
use stock_chart_wasm::presentation::{StockChart, provide_theme};
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

#[wasm_bindgen_test(async)]
async fn unconfigured_provider_ends_in_error_view() {
    let host = host();
    mount_to(host.clone(), || {
        provide_theme(Some("dark"));
        view! { <StockChart symbol="AAPL" multiplier=1u32 time_span=Timespan::Day resize=true /> }
    });
    assert!(host.query_selector(".stock-chart-skeleton").unwrap().is_some());

    sleep(Duration::from_millis(50)).await;

    let error = host.query_selector(".stock-chart-error").unwrap().expect("error heading");
    assert_eq!(error.text_content().as_deref(), Some(CHART_ERROR_MESSAGE));
    assert!(host.query_selector("canvas").unwrap().is_none());
    assert!(host.query_selector(".stock-chart-skeleton").unwrap().is_none());
}
