use super::stock_chart::StockChart;
use super::theme::{document_theme_name, provide_theme};
use crate::domain::{logging::LogComponent, market_data::Timespan, post::Post};
use crate::log_info;
use leptos::*;
use std::str::FromStr;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Demo page: one chart with symbol, resolution and theme controls.
#[component]
pub fn App() -> impl IntoView {
    let theme = provide_theme(document_theme_name().as_deref());
    let (symbol, set_symbol) = create_signal("AAPL".to_string());
    let (time_span, set_time_span) = create_signal(Timespan::Day);
    let (pinned, set_pinned) = create_signal(false);
    let rebuild = create_trigger();

    let post = create_memo(move |_| {
        pinned.get().then(|| Post::new("Sample post", String::from(js_sys::Date::new_0().to_iso_string())))
    });

    view! {
        <div class="stock-chart-demo" style="display: flex; flex-direction: column; height: 100vh;">
            <div class="controls" style="display: flex; gap: 8px; padding: 8px;">
                <input
                    prop:value=symbol
                    on:change=move |ev| set_symbol.set(event_target_value(&ev))
                />
                <select on:change=move |ev| {
                    if let Ok(span) = Timespan::from_str(&event_target_value(&ev)) {
                        set_time_span.set(span);
                    }
                }>
                    {Timespan::iter()
                        .map(|span| {
                            let name = span.as_ref().to_string();
                            view! { <option value=name.clone() selected={span == Timespan::Day}>{name}</option> }
                        })
                        .collect_view()}
                </select>
                <button on:click=move |_| theme.toggle()>"Toggle theme"</button>
                <button on:click=move |_| set_pinned.update(|p| *p = !*p)>"Pin post"</button>
                <button on:click=move |_| rebuild.notify()>"Rebuild"</button>
            </div>
            <div style="flex: 1; min-height: 0;">
                <StockChart
                    symbol=symbol
                    multiplier=1u32
                    time_span=time_span
                    post=post
                    resize=true
                    dependency=rebuild
                />
            </div>
        </div>
    }
}

fn element_by_id(element_id: &str) -> Result<web_sys::HtmlElement, JsValue> {
    document()
        .get_element_by_id(element_id)
        .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", element_id)))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{} is not an HTML element", element_id)))
}

/// Mount a single chart into `element_id`.
#[wasm_bindgen]
pub fn mount_stock_chart(
    element_id: &str,
    symbol: String,
    multiplier: u32,
    timespan: &str,
    resize: bool,
) -> Result<(), JsValue> {
    let time_span =
        Timespan::from_str(timespan).map_err(|_| JsValue::from_str(&format!("Unknown timespan: {}", timespan)))?;
    let parent = element_by_id(element_id)?;
    log_info!(
        LogComponent::Presentation("Mount"),
        "📊 Mounting {} {}x{} into #{}",
        symbol,
        multiplier,
        time_span,
        element_id
    );
    mount_to(parent, move || {
        provide_theme(document_theme_name().as_deref());
        view! { <StockChart symbol=symbol multiplier=multiplier time_span=time_span resize=resize /> }
    });
    Ok(())
}

/// Mount the demo page into `<body>`.
#[wasm_bindgen]
pub fn mount_demo() {
    mount_to_body(App);
}
