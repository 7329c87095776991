//! Raw bindings to the `LightweightCharts` global (standalone build, v5 API).

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub const GLOBAL_NAME: &str = "LightweightCharts";

#[wasm_bindgen]
extern "C" {
    pub type IChartApi;

    #[wasm_bindgen(catch, js_namespace = LightweightCharts, js_name = createChart)]
    pub fn create_chart(container: &HtmlElement, options: &JsValue) -> Result<IChartApi, JsValue>;

    #[wasm_bindgen(catch, method, js_name = addSeries)]
    pub fn add_series(
        this: &IChartApi,
        definition: &JsValue,
        options: &JsValue,
    ) -> Result<ISeriesApi, JsValue>;

    #[wasm_bindgen(method, js_name = timeScale)]
    pub fn time_scale(this: &IChartApi) -> ITimeScaleApi;

    #[wasm_bindgen(catch, method, js_name = applyOptions)]
    pub fn apply_options(this: &IChartApi, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    pub fn remove(this: &IChartApi);
}

#[wasm_bindgen]
extern "C" {
    pub type ITimeScaleApi;

    #[wasm_bindgen(catch, method, js_name = applyOptions)]
    pub fn apply_options(this: &ITimeScaleApi, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method, js_name = fitContent)]
    pub fn fit_content(this: &ITimeScaleApi) -> Result<(), JsValue>;
}

#[wasm_bindgen]
extern "C" {
    pub type ISeriesApi;

    #[wasm_bindgen(method, js_name = priceScale)]
    pub fn price_scale(this: &ISeriesApi) -> IPriceScaleApi;

    #[wasm_bindgen(catch, method, js_name = setData)]
    pub fn set_data(this: &ISeriesApi, data: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, method)]
    pub fn update(this: &ISeriesApi, point: &JsValue) -> Result<(), JsValue>;
}

#[wasm_bindgen]
extern "C" {
    pub type IPriceScaleApi;

    #[wasm_bindgen(catch, method, js_name = applyOptions)]
    pub fn apply_options(this: &IPriceScaleApi, options: &JsValue) -> Result<(), JsValue>;
}

#[wasm_bindgen]
extern "C" {
    pub type ISeriesMarkersPluginApi;

    #[wasm_bindgen(catch, js_namespace = LightweightCharts, js_name = createSeriesMarkers)]
    pub fn create_series_markers(
        series: &ISeriesApi,
        markers: &JsValue,
    ) -> Result<ISeriesMarkersPluginApi, JsValue>;

    #[wasm_bindgen(catch, method, js_name = setMarkers)]
    pub fn set_markers(this: &ISeriesMarkersPluginApi, markers: &JsValue) -> Result<(), JsValue>;
}

/// The library namespace object, if the page loaded it.
pub fn namespace() -> Option<JsValue> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(GLOBAL_NAME))
        .ok()
        .filter(|value| value.is_object())
}

/// Series definition exported by the library (`CandlestickSeries`, `HistogramSeries`).
pub fn series_definition(name: &str) -> Result<JsValue, JsValue> {
    let namespace = namespace().ok_or_else(|| JsValue::from_str("LightweightCharts is not loaded"))?;
    let definition = js_sys::Reflect::get(&namespace, &JsValue::from_str(name))?;
    if definition.is_undefined() {
        return Err(JsValue::from_str(&format!("LightweightCharts.{} is missing", name)));
    }
    Ok(definition)
}
