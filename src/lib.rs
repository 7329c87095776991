use wasm_bindgen::prelude::*;

use crate::domain::logging::LogComponent;

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Start hook: installs the panic hook, reads the page configuration and
/// wires logging to the console.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let (chart_config, config_error) = match config::ChartConfig::from_window() {
        Ok(chart_config) => (chart_config, None),
        Err(e) => (config::ChartConfig::default(), Some(e)),
    };

    domain::logging::init_sink(Box::new(infrastructure::services::ConsoleSink::new(chart_config.log_level)));
    domain::logging::init_clock(Box::new(infrastructure::services::BrowserClock));

    if let Some(e) = config_error {
        log_warn!(LogComponent::Presentation("Initialize"), "⚠️ Using default configuration: {}", e);
    }
    config::init(chart_config);

    log_info!(LogComponent::Presentation("Initialize"), "🚀 Stock chart initialized");
}
