//! Leptos components, hooks and the wasm entry points.

pub mod app;
pub mod hooks;
pub mod stock_chart;
pub mod theme;

pub use app::*;
pub use hooks::*;
pub use stock_chart::*;
pub use theme::*;
