//! Domain layer: market data, chart configuration, posts and the ports the
//! outer layers implement.

pub mod chart;
pub mod errors;
pub mod logging;
pub mod market_data;
pub mod post;
