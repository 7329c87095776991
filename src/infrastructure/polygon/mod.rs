//! Polygon.io market data: REST aggregates and the live trade socket.

pub mod dto;
pub mod http;
pub mod websocket;

pub use dto::*;
pub use http::*;
pub use websocket::*;
