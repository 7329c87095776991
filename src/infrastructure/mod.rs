pub mod browser;
pub mod canvas;
pub mod headless;
pub mod lightweight;
pub mod polygon;
pub mod services;
