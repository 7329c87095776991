//! Application layer: turns provider results into acquisition state, decides
//! what the component renders, and drives the chart lifecycle.

pub mod acquisition;
pub mod gate;
pub mod lifecycle;

pub use acquisition::*;
pub use gate::*;
pub use lifecycle::*;
