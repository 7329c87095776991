//! Chart aggregate: theme and option value objects, the per-activation
//! blueprint, and the ports a chart engine implements.

pub mod entities;
pub mod options;
pub mod surface;
pub mod value_objects;

pub use entities::*;
pub use options::*;
pub use surface::*;
pub use value_objects::*;
