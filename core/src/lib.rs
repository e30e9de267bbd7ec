//! # Tessera Core
//!
//! CPU-side data model of the Tessera renderer: the property stores scene
//! entities publish their data through, the binding maps that link shader
//! inputs to that data, and the render-state values draw calls resolve.

pub mod data;
pub mod math;
pub mod resource;
pub mod state;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
