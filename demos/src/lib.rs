//! # Tessera Demos
//!
//! Headless demo scenes for the Tessera draw-call pipeline.
//!
//! ## Available Demos
//!
//! - `texture_swap_demo` - rotating cube whose diffuse texture is swapped
//!   while its draw call stays bound

pub mod cube;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
