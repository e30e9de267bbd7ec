//! # Tessera Graphics
//!
//! The draw-call binding pipeline: turns a program's reflected inputs plus
//! declarative binding maps into cached, typed handles into the scene's
//! property stores, and replays them against a graphics context each frame.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`Program`] - a linked program and its reflected inputs
//! - [`DrawCall`] - binding (`bind`) and issuing (`render`) one drawable
//! - [`Pass`] - program, binding maps and default render states
//! - [`Renderer`] - per-frame clear, priority-ordered draw, present
//! - [`GraphicsContext`] - the backend command interface, with
//!   [`RecordingContext`] for testing
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use tessera_core::data::{Binding, BindingMap, Container, DataScopes, Provider, Variables};
//! use tessera_core::math::Vec4;
//! use tessera_core::resource::BufferId;
//! use tessera_graphics::{
//!     ContextCommand, DrawCall, DrawCallLimits, InputType, Pass, Program, ProgramId,
//!     ProgramInputs, RecordingContext,
//! };
//!
//! let mut target = Container::new();
//! target.add_to_collection(
//!     "geometry",
//!     Provider::with_uuid("quad")
//!         .with("indices", BufferId(1))
//!         .with("firstIndex", 0u32)
//!         .with("numIndices", 6u32)
//!         .into_shared(),
//! );
//! let material = Provider::new()
//!     .with("material.diffuseColor", Vec4::new(1.0, 0.0, 0.0, 1.0))
//!     .into_shared();
//! target.add_provider(material.clone());
//! let (root, renderer) = (Container::new(), Container::new());
//!
//! let program = Program::new(
//!     ProgramId(1),
//!     ProgramInputs::new().with_uniform("diffuseColor", InputType::Float4, 0),
//! );
//! let pass = Pass::new("flat", Arc::new(program)).with_uniform_bindings(
//!     BindingMap::new().with("diffuseColor", Binding::target("material.diffuseColor")),
//! );
//!
//! let mut variables = Variables::new();
//! variables.insert("geometryUuid".to_string(), "quad".to_string());
//! let mut draw_call = DrawCall::for_pass(&pass, variables, DrawCallLimits::default());
//! draw_call.bind_pass(&pass, DataScopes::new(&root, &renderer, &target))?;
//!
//! // In-place writes are seen without rebinding.
//! material.write().set("material.diffuseColor", Vec4::new(0.0, 1.0, 0.0, 1.0));
//!
//! let mut context = RecordingContext::new();
//! draw_call.render(&mut context, None)?;
//! assert!(context.commands().contains(&ContextCommand::UniformFloat4(0, [0.0, 1.0, 0.0, 1.0])));
//! assert_eq!(context.count(ContextCommand::is_draw), 1);
//! # Ok::<(), tessera_graphics::GraphicsError>(())
//! ```

pub mod config;
pub mod context;
pub mod draw_call;
pub mod error;
pub mod pass;
pub mod program;
pub mod renderer;

// Re-export main types for convenience
pub use config::{DrawCallLimits, RendererConfig};
pub use context::{ContextCommand, GraphicsContext, RecordingContext};
pub use draw_call::{DrawCall, StateOverrides};
pub use error::{GraphicsError, GraphicsResult};
pub use pass::Pass;
pub use program::{InputType, Program, ProgramId, ProgramInput, ProgramInputs};
pub use renderer::{DrawCallId, FrameStats, Renderer};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
pub fn init() {
    log::info!("Tessera Graphics v{} initialized", VERSION);
}
