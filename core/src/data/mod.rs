//! Property data: providers, containers, handles, bindings and name templates.
//!
//! This is the layer scene entities write into and draw calls read from:
//!
//! - [`Provider`] - one entity's named, typed values
//! - [`Container`] - hierarchical aggregation of providers (the property store)
//! - [`PropertyHandle`] - generation-checked reference to a provider slot
//! - [`BindingMap`] - shader input name to (scope, property name)
//! - [`Template`] - `${variable}` substitution in property names

mod arena;
mod binding;
mod container;
mod error;
mod handle;
mod provider;
mod template;
mod value;

pub use arena::{SlotArena, SlotKey};
pub use binding::{Binding, BindingMap, BindingSource};
pub use container::{Container, DataScopes};
pub use error::{DataError, DataResult};
pub use handle::PropertyHandle;
pub use provider::{Provider, ProviderId, SharedProvider};
pub use template::{Segment, Template, Variables, resolve_name};
pub use value::{Property, PropertyValue};
