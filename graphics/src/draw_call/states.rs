//! Render-state overrides.
//!
//! A pass carries one shared default [`States`] record. A draw call keeps
//! an optional handle per state on top of it; reading a state returns the
//! override when bound, the default otherwise.

use tessera_core::data::{BindingMap, Container, DataResult, DataScopes, Property, PropertyHandle, Variables};
use tessera_core::resource::TextureId;
use tessera_core::state::{BlendFactor, CompareMode, ScissorBox, States, StencilOperation, TriangleCulling, names};

/// Optional per-state handles overriding pass defaults.
#[derive(Debug, Clone, Default)]
pub struct StateOverrides {
    priority: Option<PropertyHandle<f32>>,
    z_sorted: Option<PropertyHandle<bool>>,
    blending_source: Option<PropertyHandle<BlendFactor>>,
    blending_destination: Option<PropertyHandle<BlendFactor>>,
    color_mask: Option<PropertyHandle<bool>>,
    depth_mask: Option<PropertyHandle<bool>>,
    depth_function: Option<PropertyHandle<CompareMode>>,
    triangle_culling: Option<PropertyHandle<TriangleCulling>>,
    stencil_function: Option<PropertyHandle<CompareMode>>,
    stencil_reference: Option<PropertyHandle<i32>>,
    stencil_mask: Option<PropertyHandle<u32>>,
    stencil_fail_operation: Option<PropertyHandle<StencilOperation>>,
    stencil_z_fail_operation: Option<PropertyHandle<StencilOperation>>,
    stencil_z_pass_operation: Option<PropertyHandle<StencilOperation>>,
    scissor_test: Option<PropertyHandle<bool>>,
    scissor_box: Option<PropertyHandle<ScissorBox>>,
    target: Option<PropertyHandle<TextureId>>,
}

impl StateOverrides {
    /// Resolve every recognised state binding. Unrecognised names are ignored.
    pub(crate) fn bind(
        bindings: &BindingMap,
        scopes: DataScopes<'_>,
        variables: &Variables,
    ) -> DataResult<Self> {
        let bind = StateBinder {
            bindings,
            scopes,
            variables,
        };
        Ok(Self {
            priority: bind.bind_state(names::PRIORITY)?,
            z_sorted: bind.bind_state(names::Z_SORT)?,
            blending_source: bind.bind_state(names::BLENDING_SOURCE)?,
            blending_destination: bind.bind_state(names::BLENDING_DESTINATION)?,
            color_mask: bind.bind_state(names::COLOR_MASK)?,
            depth_mask: bind.bind_state(names::DEPTH_MASK)?,
            depth_function: bind.bind_state(names::DEPTH_FUNCTION)?,
            triangle_culling: bind.bind_state(names::TRIANGLE_CULLING)?,
            stencil_function: bind.bind_state(names::STENCIL_FUNCTION)?,
            stencil_reference: bind.bind_state(names::STENCIL_REFERENCE)?,
            stencil_mask: bind.bind_state(names::STENCIL_MASK)?,
            stencil_fail_operation: bind.bind_state(names::STENCIL_FAIL_OPERATION)?,
            stencil_z_fail_operation: bind.bind_state(names::STENCIL_Z_FAIL_OPERATION)?,
            stencil_z_pass_operation: bind.bind_state(names::STENCIL_Z_PASS_OPERATION)?,
            scissor_test: bind.bind_state(names::SCISSOR_TEST)?,
            scissor_box: bind.bind_state(names::SCISSOR_BOX)?,
            target: bind.bind_state(names::TARGET)?,
        })
    }

    /// Current states: overrides read fresh, defaults elsewhere.
    pub fn resolve(&self, defaults: &States) -> DataResult<States> {
        Ok(States {
            priority: read_state(&self.priority, &defaults.priority)?,
            z_sorted: read_state(&self.z_sorted, &defaults.z_sorted)?,
            blending_source: read_state(&self.blending_source, &defaults.blending_source)?,
            blending_destination: read_state(&self.blending_destination, &defaults.blending_destination)?,
            color_mask: read_state(&self.color_mask, &defaults.color_mask)?,
            depth_mask: read_state(&self.depth_mask, &defaults.depth_mask)?,
            depth_function: read_state(&self.depth_function, &defaults.depth_function)?,
            triangle_culling: read_state(&self.triangle_culling, &defaults.triangle_culling)?,
            stencil_function: read_state(&self.stencil_function, &defaults.stencil_function)?,
            stencil_reference: read_state(&self.stencil_reference, &defaults.stencil_reference)?,
            stencil_mask: read_state(&self.stencil_mask, &defaults.stencil_mask)?,
            stencil_fail_operation: read_state(&self.stencil_fail_operation, &defaults.stencil_fail_operation)?,
            stencil_z_fail_operation: read_state(
                &self.stencil_z_fail_operation,
                &defaults.stencil_z_fail_operation,
            )?,
            stencil_z_pass_operation: read_state(
                &self.stencil_z_pass_operation,
                &defaults.stencil_z_pass_operation,
            )?,
            scissor_test: read_state(&self.scissor_test, &defaults.scissor_test)?,
            scissor_box: read_state(&self.scissor_box, &defaults.scissor_box)?,
            target: match &self.target {
                Some(handle) => Some(handle.read()?),
                None => defaults.target,
            },
        })
    }

    /// Number of bound overrides.
    pub fn len(&self) -> usize {
        [
            self.priority.is_some(),
            self.z_sorted.is_some(),
            self.blending_source.is_some(),
            self.blending_destination.is_some(),
            self.color_mask.is_some(),
            self.depth_mask.is_some(),
            self.depth_function.is_some(),
            self.triangle_culling.is_some(),
            self.stencil_function.is_some(),
            self.stencil_reference.is_some(),
            self.stencil_mask.is_some(),
            self.stencil_fail_operation.is_some(),
            self.stencil_z_fail_operation.is_some(),
            self.stencil_z_pass_operation.is_some(),
            self.scissor_test.is_some(),
            self.scissor_box.is_some(),
            self.target.is_some(),
        ]
        .into_iter()
        .filter(|bound| *bound)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct StateBinder<'a> {
    bindings: &'a BindingMap,
    scopes: DataScopes<'a>,
    variables: &'a Variables,
}

impl StateBinder<'_> {
    /// Resolve one state override, or `None` when the state is not bound.
    fn bind_state<T: Property>(&self, name: &str) -> DataResult<Option<PropertyHandle<T>>> {
        let Some(binding) = self.bindings.get(name) else {
            return Ok(None);
        };
        let property_name = Container::resolve_name(self.variables, &binding.property_name)?;
        log::trace!(
            "DrawCall: state `{}` bound to {}:{}",
            name,
            binding.source,
            property_name
        );
        self.scopes
            .get(binding.source)
            .handle::<T>(&property_name)
            .map(Some)
    }
}

fn read_state<T: Property>(handle: &Option<PropertyHandle<T>>, default: &T) -> DataResult<T> {
    match handle {
        Some(handle) => handle.read(),
        None => Ok(default.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::data::{Binding, DataError, Provider};
    use tessera_core::state::Priority;

    #[test]
    fn test_unbound_states_use_defaults() {
        let empty = Container::new();
        let scopes = DataScopes::new(&empty, &empty, &empty);
        let overrides = StateOverrides::bind(&BindingMap::new(), scopes, &Variables::new()).unwrap();

        assert!(overrides.is_empty());
        let defaults = States::transparent();
        assert_eq!(overrides.resolve(&defaults).unwrap(), defaults);
    }

    #[test]
    fn test_override_from_any_scope() {
        let empty = Container::new();
        let mut renderer = Container::new();
        let camera = Provider::new()
            .with("priorityOverride", Priority::LAST)
            .into_shared();
        renderer.add_provider(camera.clone());
        let mut target = Container::new();
        target.add_provider(
            Provider::new()
                .with("material.triangleCulling", TriangleCulling::None)
                .into_shared(),
        );
        let scopes = DataScopes::new(&empty, &renderer, &target);

        let bindings = BindingMap::new()
            .with(names::PRIORITY, Binding::renderer("priorityOverride"))
            .with(names::TRIANGLE_CULLING, Binding::target("material.triangleCulling"))
            .with("notAState", Binding::root("ignored"));
        let overrides = StateOverrides::bind(&bindings, scopes, &Variables::new()).unwrap();
        assert_eq!(overrides.len(), 2);

        let states = overrides.resolve(&States::default()).unwrap();
        assert_eq!(states.priority, Priority::LAST);
        assert_eq!(states.triangle_culling, TriangleCulling::None);
        assert!(states.depth_mask);

        camera.write().set("priorityOverride", Priority::FIRST);
        assert_eq!(overrides.resolve(&States::default()).unwrap().priority, Priority::FIRST);
    }

    #[test]
    fn test_wrong_type_fails() {
        let mut root = Container::new();
        root.add_provider(Provider::new().with("depthFunction", 1i32).into_shared());
        let empty = Container::new();
        let scopes = DataScopes::new(&root, &empty, &empty);
        let bindings = BindingMap::new().with(names::DEPTH_FUNCTION, Binding::root("depthFunction"));

        let err = StateOverrides::bind(&bindings, scopes, &Variables::new()).unwrap_err();
        assert!(matches!(err, DataError::MissingProperty { expected: "compareMode", .. }));
    }
}
