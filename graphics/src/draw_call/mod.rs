//! Draw calls: resolved, issuable units of GPU work.
//!
//! [`DrawCall::bind`] walks a program's reflected inputs, resolves each one
//! through the binding maps against the three data scopes and caches typed
//! handles. [`DrawCall::render`] replays the cached bindings against a
//! [`GraphicsContext`], reading every handle fresh, so data written in place
//! between frames is picked up without rebinding.
//!
//! Both directions are all-or-nothing: a failed bind leaves the draw call
//! reset, and a render whose reads fail issues no command.

mod binding;
mod states;

pub use binding::{
    AttributeBinding, BoolUniform, FloatUniform, IndexRange, IntUniform, SamplerBinding,
    UniformBinding, UniformData, UniformValue,
};
pub use states::StateOverrides;

use std::sync::Arc;

use tessera_core::data::{Binding, BindingMap, Container, DataResult, DataScopes, Variables};
use tessera_core::resource::{TextureId, VertexAttribute};
use tessera_core::state::States;

use crate::config::DrawCallLimits;
use crate::context::GraphicsContext;
use crate::error::{GraphicsError, GraphicsResult};
use crate::pass::Pass;
use crate::program::Program;

use binding::{IndexBinding, ResolvedUniform, resolve_uniform};

/// Property names of the drawn geometry's index data, in the target scope.
pub mod index_names {
    pub const INDICES: &str = "geometry[${geometryUuid}].indices";
    pub const FIRST_INDEX: &str = "geometry[${geometryUuid}].firstIndex";
    pub const NUM_INDICES: &str = "geometry[${geometryUuid}].numIndices";
}

/// Everything a successful bind caches.
#[derive(Debug)]
struct BoundState {
    program: Arc<Program>,
    index: IndexBinding,
    float_uniforms: Vec<UniformBinding<FloatUniform>>,
    int_uniforms: Vec<UniformBinding<IntUniform>>,
    bool_uniforms: Vec<UniformBinding<BoolUniform>>,
    samplers: Vec<SamplerBinding>,
    attributes: Vec<AttributeBinding>,
    states: StateOverrides,
}

impl BoundState {
    /// Read every handle. Fails before anything reaches a context.
    fn snapshot(&self, states: States) -> DataResult<FrameData> {
        let mut uniforms = Vec::with_capacity(
            self.float_uniforms.len() + self.int_uniforms.len() + self.bool_uniforms.len(),
        );
        for uniform in &self.float_uniforms {
            uniforms.push(uniform.read()?);
        }
        for uniform in &self.int_uniforms {
            uniforms.push(uniform.read()?);
        }
        for uniform in &self.bool_uniforms {
            uniforms.push(uniform.read()?);
        }

        Ok(FrameData {
            index: self.index.read()?,
            uniforms,
            textures: self
                .samplers
                .iter()
                .map(SamplerBinding::read)
                .collect::<DataResult<_>>()?,
            vertex_buffers: self
                .attributes
                .iter()
                .map(AttributeBinding::read)
                .collect::<DataResult<_>>()?,
            states,
        })
    }
}

/// Values one render issues, in class order.
struct FrameData {
    states: States,
    index: IndexRange,
    uniforms: Vec<(u32, UniformData)>,
    textures: Vec<TextureId>,
    vertex_buffers: Vec<VertexAttribute>,
}

/// One drawable's resolved bindings.
#[derive(Debug)]
pub struct DrawCall {
    defaults: Arc<States>,
    variables: Variables,
    limits: DrawCallLimits,
    bound: Option<BoundState>,
}

impl DrawCall {
    /// Create an unbound draw call.
    ///
    /// `defaults` are the pass states used wherever no state binding applies;
    /// `variables` fill `${...}` placeholders in bound property names.
    pub fn new(defaults: Arc<States>, variables: Variables) -> Self {
        Self {
            defaults,
            variables,
            limits: DrawCallLimits::default(),
            bound: None,
        }
    }

    /// Create an unbound draw call using a pass's default states.
    pub fn for_pass(pass: &Pass, variables: Variables, limits: DrawCallLimits) -> Self {
        Self::new(Arc::clone(pass.states()), variables).with_limits(limits)
    }

    /// Set the slot limits (builder style).
    #[must_use]
    pub fn with_limits(mut self, limits: DrawCallLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> DrawCallLimits {
        self.limits
    }

    pub fn defaults(&self) -> &Arc<States> {
        &self.defaults
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Set a template variable. Takes effect at the next bind.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Bind with a pass's program, binding maps and default states.
    pub fn bind_pass(&mut self, pass: &Pass, scopes: DataScopes<'_>) -> GraphicsResult<()> {
        self.defaults = Arc::clone(pass.states());
        self.bind(
            Arc::clone(pass.program()),
            pass.attribute_bindings(),
            pass.uniform_bindings(),
            pass.state_bindings(),
            scopes,
        )
    }

    /// Resolve every program input and cache typed handles.
    ///
    /// Previous bindings are always dropped first. Unbound inputs are
    /// skipped; any other failure aborts the bind and leaves the draw call
    /// unbound.
    pub fn bind(
        &mut self,
        program: Arc<Program>,
        attribute_bindings: &BindingMap,
        uniform_bindings: &BindingMap,
        state_bindings: &BindingMap,
        scopes: DataScopes<'_>,
    ) -> GraphicsResult<()> {
        self.reset();

        let bound = self.resolve(
            program,
            attribute_bindings,
            uniform_bindings,
            state_bindings,
            scopes,
        )?;
        log::debug!(
            "DrawCall: bound {} ({} float, {} int, {} bool uniforms, {} samplers, {} attributes, {} state overrides)",
            bound.program,
            bound.float_uniforms.len(),
            bound.int_uniforms.len(),
            bound.bool_uniforms.len(),
            bound.samplers.len(),
            bound.attributes.len(),
            bound.states.len()
        );
        self.bound = Some(bound);
        Ok(())
    }

    /// Drop all cached bindings.
    pub fn reset(&mut self) {
        self.bound = None;
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// The bound program.
    pub fn program(&self) -> Option<&Arc<Program>> {
        self.bound.as_ref().map(|bound| &bound.program)
    }

    pub fn float_uniforms(&self) -> &[UniformBinding<FloatUniform>] {
        match &self.bound {
            Some(bound) => &bound.float_uniforms,
            None => &[],
        }
    }

    pub fn int_uniforms(&self) -> &[UniformBinding<IntUniform>] {
        match &self.bound {
            Some(bound) => &bound.int_uniforms,
            None => &[],
        }
    }

    pub fn bool_uniforms(&self) -> &[UniformBinding<BoolUniform>] {
        match &self.bound {
            Some(bound) => &bound.bool_uniforms,
            None => &[],
        }
    }

    pub fn samplers(&self) -> &[SamplerBinding] {
        match &self.bound {
            Some(bound) => &bound.samplers,
            None => &[],
        }
    }

    pub fn attributes(&self) -> &[AttributeBinding] {
        match &self.bound {
            Some(bound) => &bound.attributes,
            None => &[],
        }
    }

    /// Bound state overrides, if bound.
    pub fn state_overrides(&self) -> Option<&StateOverrides> {
        self.bound.as_ref().map(|bound| &bound.states)
    }

    /// Current render states. An unbound draw call reports its defaults.
    pub fn states(&self) -> GraphicsResult<States> {
        match &self.bound {
            Some(bound) => Ok(bound.states.resolve(&self.defaults)?),
            None => Ok(States::clone(&self.defaults)),
        }
    }

    /// Current render priority.
    pub fn priority(&self) -> GraphicsResult<f32> {
        Ok(self.states()?.priority)
    }

    /// Current index range.
    pub fn index_range(&self) -> GraphicsResult<IndexRange> {
        let bound = self.bound.as_ref().ok_or(GraphicsError::NotBound)?;
        Ok(bound.index.read()?)
    }

    /// Issue the bound draw to `context`.
    ///
    /// The render target is the state-bound target if any, else
    /// `render_target`, else the back buffer. Every handle is read before
    /// the first command, so a stale handle leaves `context` untouched.
    pub fn render(
        &self,
        context: &mut dyn GraphicsContext,
        render_target: Option<TextureId>,
    ) -> GraphicsResult<()> {
        self.render_with_states(context, render_target, self.states()?)
    }

    /// [`render`](Self::render) with states already resolved this frame.
    pub(crate) fn render_with_states(
        &self,
        context: &mut dyn GraphicsContext,
        render_target: Option<TextureId>,
        states: States,
    ) -> GraphicsResult<()> {
        let bound = self.bound.as_ref().ok_or(GraphicsError::NotBound)?;
        let frame = bound.snapshot(states)?;
        let states = &frame.states;

        match states.target.or(render_target) {
            Some(texture) => context.set_render_to_texture(texture, true),
            None => context.set_render_to_back_buffer(),
        }
        context.set_program(bound.program.id());

        for (location, data) in &frame.uniforms {
            data.upload(*location, context);
        }

        context.set_color_mask(states.color_mask);
        context.set_blend_mode(states.blending_source, states.blending_destination);
        context.set_depth_test(states.depth_mask, states.depth_function);
        context.set_stencil_test(
            states.stencil_function,
            states.stencil_reference,
            states.stencil_mask,
            states.stencil_fail_operation,
            states.stencil_z_fail_operation,
            states.stencil_z_pass_operation,
        );
        context.set_scissor_test(states.scissor_test, states.scissor_box);
        context.set_triangle_culling(states.triangle_culling);

        for (sampler, texture) in bound.samplers.iter().zip(&frame.textures) {
            sampler.upload(*texture, context);
        }
        for (attribute, buffer) in bound.attributes.iter().zip(&frame.vertex_buffers) {
            attribute.upload(buffer, context);
        }

        let index = frame.index;
        context.draw_triangles(index.buffer, index.first_index, index.num_indices / 3);
        Ok(())
    }

    fn resolve(
        &self,
        program: Arc<Program>,
        attribute_bindings: &BindingMap,
        uniform_bindings: &BindingMap,
        state_bindings: &BindingMap,
        scopes: DataScopes<'_>,
    ) -> GraphicsResult<BoundState> {
        let index = self.resolve_index(scopes.target)?;
        let states = StateOverrides::bind(state_bindings, scopes, &self.variables)?;

        let mut bound = BoundState {
            program: Arc::clone(&program),
            index,
            float_uniforms: Vec::new(),
            int_uniforms: Vec::new(),
            bool_uniforms: Vec::new(),
            samplers: Vec::new(),
            attributes: Vec::new(),
            states,
        };

        for input in program.inputs().uniforms() {
            let (base, suffix) = split_array_suffix(&input.name);
            let Some(binding) = uniform_bindings.get(base) else {
                log::trace!("DrawCall: uniform `{}` is not bound, skipped", input.name);
                continue;
            };
            let name = self.property_name(binding, suffix)?;
            let container = scopes.get(binding.source);

            match resolve_uniform(input, container, &name)? {
                ResolvedUniform::Float(value) => bound
                    .float_uniforms
                    .push(UniformBinding::new(input.location, value)),
                ResolvedUniform::Int(value) => bound
                    .int_uniforms
                    .push(UniformBinding::new(input.location, value)),
                ResolvedUniform::Bool(value) => bound
                    .bool_uniforms
                    .push(UniformBinding::new(input.location, value)),
                ResolvedUniform::Sampler(sampler) => {
                    let position = program.fixed_texture_count() + bound.samplers.len() as u32;
                    if position >= self.limits.max_samplers {
                        return Err(GraphicsError::TooManySamplers {
                            max: self.limits.max_samplers,
                        });
                    }
                    bound
                        .samplers
                        .push(SamplerBinding::new(position, input.location, sampler));
                }
            }
            log::trace!(
                "DrawCall: uniform `{}` bound to {}:{}",
                input.name,
                binding.source,
                name
            );
        }

        for input in program.inputs().attributes() {
            let Some(binding) = attribute_bindings.get(&input.name) else {
                log::trace!("DrawCall: attribute `{}` is not bound, skipped", input.name);
                continue;
            };
            let name = self.property_name(binding, "")?;
            let attribute = scopes
                .get(binding.source)
                .handle::<VertexAttribute>(&name)?;

            let position = program.fixed_attribute_count() + bound.attributes.len() as u32;
            if position >= self.limits.max_vertex_buffers {
                return Err(GraphicsError::TooManyVertexBuffers {
                    max: self.limits.max_vertex_buffers,
                });
            }
            bound
                .attributes
                .push(AttributeBinding::new(position, input.location, attribute));
        }

        Ok(bound)
    }

    fn resolve_index(&self, target: &Container) -> DataResult<IndexBinding> {
        let name = |raw: &str| Container::resolve_name(&self.variables, raw);
        Ok(IndexBinding {
            buffer: target.handle(&name(index_names::INDICES)?)?,
            first_index: target.handle(&name(index_names::FIRST_INDEX)?)?,
            num_indices: target.handle(&name(index_names::NUM_INDICES)?)?,
        })
    }

    /// Resolved property name of a binding, with an array suffix reattached.
    fn property_name(&self, binding: &Binding, suffix: &str) -> DataResult<String> {
        let mut name = Container::resolve_name(&self.variables, &binding.property_name)?;
        name.push_str(suffix);
        Ok(name)
    }
}

/// Split `name[0]` into `("name", "[0]")`.
fn split_array_suffix(name: &str) -> (&str, &str) {
    match name.find('[') {
        Some(pos) => name.split_at(pos),
        None => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_array_suffix() {
        assert_eq!(split_array_suffix("lightColors[0]"), ("lightColors", "[0]"));
        assert_eq!(split_array_suffix("diffuseColor"), ("diffuseColor", ""));
        assert_eq!(split_array_suffix("m[1][2]"), ("m", "[1][2]"));
    }

    #[test]
    fn test_unbound_draw_call() {
        let draw_call = DrawCall::new(Arc::new(States::default()), Variables::new());
        assert!(!draw_call.is_bound());
        assert!(draw_call.program().is_none());
        assert!(draw_call.float_uniforms().is_empty());
        assert_eq!(draw_call.states().unwrap(), States::default());
        assert_eq!(draw_call.index_range().unwrap_err(), GraphicsError::NotBound);
    }

    #[test]
    fn test_set_variable() {
        let mut draw_call = DrawCall::new(Arc::new(States::default()), Variables::new());
        draw_call.set_variable("geometryUuid", "cube");
        assert_eq!(draw_call.variables().get("geometryUuid").map(String::as_str), Some("cube"));
    }
}
