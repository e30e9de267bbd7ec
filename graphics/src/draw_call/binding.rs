//! Resolved draw-call bindings.
//!
//! Each uniform class has one enum variant per arity, so the arity issued to
//! the context is fixed when the program input is resolved. All values are
//! read through [`PropertyHandle`]s at render time, into plain data that is
//! uploaded only once every read has succeeded.

use tessera_core::data::{Container, DataResult, PropertyHandle};
use tessera_core::math::{
    self, BVec2, BVec3, BVec4, IVec2, IVec3, IVec4, Mat4, Vec2, Vec3, Vec4,
};
use tessera_core::resource::{BufferId, TextureId, TextureSampler, VertexAttribute};

use crate::context::GraphicsContext;
use crate::error::{GraphicsError, GraphicsResult};
use crate::program::{InputType, ProgramInput};

/// A typed uniform value source.
pub trait UniformValue {
    /// Program input type this value is uploaded as.
    fn input_type(&self) -> InputType;

    /// Resolved property name backing the value.
    fn property_name(&self) -> &str;

    /// Read the current value.
    fn read(&self) -> DataResult<UniformData>;
}

/// A uniform value read out of its property, ready to upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformData {
    Float(f32),
    Float2([f32; 2]),
    Float3([f32; 3]),
    Float4([f32; 4]),
    Matrix4x4([f32; 16]),
    Int(i32),
    Int2([i32; 2]),
    Int3([i32; 3]),
    Int4([i32; 4]),
    Bool(bool),
    Bool2([bool; 2]),
    Bool3([bool; 3]),
    Bool4([bool; 4]),
}

impl UniformData {
    /// Issue the matching setter for `location`.
    pub fn upload(&self, location: u32, context: &mut dyn GraphicsContext) {
        match *self {
            Self::Float(v) => context.set_uniform_float(location, v),
            Self::Float2(v) => context.set_uniform_float2(location, v),
            Self::Float3(v) => context.set_uniform_float3(location, v),
            Self::Float4(v) => context.set_uniform_float4(location, v),
            Self::Matrix4x4(v) => context.set_uniform_matrix4x4(location, v),
            Self::Int(v) => context.set_uniform_int(location, v),
            Self::Int2(v) => context.set_uniform_int2(location, v),
            Self::Int3(v) => context.set_uniform_int3(location, v),
            Self::Int4(v) => context.set_uniform_int4(location, v),
            Self::Bool(v) => context.set_uniform_bool(location, v),
            Self::Bool2(v) => context.set_uniform_bool2(location, v),
            Self::Bool3(v) => context.set_uniform_bool3(location, v),
            Self::Bool4(v) => context.set_uniform_bool4(location, v),
        }
    }
}

/// Float-class uniform.
#[derive(Debug, Clone)]
pub enum FloatUniform {
    Float1(PropertyHandle<f32>),
    Float2(PropertyHandle<Vec2>),
    Float3(PropertyHandle<Vec3>),
    Float4(PropertyHandle<Vec4>),
    Matrix4x4(PropertyHandle<Mat4>),
}

impl UniformValue for FloatUniform {
    fn input_type(&self) -> InputType {
        match self {
            Self::Float1(_) => InputType::Float1,
            Self::Float2(_) => InputType::Float2,
            Self::Float3(_) => InputType::Float3,
            Self::Float4(_) => InputType::Float4,
            Self::Matrix4x4(_) => InputType::Float16,
        }
    }

    fn property_name(&self) -> &str {
        match self {
            Self::Float1(h) => h.name(),
            Self::Float2(h) => h.name(),
            Self::Float3(h) => h.name(),
            Self::Float4(h) => h.name(),
            Self::Matrix4x4(h) => h.name(),
        }
    }

    fn read(&self) -> DataResult<UniformData> {
        Ok(match self {
            Self::Float1(h) => UniformData::Float(h.read()?),
            Self::Float2(h) => UniformData::Float2(math::vec_to_array(&h.read()?)),
            Self::Float3(h) => UniformData::Float3(math::vec_to_array(&h.read()?)),
            Self::Float4(h) => UniformData::Float4(math::vec_to_array(&h.read()?)),
            Self::Matrix4x4(h) => UniformData::Matrix4x4(math::mat4_to_array(&h.read()?)),
        })
    }
}

/// Int-class uniform.
#[derive(Debug, Clone)]
pub enum IntUniform {
    Int1(PropertyHandle<i32>),
    Int2(PropertyHandle<IVec2>),
    Int3(PropertyHandle<IVec3>),
    Int4(PropertyHandle<IVec4>),
}

impl UniformValue for IntUniform {
    fn input_type(&self) -> InputType {
        match self {
            Self::Int1(_) => InputType::Int1,
            Self::Int2(_) => InputType::Int2,
            Self::Int3(_) => InputType::Int3,
            Self::Int4(_) => InputType::Int4,
        }
    }

    fn property_name(&self) -> &str {
        match self {
            Self::Int1(h) => h.name(),
            Self::Int2(h) => h.name(),
            Self::Int3(h) => h.name(),
            Self::Int4(h) => h.name(),
        }
    }

    fn read(&self) -> DataResult<UniformData> {
        Ok(match self {
            Self::Int1(h) => UniformData::Int(h.read()?),
            Self::Int2(h) => UniformData::Int2(math::ivec_to_array(&h.read()?)),
            Self::Int3(h) => UniformData::Int3(math::ivec_to_array(&h.read()?)),
            Self::Int4(h) => UniformData::Int4(math::ivec_to_array(&h.read()?)),
        })
    }
}

/// Bool-class uniform.
#[derive(Debug, Clone)]
pub enum BoolUniform {
    Bool1(PropertyHandle<bool>),
    Bool2(PropertyHandle<BVec2>),
    Bool3(PropertyHandle<BVec3>),
    Bool4(PropertyHandle<BVec4>),
}

impl UniformValue for BoolUniform {
    fn input_type(&self) -> InputType {
        match self {
            Self::Bool1(_) => InputType::Bool1,
            Self::Bool2(_) => InputType::Bool2,
            Self::Bool3(_) => InputType::Bool3,
            Self::Bool4(_) => InputType::Bool4,
        }
    }

    fn property_name(&self) -> &str {
        match self {
            Self::Bool1(h) => h.name(),
            Self::Bool2(h) => h.name(),
            Self::Bool3(h) => h.name(),
            Self::Bool4(h) => h.name(),
        }
    }

    fn read(&self) -> DataResult<UniformData> {
        Ok(match self {
            Self::Bool1(h) => UniformData::Bool(h.read()?),
            Self::Bool2(h) => UniformData::Bool2(math::bvec_to_array(&h.read()?)),
            Self::Bool3(h) => UniformData::Bool3(math::bvec_to_array(&h.read()?)),
            Self::Bool4(h) => UniformData::Bool4(math::bvec_to_array(&h.read()?)),
        })
    }
}

/// A uniform value bound to a program location.
#[derive(Debug, Clone)]
pub struct UniformBinding<U> {
    location: u32,
    value: U,
}

impl<U: UniformValue> UniformBinding<U> {
    pub(crate) fn new(location: u32, value: U) -> Self {
        Self { location, value }
    }

    pub fn location(&self) -> u32 {
        self.location
    }

    pub fn value(&self) -> &U {
        &self.value
    }

    pub fn property_name(&self) -> &str {
        self.value.property_name()
    }

    /// Current value, paired with its location.
    pub(crate) fn read(&self) -> DataResult<(u32, UniformData)> {
        Ok((self.location, self.value.read()?))
    }
}

/// A 2D sampler bound to a texture unit.
#[derive(Debug, Clone)]
pub struct SamplerBinding {
    position: u32,
    location: u32,
    sampler: PropertyHandle<TextureSampler>,
}

impl SamplerBinding {
    pub(crate) fn new(position: u32, location: u32, sampler: PropertyHandle<TextureSampler>) -> Self {
        Self {
            position,
            location,
            sampler,
        }
    }

    /// Texture unit.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Sampler uniform location.
    pub fn location(&self) -> u32 {
        self.location
    }

    pub fn property_name(&self) -> &str {
        self.sampler.name()
    }

    /// Currently bound texture.
    pub(crate) fn read(&self) -> DataResult<TextureId> {
        Ok(self.sampler.read()?.id)
    }

    pub(crate) fn upload(&self, texture: TextureId, context: &mut dyn GraphicsContext) {
        context.set_texture_at(self.position, texture, self.location);
    }
}

/// A vertex attribute bound to a vertex buffer slot.
#[derive(Debug, Clone)]
pub struct AttributeBinding {
    position: u32,
    location: u32,
    attribute: PropertyHandle<VertexAttribute>,
}

impl AttributeBinding {
    pub(crate) fn new(
        position: u32,
        location: u32,
        attribute: PropertyHandle<VertexAttribute>,
    ) -> Self {
        Self {
            position,
            location,
            attribute,
        }
    }

    /// Vertex buffer slot.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Attribute location in the program.
    pub fn location(&self) -> u32 {
        self.location
    }

    pub fn property_name(&self) -> &str {
        self.attribute.name()
    }

    pub(crate) fn read(&self) -> DataResult<VertexAttribute> {
        self.attribute.read()
    }

    pub(crate) fn upload(&self, attribute: &VertexAttribute, context: &mut dyn GraphicsContext) {
        context.set_vertex_buffer_at(
            self.position,
            attribute.buffer,
            attribute.size,
            attribute.vertex_size,
            attribute.offset,
        );
    }
}

/// Index buffer, first index and index count of the drawn geometry.
#[derive(Debug, Clone)]
pub(crate) struct IndexBinding {
    pub(crate) buffer: PropertyHandle<BufferId>,
    pub(crate) first_index: PropertyHandle<u32>,
    pub(crate) num_indices: PropertyHandle<u32>,
}

/// Current values of an [`IndexBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    pub buffer: BufferId,
    pub first_index: u32,
    pub num_indices: u32,
}

impl IndexBinding {
    pub(crate) fn read(&self) -> DataResult<IndexRange> {
        Ok(IndexRange {
            buffer: self.buffer.read()?,
            first_index: self.first_index.read()?,
            num_indices: self.num_indices.read()?,
        })
    }
}

/// A uniform resolved into its class.
pub(crate) enum ResolvedUniform {
    Float(FloatUniform),
    Int(IntUniform),
    Bool(BoolUniform),
    Sampler(PropertyHandle<TextureSampler>),
}

/// Resolve a program uniform to a typed handle into `container`.
pub(crate) fn resolve_uniform(
    input: &ProgramInput,
    container: &Container,
    name: &str,
) -> GraphicsResult<ResolvedUniform> {
    let resolved = match input.input_type {
        InputType::Int1 => ResolvedUniform::Int(IntUniform::Int1(container.handle(name)?)),
        InputType::Int2 => ResolvedUniform::Int(IntUniform::Int2(container.handle(name)?)),
        InputType::Int3 => ResolvedUniform::Int(IntUniform::Int3(container.handle(name)?)),
        InputType::Int4 => ResolvedUniform::Int(IntUniform::Int4(container.handle(name)?)),
        InputType::Float1 => ResolvedUniform::Float(FloatUniform::Float1(container.handle(name)?)),
        InputType::Float2 => ResolvedUniform::Float(FloatUniform::Float2(container.handle(name)?)),
        InputType::Float3 => ResolvedUniform::Float(FloatUniform::Float3(container.handle(name)?)),
        InputType::Float4 => ResolvedUniform::Float(FloatUniform::Float4(container.handle(name)?)),
        InputType::Float16 => {
            ResolvedUniform::Float(FloatUniform::Matrix4x4(container.handle(name)?))
        }
        InputType::Bool1 => ResolvedUniform::Bool(BoolUniform::Bool1(container.handle(name)?)),
        InputType::Bool2 => ResolvedUniform::Bool(BoolUniform::Bool2(container.handle(name)?)),
        InputType::Bool3 => ResolvedUniform::Bool(BoolUniform::Bool3(container.handle(name)?)),
        InputType::Bool4 => ResolvedUniform::Bool(BoolUniform::Bool4(container.handle(name)?)),
        InputType::Sampler2d => ResolvedUniform::Sampler(container.handle(name)?),
        InputType::Float9 | InputType::SamplerCube | InputType::Unknown => {
            return Err(GraphicsError::UnsupportedInputType {
                input: input.name.clone(),
                input_type: input.input_type,
            });
        }
    };
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextCommand, RecordingContext};
    use tessera_core::data::{DataError, Provider};
    use tessera_core::resource::TextureId;

    fn container() -> Container {
        let mut container = Container::new();
        container.add_provider(
            Provider::new()
                .with("color", Vec4::new(1.0, 0.5, 0.0, 1.0))
                .with("flags", BVec2::new(true, false))
                .with("diffuseMap", TextureSampler::new(TextureId(4)))
                .into_shared(),
        );
        container
    }

    #[test]
    fn test_resolve_dispatches_on_declared_type() {
        let container = container();

        let input = ProgramInput::new("diffuseColor", InputType::Float4, 2);
        let Ok(ResolvedUniform::Float(uniform)) = resolve_uniform(&input, &container, "color")
        else {
            panic!("expected a float uniform");
        };
        assert_eq!(uniform.input_type(), InputType::Float4);
        assert_eq!(uniform.property_name(), "color");

        let input = ProgramInput::new("flags", InputType::Bool2, 3);
        assert!(matches!(
            resolve_uniform(&input, &container, "flags"),
            Ok(ResolvedUniform::Bool(BoolUniform::Bool2(_)))
        ));
    }

    #[test]
    fn test_resolve_reports_type_mismatch() {
        let container = container();
        let input = ProgramInput::new("diffuseColor", InputType::Float3, 2);
        let Err(GraphicsError::Data(DataError::MissingProperty { expected, found, .. })) =
            resolve_uniform(&input, &container, "color")
        else {
            panic!("expected a type mismatch");
        };
        assert_eq!(expected, "float3");
        assert_eq!(found, Some("float4"));
    }

    #[test]
    fn test_resolve_rejects_cube_sampler() {
        let container = container();
        let input = ProgramInput::new("envMap", InputType::SamplerCube, 1);
        assert_eq!(
            resolve_uniform(&input, &container, "diffuseMap").err(),
            Some(GraphicsError::UnsupportedInputType {
                input: "envMap".to_string(),
                input_type: InputType::SamplerCube,
            })
        );
    }

    #[test]
    fn test_read_then_upload_issues_one_call() {
        let container = container();
        let uniform = UniformBinding::new(7, FloatUniform::Float4(container.handle("color").unwrap()));
        let (location, data) = uniform.read().unwrap();
        assert_eq!(data, UniformData::Float4([1.0, 0.5, 0.0, 1.0]));

        let mut context = RecordingContext::new();
        data.upload(location, &mut context);

        assert_eq!(
            context.commands(),
            [ContextCommand::UniformFloat4(7, [1.0, 0.5, 0.0, 1.0])]
        );
    }
}
