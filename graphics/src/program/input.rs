//! Shader input reflection.

use std::fmt;

/// Type of a program input, as reported by shader reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    Int1,
    Int2,
    Int3,
    Int4,
    Float1,
    Float2,
    Float3,
    Float4,
    /// 3x3 matrix. Reflected but not bindable.
    Float9,
    /// 4x4 matrix.
    Float16,
    Bool1,
    Bool2,
    Bool3,
    Bool4,
    Sampler2d,
    /// Cube map sampler. Reflected but not bindable.
    SamplerCube,
    Unknown,
}

impl InputType {
    /// Every input type, in declaration order.
    pub const ALL: [InputType; 17] = [
        Self::Int1,
        Self::Int2,
        Self::Int3,
        Self::Int4,
        Self::Float1,
        Self::Float2,
        Self::Float3,
        Self::Float4,
        Self::Float9,
        Self::Float16,
        Self::Bool1,
        Self::Bool2,
        Self::Bool3,
        Self::Bool4,
        Self::Sampler2d,
        Self::SamplerCube,
        Self::Unknown,
    ];

    /// Reflection name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int1 => "int1",
            Self::Int2 => "int2",
            Self::Int3 => "int3",
            Self::Int4 => "int4",
            Self::Float1 => "float1",
            Self::Float2 => "float2",
            Self::Float3 => "float3",
            Self::Float4 => "float4",
            Self::Float9 => "float9",
            Self::Float16 => "float16",
            Self::Bool1 => "bool1",
            Self::Bool2 => "bool2",
            Self::Bool3 => "bool3",
            Self::Bool4 => "bool4",
            Self::Sampler2d => "sampler2d",
            Self::SamplerCube => "samplerCube",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a reflection name. Unrecognized names map to [`InputType::Unknown`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == name)
            .unwrap_or(Self::Unknown)
    }

    /// Whether a draw call can bind an input of this type.
    pub fn is_bindable(&self) -> bool {
        !matches!(self, Self::Float9 | Self::SamplerCube | Self::Unknown)
    }

    /// Whether the type is a texture sampler.
    pub fn is_sampler(&self) -> bool {
        matches!(self, Self::Sampler2d | Self::SamplerCube)
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared program input: a uniform or a vertex attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInput {
    /// Declared name. Uniform arrays report a trailing `[0]`.
    pub name: String,
    /// Declared type.
    pub input_type: InputType,
    /// Backend location.
    pub location: u32,
}

impl ProgramInput {
    /// Create a program input.
    pub fn new(name: impl Into<String>, input_type: InputType, location: u32) -> Self {
        Self {
            name: name.into(),
            input_type,
            location,
        }
    }
}

/// Reflected inputs of a linked program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramInputs {
    uniforms: Vec<ProgramInput>,
    attributes: Vec<ProgramInput>,
}

impl ProgramInputs {
    /// Create an empty input list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a uniform (builder style).
    #[must_use]
    pub fn with_uniform(mut self, name: impl Into<String>, input_type: InputType, location: u32) -> Self {
        self.uniforms.push(ProgramInput::new(name, input_type, location));
        self
    }

    /// Declare a vertex attribute (builder style).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, input_type: InputType, location: u32) -> Self {
        self.attributes.push(ProgramInput::new(name, input_type, location));
        self
    }

    /// Declared uniforms, in reflection order.
    pub fn uniforms(&self) -> &[ProgramInput] {
        &self.uniforms
    }

    /// Declared vertex attributes, in reflection order.
    pub fn attributes(&self) -> &[ProgramInput] {
        &self.attributes
    }

    /// Uniform by declared name.
    pub fn uniform(&self, name: &str) -> Option<&ProgramInput> {
        self.uniforms.iter().find(|input| input.name == name)
    }

    /// Attribute by declared name.
    pub fn attribute(&self, name: &str) -> Option<&ProgramInput> {
        self.attributes.iter().find(|input| input.name == name)
    }
}
