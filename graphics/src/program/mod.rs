//! Linked shader programs.
//!
//! A [`Program`] is a backend program identifier plus the reflection data
//! draw calls bind against. Some programs bind textures or attributes of
//! their own ("fixed" slots); those occupy the first slots and push
//! draw-call bindings further up.

mod input;

pub use input::{InputType, ProgramInput, ProgramInputs};

use std::fmt;

/// Backend identifier of a linked program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program#{}", self.0)
    }
}

/// A linked program and its reflected inputs.
#[derive(Debug, Clone)]
pub struct Program {
    id: ProgramId,
    label: Option<String>,
    inputs: ProgramInputs,
    fixed_attributes: Vec<String>,
    fixed_textures: Vec<String>,
}

impl Program {
    /// Create a program from its backend id and reflected inputs.
    pub fn new(id: ProgramId, inputs: ProgramInputs) -> Self {
        Self {
            id,
            label: None,
            inputs,
            fixed_attributes: Vec::new(),
            fixed_textures: Vec::new(),
        }
    }

    /// Set a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Declare an attribute the program binds itself.
    #[must_use]
    pub fn with_fixed_attribute(mut self, name: impl Into<String>) -> Self {
        self.fixed_attributes.push(name.into());
        self
    }

    /// Declare a texture the program binds itself.
    #[must_use]
    pub fn with_fixed_texture(mut self, name: impl Into<String>) -> Self {
        self.fixed_textures.push(name.into());
        self
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn inputs(&self) -> &ProgramInputs {
        &self.inputs
    }

    /// Names of the attributes the program binds itself.
    pub fn fixed_attributes(&self) -> &[String] {
        &self.fixed_attributes
    }

    /// Names of the textures the program binds itself.
    pub fn fixed_textures(&self) -> &[String] {
        &self.fixed_textures
    }

    /// Number of vertex buffer slots taken before draw-call attributes.
    pub fn fixed_attribute_count(&self) -> u32 {
        self.fixed_attributes.len() as u32
    }

    /// Number of texture units taken before draw-call samplers.
    pub fn fixed_texture_count(&self) -> u32 {
        self.fixed_textures.len() as u32
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({label})", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}
