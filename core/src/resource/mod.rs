//! GPU resource identifiers as seen by the data layer.
//!
//! Buffers and textures are uploaded elsewhere; property stores only carry
//! the ids and layout descriptors a draw call needs to reference them.

use std::fmt;

/// Identifier of an uploaded GPU buffer (vertex or index data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BufferId(pub u32);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer#{}", self.0)
    }
}

/// Identifier of an uploaded GPU texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

/// A texture bound for sampling.
///
/// Materials store samplers under names such as `diffuseMap`. Replacing
/// the sampler value swaps the texture seen by every bound draw call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureSampler {
    /// Texture to sample.
    pub id: TextureId,
    /// Optional debug label.
    pub label: Option<String>,
}

impl TextureSampler {
    /// Create a sampler for a texture.
    pub fn new(id: TextureId) -> Self {
        Self { id, label: None }
    }

    /// Set a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Layout of one vertex attribute inside an uploaded vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Buffer holding the vertex data.
    pub buffer: BufferId,
    /// Number of components (1 to 4).
    pub size: u32,
    /// Vertex stride, in floats.
    pub vertex_size: u32,
    /// Offset of the attribute within a vertex, in floats.
    pub offset: u32,
}

impl VertexAttribute {
    /// Create an attribute descriptor.
    pub fn new(buffer: BufferId, size: u32, vertex_size: u32, offset: u32) -> Self {
        Self {
            buffer,
            size,
            vertex_size,
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(BufferId(3).to_string(), "buffer#3");
        assert_eq!(TextureId(7).to_string(), "texture#7");
    }

    #[test]
    fn test_sampler_builder() {
        let sampler = TextureSampler::new(TextureId(2)).with_label("bricks");
        assert_eq!(sampler.id, TextureId(2));
        assert_eq!(sampler.label.as_deref(), Some("bricks"));
    }
}
