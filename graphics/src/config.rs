//! Draw-call and renderer configuration.

use tessera_core::resource::TextureId;

/// Slot limits enforced while binding a draw call.
///
/// Fixed slots a program binds itself count against the same limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCallLimits {
    /// Maximum number of texture units.
    pub max_samplers: u32,
    /// Maximum number of vertex buffer slots.
    pub max_vertex_buffers: u32,
}

impl DrawCallLimits {
    /// Default number of texture units.
    pub const DEFAULT_MAX_SAMPLERS: u32 = 8;
    /// Default number of vertex buffer slots.
    pub const DEFAULT_MAX_VERTEX_BUFFERS: u32 = 8;

    /// Set the texture unit limit.
    #[must_use]
    pub fn with_max_samplers(mut self, max: u32) -> Self {
        self.max_samplers = max;
        self
    }

    /// Set the vertex buffer limit.
    #[must_use]
    pub fn with_max_vertex_buffers(mut self, max: u32) -> Self {
        self.max_vertex_buffers = max;
        self
    }
}

impl Default for DrawCallLimits {
    fn default() -> Self {
        Self {
            max_samplers: Self::DEFAULT_MAX_SAMPLERS,
            max_vertex_buffers: Self::DEFAULT_MAX_VERTEX_BUFFERS,
        }
    }
}

/// Frame-level renderer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Color the frame is cleared to, RGBA.
    pub background_color: [f32; 4],
    /// Render-to-texture target; `None` renders to the back buffer.
    pub render_target: Option<TextureId>,
}

impl RendererConfig {
    /// Build a config from a packed `0xRRGGBBAA` background color.
    pub fn from_rgba(rgba: u32) -> Self {
        Self {
            background_color: unpack_rgba(rgba),
            ..Self::default()
        }
    }

    /// Render into a texture.
    #[must_use]
    pub fn with_render_target(mut self, target: TextureId) -> Self {
        self.render_target = Some(target);
        self
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            render_target: None,
        }
    }
}

fn unpack_rgba(rgba: u32) -> [f32; 4] {
    let [r, g, b, a] = rgba.to_be_bytes();
    [r, g, b, a].map(|c| c as f32 / 255.0)
}
