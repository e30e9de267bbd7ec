//! Render-state value types and the default state record.

use crate::resource::TextureId;

/// Blend factor applied to the source or destination color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// 0.0
    Zero,
    /// 1.0
    One,
    /// Source color
    SrcColor,
    /// 1 - source color
    OneMinusSrcColor,
    /// Source alpha
    SrcAlpha,
    /// 1 - source alpha
    OneMinusSrcAlpha,
    /// Destination color
    DstColor,
    /// 1 - destination color
    OneMinusDstColor,
    /// Destination alpha
    DstAlpha,
    /// 1 - destination alpha
    OneMinusDstAlpha,
    /// min(source alpha, 1 - destination alpha)
    SrcAlphaSaturate,
}

/// Comparison used by depth and stencil tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareMode {
    /// Always pass.
    Always,
    /// Pass if equal.
    Equal,
    /// Pass if greater than.
    Greater,
    /// Pass if greater than or equal.
    GreaterEqual,
    /// Pass if less than.
    Less,
    /// Pass if less than or equal.
    LessEqual,
    /// Never pass.
    Never,
    /// Pass if not equal.
    NotEqual,
}

/// Operation applied to the stencil buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilOperation {
    /// Keep the current value.
    Keep,
    /// Set to zero.
    Zero,
    /// Replace with the reference value.
    Replace,
    /// Increment, clamping at the maximum.
    Incr,
    /// Increment, wrapping to zero.
    IncrWrap,
    /// Decrement, clamping at zero.
    Decr,
    /// Decrement, wrapping to the maximum.
    DecrWrap,
    /// Bitwise invert.
    Invert,
}

/// Which triangle faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangleCulling {
    /// Draw both faces.
    None,
    /// Discard back faces.
    Back,
    /// Discard front faces.
    Front,
    /// Discard both faces.
    Both,
}

/// Scissor rectangle in pixels. A negative size disables clipping on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScissorBox {
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl ScissorBox {
    /// Create a scissor box.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for ScissorBox {
    fn default() -> Self {
        Self::new(0, 0, -1, -1)
    }
}

/// Common draw priorities. Higher priorities are drawn first.
pub struct Priority;

impl Priority {
    /// Drawn before everything else.
    pub const FIRST: f32 = 4000.0;
    /// Sky boxes and backdrops.
    pub const BACKGROUND: f32 = 3000.0;
    /// Opaque geometry.
    pub const OPAQUE: f32 = 2000.0;
    /// Blended geometry.
    pub const TRANSPARENT: f32 = 1000.0;
    /// Drawn after everything else.
    pub const LAST: f32 = 0.0;
}

/// A complete set of render states.
///
/// Passes share one immutable `States` value as the defaults of every draw
/// call they create; draw calls overlay per-binding overrides on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct States {
    pub priority: f32,
    pub z_sorted: bool,
    pub blending_source: BlendFactor,
    pub blending_destination: BlendFactor,
    pub color_mask: bool,
    pub depth_mask: bool,
    pub depth_function: CompareMode,
    pub triangle_culling: TriangleCulling,
    pub stencil_function: CompareMode,
    pub stencil_reference: i32,
    pub stencil_mask: u32,
    pub stencil_fail_operation: StencilOperation,
    pub stencil_z_fail_operation: StencilOperation,
    pub stencil_z_pass_operation: StencilOperation,
    pub scissor_test: bool,
    pub scissor_box: ScissorBox,
    /// Render-to-texture target; `None` renders to whatever the caller picks.
    pub target: Option<TextureId>,
}

impl Default for States {
    fn default() -> Self {
        Self {
            priority: Priority::OPAQUE,
            z_sorted: false,
            blending_source: BlendFactor::One,
            blending_destination: BlendFactor::Zero,
            color_mask: true,
            depth_mask: true,
            depth_function: CompareMode::Less,
            triangle_culling: TriangleCulling::Back,
            stencil_function: CompareMode::Always,
            stencil_reference: 0,
            stencil_mask: 1,
            stencil_fail_operation: StencilOperation::Keep,
            stencil_z_fail_operation: StencilOperation::Keep,
            stencil_z_pass_operation: StencilOperation::Keep,
            scissor_test: false,
            scissor_box: ScissorBox::default(),
            target: None,
        }
    }
}

impl States {
    /// Standard alpha blending, drawn after opaque geometry and depth sorted.
    pub fn transparent() -> Self {
        Self {
            priority: Priority::TRANSPARENT,
            z_sorted: true,
            blending_source: BlendFactor::SrcAlpha,
            blending_destination: BlendFactor::OneMinusSrcAlpha,
            depth_mask: false,
            ..Self::default()
        }
    }

    /// Set the draw priority.
    #[must_use]
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the blend factors.
    #[must_use]
    pub fn with_blending(mut self, source: BlendFactor, destination: BlendFactor) -> Self {
        self.blending_source = source;
        self.blending_destination = destination;
        self
    }

    /// Set depth write and depth comparison.
    #[must_use]
    pub fn with_depth(mut self, mask: bool, function: CompareMode) -> Self {
        self.depth_mask = mask;
        self.depth_function = function;
        self
    }

    /// Set face culling.
    #[must_use]
    pub fn with_triangle_culling(mut self, culling: TriangleCulling) -> Self {
        self.triangle_culling = culling;
        self
    }

    /// Enable the scissor test with the given box.
    #[must_use]
    pub fn with_scissor(mut self, scissor_box: ScissorBox) -> Self {
        self.scissor_test = true;
        self.scissor_box = scissor_box;
        self
    }

    /// Render into a texture instead of the caller's target.
    #[must_use]
    pub fn with_target(mut self, target: TextureId) -> Self {
        self.target = Some(target);
        self
    }
}
