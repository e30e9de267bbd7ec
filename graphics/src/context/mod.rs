//! The graphics context abstraction.
//!
//! [`GraphicsContext`] is the narrow set of immediate-mode commands a draw
//! call issues. Backends implement it; [`RecordingContext`] records the
//! command stream for tests and headless runs.

mod recording;

pub use recording::{ContextCommand, RecordingContext};

use tessera_core::resource::{BufferId, TextureId};
use tessera_core::state::{BlendFactor, CompareMode, ScissorBox, StencilOperation, TriangleCulling};

use crate::program::ProgramId;

/// Immediate-mode graphics commands.
///
/// Boolean uniforms have no native setter on most backends; the default
/// implementations upload them as integers (0 or 1).
pub trait GraphicsContext {
    /// Render into the window's back buffer.
    fn set_render_to_back_buffer(&mut self);

    /// Render into a texture.
    fn set_render_to_texture(&mut self, texture: TextureId, enable_depth_and_stencil: bool);

    fn set_program(&mut self, program: ProgramId);

    fn set_uniform_float(&mut self, location: u32, value: f32);
    fn set_uniform_float2(&mut self, location: u32, value: [f32; 2]);
    fn set_uniform_float3(&mut self, location: u32, value: [f32; 3]);
    fn set_uniform_float4(&mut self, location: u32, value: [f32; 4]);

    /// Upload a column-major 4x4 matrix.
    fn set_uniform_matrix4x4(&mut self, location: u32, value: [f32; 16]);

    fn set_uniform_int(&mut self, location: u32, value: i32);
    fn set_uniform_int2(&mut self, location: u32, value: [i32; 2]);
    fn set_uniform_int3(&mut self, location: u32, value: [i32; 3]);
    fn set_uniform_int4(&mut self, location: u32, value: [i32; 4]);

    fn set_uniform_bool(&mut self, location: u32, value: bool) {
        self.set_uniform_int(location, i32::from(value));
    }

    fn set_uniform_bool2(&mut self, location: u32, value: [bool; 2]) {
        self.set_uniform_int2(location, value.map(i32::from));
    }

    fn set_uniform_bool3(&mut self, location: u32, value: [bool; 3]) {
        self.set_uniform_int3(location, value.map(i32::from));
    }

    fn set_uniform_bool4(&mut self, location: u32, value: [bool; 4]) {
        self.set_uniform_int4(location, value.map(i32::from));
    }

    fn set_color_mask(&mut self, enabled: bool);

    fn set_blend_mode(&mut self, source: BlendFactor, destination: BlendFactor);

    fn set_depth_test(&mut self, depth_mask: bool, function: CompareMode);

    #[allow(clippy::too_many_arguments)]
    fn set_stencil_test(
        &mut self,
        function: CompareMode,
        reference: i32,
        mask: u32,
        fail: StencilOperation,
        z_fail: StencilOperation,
        z_pass: StencilOperation,
    );

    fn set_scissor_test(&mut self, enabled: bool, scissor_box: ScissorBox);

    fn set_triangle_culling(&mut self, culling: TriangleCulling);

    /// Bind a texture to texture unit `position` and point the sampler
    /// uniform at `location` to it.
    fn set_texture_at(&mut self, position: u32, texture: TextureId, location: u32);

    /// Bind a vertex buffer to attribute slot `position`.
    ///
    /// `size` is the component count, `stride` the vertex size in floats and
    /// `offset` the attribute offset within a vertex.
    fn set_vertex_buffer_at(
        &mut self,
        position: u32,
        buffer: BufferId,
        size: u32,
        stride: u32,
        offset: u32,
    );

    /// Draw indexed triangles starting at `first_index`.
    fn draw_triangles(&mut self, index_buffer: BufferId, first_index: u32, num_triangles: u32);

    /// Clear color, depth and stencil.
    fn clear(&mut self, color: [f32; 4]);

    /// Present the frame.
    fn present(&mut self);
}
