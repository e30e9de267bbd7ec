//! Recording graphics context for testing and headless runs.
//!
//! This context doesn't talk to a GPU. It stores every command it receives
//! so callers can inspect the exact stream a draw call issues.

use tessera_core::resource::{BufferId, TextureId};
use tessera_core::state::{BlendFactor, CompareMode, ScissorBox, StencilOperation, TriangleCulling};

use super::GraphicsContext;
use crate::program::ProgramId;

/// One recorded context command.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextCommand {
    RenderToBackBuffer,
    RenderToTexture {
        texture: TextureId,
        enable_depth_and_stencil: bool,
    },
    Program(ProgramId),
    UniformFloat(u32, f32),
    UniformFloat2(u32, [f32; 2]),
    UniformFloat3(u32, [f32; 3]),
    UniformFloat4(u32, [f32; 4]),
    UniformMatrix4x4(u32, [f32; 16]),
    UniformInt(u32, i32),
    UniformInt2(u32, [i32; 2]),
    UniformInt3(u32, [i32; 3]),
    UniformInt4(u32, [i32; 4]),
    UniformBool(u32, bool),
    UniformBool2(u32, [bool; 2]),
    UniformBool3(u32, [bool; 3]),
    UniformBool4(u32, [bool; 4]),
    ColorMask(bool),
    BlendMode(BlendFactor, BlendFactor),
    DepthTest(bool, CompareMode),
    StencilTest {
        function: CompareMode,
        reference: i32,
        mask: u32,
        fail: StencilOperation,
        z_fail: StencilOperation,
        z_pass: StencilOperation,
    },
    ScissorTest(bool, ScissorBox),
    TriangleCulling(TriangleCulling),
    Texture {
        position: u32,
        texture: TextureId,
        location: u32,
    },
    VertexBuffer {
        position: u32,
        buffer: BufferId,
        size: u32,
        stride: u32,
        offset: u32,
    },
    DrawTriangles {
        index_buffer: BufferId,
        first_index: u32,
        num_triangles: u32,
    },
    Clear([f32; 4]),
    Present,
}

impl ContextCommand {
    /// Uniform location, for uniform commands.
    pub fn uniform_location(&self) -> Option<u32> {
        match self {
            Self::UniformFloat(location, _)
            | Self::UniformFloat2(location, _)
            | Self::UniformFloat3(location, _)
            | Self::UniformFloat4(location, _)
            | Self::UniformMatrix4x4(location, _)
            | Self::UniformInt(location, _)
            | Self::UniformInt2(location, _)
            | Self::UniformInt3(location, _)
            | Self::UniformInt4(location, _)
            | Self::UniformBool(location, _)
            | Self::UniformBool2(location, _)
            | Self::UniformBool3(location, _)
            | Self::UniformBool4(location, _) => Some(*location),
            _ => None,
        }
    }

    /// Whether the command draws geometry.
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::DrawTriangles { .. })
    }
}

/// A [`GraphicsContext`] that records commands instead of executing them.
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<ContextCommand>,
    frames: u64,
}

impl RecordingContext {
    /// Create an empty recording context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the backend name.
    pub fn name(&self) -> &'static str {
        "Recording"
    }

    /// Commands recorded since the last [`take`](Self::take) or [`clear_commands`](Self::clear_commands).
    pub fn commands(&self) -> &[ContextCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<ContextCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Forget the recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded commands matching a predicate.
    pub fn count(&self, predicate: impl Fn(&ContextCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }

    /// Number of presented frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn record(&mut self, command: ContextCommand) {
        log::trace!("RecordingContext: {:?}", command);
        self.commands.push(command);
    }
}

impl GraphicsContext for RecordingContext {
    fn set_render_to_back_buffer(&mut self) {
        self.record(ContextCommand::RenderToBackBuffer);
    }

    fn set_render_to_texture(&mut self, texture: TextureId, enable_depth_and_stencil: bool) {
        self.record(ContextCommand::RenderToTexture {
            texture,
            enable_depth_and_stencil,
        });
    }

    fn set_program(&mut self, program: ProgramId) {
        self.record(ContextCommand::Program(program));
    }

    fn set_uniform_float(&mut self, location: u32, value: f32) {
        self.record(ContextCommand::UniformFloat(location, value));
    }

    fn set_uniform_float2(&mut self, location: u32, value: [f32; 2]) {
        self.record(ContextCommand::UniformFloat2(location, value));
    }

    fn set_uniform_float3(&mut self, location: u32, value: [f32; 3]) {
        self.record(ContextCommand::UniformFloat3(location, value));
    }

    fn set_uniform_float4(&mut self, location: u32, value: [f32; 4]) {
        self.record(ContextCommand::UniformFloat4(location, value));
    }

    fn set_uniform_matrix4x4(&mut self, location: u32, value: [f32; 16]) {
        self.record(ContextCommand::UniformMatrix4x4(location, value));
    }

    fn set_uniform_int(&mut self, location: u32, value: i32) {
        self.record(ContextCommand::UniformInt(location, value));
    }

    fn set_uniform_int2(&mut self, location: u32, value: [i32; 2]) {
        self.record(ContextCommand::UniformInt2(location, value));
    }

    fn set_uniform_int3(&mut self, location: u32, value: [i32; 3]) {
        self.record(ContextCommand::UniformInt3(location, value));
    }

    fn set_uniform_int4(&mut self, location: u32, value: [i32; 4]) {
        self.record(ContextCommand::UniformInt4(location, value));
    }

    // Booleans are recorded as-is so the stream shows which setter was used.
    fn set_uniform_bool(&mut self, location: u32, value: bool) {
        self.record(ContextCommand::UniformBool(location, value));
    }

    fn set_uniform_bool2(&mut self, location: u32, value: [bool; 2]) {
        self.record(ContextCommand::UniformBool2(location, value));
    }

    fn set_uniform_bool3(&mut self, location: u32, value: [bool; 3]) {
        self.record(ContextCommand::UniformBool3(location, value));
    }

    fn set_uniform_bool4(&mut self, location: u32, value: [bool; 4]) {
        self.record(ContextCommand::UniformBool4(location, value));
    }

    fn set_color_mask(&mut self, enabled: bool) {
        self.record(ContextCommand::ColorMask(enabled));
    }

    fn set_blend_mode(&mut self, source: BlendFactor, destination: BlendFactor) {
        self.record(ContextCommand::BlendMode(source, destination));
    }

    fn set_depth_test(&mut self, depth_mask: bool, function: CompareMode) {
        self.record(ContextCommand::DepthTest(depth_mask, function));
    }

    fn set_stencil_test(
        &mut self,
        function: CompareMode,
        reference: i32,
        mask: u32,
        fail: StencilOperation,
        z_fail: StencilOperation,
        z_pass: StencilOperation,
    ) {
        self.record(ContextCommand::StencilTest {
            function,
            reference,
            mask,
            fail,
            z_fail,
            z_pass,
        });
    }

    fn set_scissor_test(&mut self, enabled: bool, scissor_box: ScissorBox) {
        self.record(ContextCommand::ScissorTest(enabled, scissor_box));
    }

    fn set_triangle_culling(&mut self, culling: TriangleCulling) {
        self.record(ContextCommand::TriangleCulling(culling));
    }

    fn set_texture_at(&mut self, position: u32, texture: TextureId, location: u32) {
        self.record(ContextCommand::Texture {
            position,
            texture,
            location,
        });
    }

    fn set_vertex_buffer_at(
        &mut self,
        position: u32,
        buffer: BufferId,
        size: u32,
        stride: u32,
        offset: u32,
    ) {
        self.record(ContextCommand::VertexBuffer {
            position,
            buffer,
            size,
            stride,
            offset,
        });
    }

    fn draw_triangles(&mut self, index_buffer: BufferId, first_index: u32, num_triangles: u32) {
        self.record(ContextCommand::DrawTriangles {
            index_buffer,
            first_index,
            num_triangles,
        });
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.record(ContextCommand::Clear(color));
    }

    fn present(&mut self) {
        self.frames += 1;
        self.record(ContextCommand::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Context relying on the default boolean forwarding.
    #[derive(Default)]
    struct IntOnly(RecordingContext);

    impl GraphicsContext for IntOnly {
        fn set_render_to_back_buffer(&mut self) {}
        fn set_render_to_texture(&mut self, _: TextureId, _: bool) {}
        fn set_program(&mut self, _: ProgramId) {}
        fn set_uniform_float(&mut self, _: u32, _: f32) {}
        fn set_uniform_float2(&mut self, _: u32, _: [f32; 2]) {}
        fn set_uniform_float3(&mut self, _: u32, _: [f32; 3]) {}
        fn set_uniform_float4(&mut self, _: u32, _: [f32; 4]) {}
        fn set_uniform_matrix4x4(&mut self, _: u32, _: [f32; 16]) {}
        fn set_uniform_int(&mut self, location: u32, value: i32) {
            self.0.set_uniform_int(location, value);
        }
        fn set_uniform_int2(&mut self, location: u32, value: [i32; 2]) {
            self.0.set_uniform_int2(location, value);
        }
        fn set_uniform_int3(&mut self, location: u32, value: [i32; 3]) {
            self.0.set_uniform_int3(location, value);
        }
        fn set_uniform_int4(&mut self, location: u32, value: [i32; 4]) {
            self.0.set_uniform_int4(location, value);
        }
        fn set_color_mask(&mut self, _: bool) {}
        fn set_blend_mode(&mut self, _: BlendFactor, _: BlendFactor) {}
        fn set_depth_test(&mut self, _: bool, _: CompareMode) {}
        fn set_stencil_test(
            &mut self,
            _: CompareMode,
            _: i32,
            _: u32,
            _: StencilOperation,
            _: StencilOperation,
            _: StencilOperation,
        ) {
        }
        fn set_scissor_test(&mut self, _: bool, _: ScissorBox) {}
        fn set_triangle_culling(&mut self, _: TriangleCulling) {}
        fn set_texture_at(&mut self, _: u32, _: TextureId, _: u32) {}
        fn set_vertex_buffer_at(&mut self, _: u32, _: BufferId, _: u32, _: u32, _: u32) {}
        fn draw_triangles(&mut self, _: BufferId, _: u32, _: u32) {}
        fn clear(&mut self, _: [f32; 4]) {}
        fn present(&mut self) {}
    }

    #[test]
    fn test_bool_uniforms_forward_to_ints() {
        let mut context = IntOnly::default();
        context.set_uniform_bool(2, true);
        context.set_uniform_bool3(5, [true, false, true]);

        assert_eq!(
            context.0.commands(),
            [
                ContextCommand::UniformInt(2, 1),
                ContextCommand::UniformInt3(5, [1, 0, 1]),
            ]
        );
    }

    #[test]
    fn test_records_in_order() {
        let mut context = RecordingContext::new();
        context.clear([0.0, 0.0, 0.0, 1.0]);
        context.set_uniform_float(1, 0.5);
        context.present();

        assert_eq!(context.commands().len(), 3);
        assert_eq!(context.commands()[1].uniform_location(), Some(1));
        assert_eq!(context.frames(), 1);

        let taken = context.take();
        assert_eq!(taken.last(), Some(&ContextCommand::Present));
        assert!(context.commands().is_empty());
    }
}
