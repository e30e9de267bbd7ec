//! Frame renderer.
//!
//! The renderer owns the draw calls drawn for one camera and issues them
//! once per frame in priority order.

use tessera_core::data::{SlotArena, SlotKey};

use crate::config::RendererConfig;
use crate::context::GraphicsContext;
use crate::draw_call::DrawCall;

/// Handle to a draw call owned by a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawCallId(SlotKey);

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Draw calls issued.
    pub rendered: usize,
    /// Draw calls skipped because they failed.
    pub skipped: usize,
}

/// Issues owned draw calls, sorted by priority, to a graphics context.
#[derive(Debug, Default)]
pub struct Renderer {
    config: RendererConfig,
    draw_calls: SlotArena<DrawCall>,
    frame: u64,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            draw_calls: SlotArena::new(),
            frame: 0,
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RendererConfig {
        &mut self.config
    }

    /// Take ownership of a draw call.
    pub fn add_draw_call(&mut self, draw_call: DrawCall) -> DrawCallId {
        DrawCallId(self.draw_calls.insert(draw_call))
    }

    /// Give a draw call back. Its id becomes invalid.
    pub fn remove_draw_call(&mut self, id: DrawCallId) -> Option<DrawCall> {
        self.draw_calls.remove(id.0)
    }

    pub fn draw_call(&self, id: DrawCallId) -> Option<&DrawCall> {
        self.draw_calls.get(id.0)
    }

    /// Mutable access, e.g. to rebind after a structural change.
    pub fn draw_call_mut(&mut self, id: DrawCallId) -> Option<&mut DrawCall> {
        self.draw_calls.get_mut(id.0)
    }

    pub fn draw_call_count(&self) -> usize {
        self.draw_calls.len()
    }

    /// Number of frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Render one frame.
    ///
    /// Clears with the background color, renders draw calls from highest to
    /// lowest priority and presents. Equal priorities keep slot order. States
    /// are resolved once per draw call per frame. A failing draw call is
    /// logged and skipped; the frame goes on.
    pub fn render(&mut self, context: &mut dyn GraphicsContext) -> FrameStats {
        let mut stats = FrameStats::default();
        let mut queue = Vec::with_capacity(self.draw_calls.len());

        for (key, draw_call) in self.draw_calls.iter() {
            match draw_call.states() {
                Ok(states) => queue.push((states.priority, key, draw_call, states)),
                Err(err) => {
                    log::warn!("Renderer: skipping draw call {:?}: {}", key, err);
                    stats.skipped += 1;
                }
            }
        }
        queue.sort_by(|a, b| b.0.total_cmp(&a.0));

        context.clear(self.config.background_color);
        for (_, key, draw_call, states) in queue {
            match draw_call.render_with_states(context, self.config.render_target, states) {
                Ok(()) => stats.rendered += 1,
                Err(err) => {
                    log::warn!("Renderer: skipping draw call {:?}: {}", key, err);
                    stats.skipped += 1;
                }
            }
        }
        context.present();

        self.frame += 1;
        log::trace!(
            "Renderer: frame {} rendered {} draw calls, skipped {}",
            self.frame,
            stats.rendered,
            stats.skipped
        );
        stats
    }
}
