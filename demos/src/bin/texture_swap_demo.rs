//! # Texture Swap Demo
//!
//! Demonstrates:
//! - Binding a draw call once from a pass and the three data scopes
//! - In-place writes (rotation, texture swap) observed without rebinding
//! - Rebinding after a structural change (pass switch)
//! - Priority-ordered frames through the renderer
//!
//! The demo is headless: frames go to a recording context and a per-frame
//! summary is logged.

use clap::Parser;

use tessera_core::state::States;
use tessera_demos::cube::{CubeScene, textured_pass};
use tessera_graphics::{
    ContextCommand, DrawCall, DrawCallLimits, GraphicsResult, RecordingContext, Renderer,
    RendererConfig,
};

/// Tessera texture swap demo.
#[derive(Parser, Debug)]
#[command(
    name = "texture_swap_demo",
    about = "Rotating cube whose diffuse texture is swapped while its draw call stays bound",
    version
)]
struct Args {
    /// Number of frames to render.
    #[arg(long, default_value = "240")]
    frames: u64,

    /// Swap the diffuse texture every N frames.
    #[arg(long, default_value = "60")]
    swap_interval: u64,

    /// Switch to a transparent pass (forcing a rebind) at this frame.
    #[arg(long)]
    transparent_at: Option<u64>,

    /// Background color as 0xRRGGBBAA.
    #[arg(long, default_value = "0x202020ff", value_parser = parse_rgba)]
    background: u32,

    /// Log filter, e.g. `info` or `tessera_graphics=trace`.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_rgba(value: &str) -> Result<u32, std::num::ParseIntError> {
    u32::from_str_radix(value.trim_start_matches("0x"), 16)
}

fn main() -> GraphicsResult<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();
    tessera_graphics::init();

    let mut scene = CubeScene::new(16.0 / 9.0);
    let pass = textured_pass();
    let mut draw_call = DrawCall::for_pass(&pass, scene.variables(), DrawCallLimits::default());
    draw_call.bind_pass(&pass, scene.scopes())?;

    let mut renderer = Renderer::new(RendererConfig::from_rgba(args.background));
    let cube = renderer.add_draw_call(draw_call);
    let mut context = RecordingContext::new();
    let swap_interval = args.swap_interval.max(1);

    for frame in 0..args.frames {
        scene.set_rotation(frame as f32 * 0.02);
        if frame > 0 && frame % swap_interval == 0 {
            let texture = scene.swap_texture();
            log::info!("Frame {}: diffuse map swapped to {}", frame, texture);
        }

        if args.transparent_at == Some(frame) {
            let transparent = textured_pass().with_states(States::transparent());
            if let Some(draw_call) = renderer.draw_call_mut(cube) {
                draw_call.bind_pass(&transparent, scene.scopes())?;
                log::info!("Frame {}: rebound with transparent states", frame);
            }
        }

        let stats = renderer.render(&mut context);
        let commands = context.take();
        let draws = commands.iter().filter(|c| c.is_draw()).count();
        let texture = commands.iter().find_map(|c| match c {
            ContextCommand::Texture { texture, .. } => Some(*texture),
            _ => None,
        });
        log::debug!(
            "Frame {}: {} commands, {} draws, {} skipped, texture {:?}",
            frame,
            commands.len(),
            draws,
            stats.skipped,
            texture
        );
    }

    log::info!(
        "Rendered {} frames ({} presented)",
        renderer.frame(),
        context.frames()
    );
    Ok(())
}
