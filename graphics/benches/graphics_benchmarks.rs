use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tessera_core::data::{Binding, BindingMap, Container, DataScopes, Provider, Variables};
use tessera_core::math::{Mat4, Vec4};
use tessera_core::resource::{BufferId, TextureId, TextureSampler, VertexAttribute};
use tessera_graphics::{
    DrawCall, DrawCallLimits, InputType, Pass, Program, ProgramId, ProgramInputs,
    RecordingContext, Renderer, RendererConfig,
};

struct Scene {
    root: Container,
    renderer: Container,
    target: Container,
}

impl Scene {
    fn new() -> Self {
        let mut target = Container::new();
        target.add_to_collection(
            "geometry",
            Provider::with_uuid("cube")
                .with("indices", BufferId(1))
                .with("firstIndex", 0u32)
                .with("numIndices", 36u32)
                .with("position", VertexAttribute::new(BufferId(2), 3, 8, 0))
                .with("normal", VertexAttribute::new(BufferId(2), 3, 8, 3))
                .with("uv", VertexAttribute::new(BufferId(2), 2, 8, 6))
                .into_shared(),
        );
        target.add_provider(
            Provider::new()
                .with("material.diffuseColor", Vec4::new(1.0, 0.0, 0.0, 1.0))
                .with("material.diffuseMap", TextureSampler::new(TextureId(1)))
                .with("transform.modelToWorldMatrix", Mat4::identity())
                .into_shared(),
        );

        let mut renderer = Container::new();
        renderer.add_provider(
            Provider::new()
                .with("camera.worldToScreenMatrix", Mat4::identity())
                .into_shared(),
        );

        Self {
            root: Container::new(),
            renderer,
            target,
        }
    }

    fn scopes(&self) -> DataScopes<'_> {
        DataScopes::new(&self.root, &self.renderer, &self.target)
    }
}

fn pass() -> Pass {
    let inputs = ProgramInputs::new()
        .with_uniform("diffuseColor", InputType::Float4, 0)
        .with_uniform("modelToWorldMatrix", InputType::Float16, 1)
        .with_uniform("worldToScreenMatrix", InputType::Float16, 2)
        .with_uniform("diffuseMap", InputType::Sampler2d, 3)
        .with_attribute("position", InputType::Float3, 0)
        .with_attribute("normal", InputType::Float3, 1)
        .with_attribute("uv", InputType::Float2, 2);

    Pass::new("phong", Arc::new(Program::new(ProgramId(1), inputs)))
        .with_attribute_bindings(
            BindingMap::new()
                .with("position", Binding::target("geometry[${geometryUuid}].position"))
                .with("normal", Binding::target("geometry[${geometryUuid}].normal"))
                .with("uv", Binding::target("geometry[${geometryUuid}].uv")),
        )
        .with_uniform_bindings(
            BindingMap::new()
                .with("diffuseColor", Binding::target("material.diffuseColor"))
                .with("diffuseMap", Binding::target("material.diffuseMap"))
                .with("modelToWorldMatrix", Binding::target("transform.modelToWorldMatrix"))
                .with("worldToScreenMatrix", Binding::renderer("camera.worldToScreenMatrix")),
        )
}

fn variables() -> Variables {
    let mut variables = Variables::new();
    variables.insert("geometryUuid".to_string(), "cube".to_string());
    variables
}

// ---------------------------------------------------------------------------
// Draw calls
// ---------------------------------------------------------------------------

fn bench_bind(c: &mut Criterion) {
    let scene = Scene::new();
    let pass = pass();
    let mut draw_call = DrawCall::for_pass(&pass, variables(), DrawCallLimits::default());

    c.bench_function("draw_call_bind", |b| {
        b.iter(|| draw_call.bind_pass(black_box(&pass), scene.scopes()));
    });
}

fn bench_render(c: &mut Criterion) {
    let scene = Scene::new();
    let pass = pass();
    let mut draw_call = DrawCall::for_pass(&pass, variables(), DrawCallLimits::default());
    draw_call.bind_pass(&pass, scene.scopes()).unwrap();
    let mut context = RecordingContext::new();

    c.bench_function("draw_call_render", |b| {
        b.iter(|| {
            context.clear_commands();
            black_box(&draw_call).render(&mut context, None)
        });
    });
}

fn bench_renderer_frame(c: &mut Criterion) {
    let scene = Scene::new();
    let pass = pass();
    let mut renderer = Renderer::new(RendererConfig::default());
    for _ in 0..64 {
        let mut draw_call = DrawCall::for_pass(&pass, variables(), DrawCallLimits::default());
        draw_call.bind_pass(&pass, scene.scopes()).unwrap();
        renderer.add_draw_call(draw_call);
    }
    let mut context = RecordingContext::new();

    c.bench_function("renderer_frame_64_draw_calls", |b| {
        b.iter(|| {
            context.clear_commands();
            renderer.render(&mut context)
        });
    });
}

criterion_group!(benches, bench_bind, bench_render, bench_renderer_frame);
criterion_main!(benches);
