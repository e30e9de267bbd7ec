//! Shared scene fixture for draw-call integration tests.
//!
//! The scene mirrors a minimal textured cube: geometry published in the
//! target scope's `geometry` collection, a material and a transform as
//! top-level target providers, a camera in the renderer scope and lights
//! in the root scope.

#![allow(dead_code)]

use std::sync::Arc;

use tessera_core::data::{Binding, BindingMap, Container, DataScopes, Provider, SharedProvider, Variables};
use tessera_core::math::{self, Mat4, Vec3, Vec4};
use tessera_core::resource::{BufferId, TextureId, TextureSampler, VertexAttribute};
use tessera_graphics::{InputType, Pass, Program, ProgramId, ProgramInputs};

pub const GEOMETRY_UUID: &str = "cube";
pub const INDEX_BUFFER: BufferId = BufferId(10);
pub const VERTEX_BUFFER: BufferId = BufferId(11);
pub const NUM_INDICES: u32 = 36;
pub const DIFFUSE_TEXTURE: TextureId = TextureId(20);
pub const BASIC_PROGRAM: ProgramId = ProgramId(1);

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Template variables of the cube's draw call.
pub fn variables() -> Variables {
    let mut variables = Variables::new();
    variables.insert("geometryUuid".to_string(), GEOMETRY_UUID.to_string());
    variables
}

pub fn diffuse_color() -> Vec4 {
    Vec4::new(1.0, 0.0, 0.0, 1.0)
}

pub fn world_to_screen() -> Mat4 {
    math::mat4_from_translation(Vec3::new(0.0, 0.0, -5.0))
}

/// Three scopes populated with one textured cube.
pub struct TestScene {
    pub root: Container,
    pub renderer: Container,
    pub target: Container,
    pub geometry: SharedProvider,
    pub material: SharedProvider,
    pub transform: SharedProvider,
    pub camera: SharedProvider,
    pub lights: SharedProvider,
}

impl TestScene {
    pub fn new() -> Self {
        let geometry = Provider::with_uuid(GEOMETRY_UUID)
            .with("indices", INDEX_BUFFER)
            .with("firstIndex", 0u32)
            .with("numIndices", NUM_INDICES)
            .with("position", VertexAttribute::new(VERTEX_BUFFER, 3, 5, 0))
            .with("uv", VertexAttribute::new(VERTEX_BUFFER, 2, 5, 3))
            .into_shared();
        let material = Provider::new()
            .with("material.diffuseColor", diffuse_color())
            .with("material.diffuseMap", TextureSampler::new(DIFFUSE_TEXTURE))
            .into_shared();
        let transform = Provider::new()
            .with("transform.modelToWorldMatrix", Mat4::identity())
            .into_shared();
        let camera = Provider::new()
            .with("camera.worldToScreenMatrix", world_to_screen())
            .into_shared();
        let lights = Provider::new()
            .with("lights.color[0]", Vec3::new(1.0, 1.0, 0.5))
            .with("lights.count", 1i32)
            .into_shared();

        let mut target = Container::new();
        target.add_to_collection("geometry", geometry.clone());
        target.add_provider(material.clone());
        target.add_provider(transform.clone());

        let mut renderer = Container::new();
        renderer.add_provider(camera.clone());

        let mut root = Container::new();
        root.add_provider(lights.clone());

        Self {
            root,
            renderer,
            target,
            geometry,
            material,
            transform,
            camera,
            lights,
        }
    }

    pub fn scopes(&self) -> DataScopes<'_> {
        DataScopes::new(&self.root, &self.renderer, &self.target)
    }
}

/// Basic textured program: color, two matrices and a diffuse map.
pub fn basic_program() -> Arc<Program> {
    let inputs = ProgramInputs::new()
        .with_uniform("diffuseColor", InputType::Float4, 0)
        .with_uniform("modelToWorldMatrix", InputType::Float16, 1)
        .with_uniform("worldToScreenMatrix", InputType::Float16, 2)
        .with_uniform("diffuseMap", InputType::Sampler2d, 3)
        .with_attribute("position", InputType::Float3, 0)
        .with_attribute("uv", InputType::Float2, 1);
    Arc::new(Program::new(BASIC_PROGRAM, inputs).with_label("basic"))
}

pub fn attribute_bindings() -> BindingMap {
    BindingMap::new()
        .with("position", Binding::target("geometry[${geometryUuid}].position"))
        .with("uv", Binding::target("geometry[${geometryUuid}].uv"))
}

pub fn uniform_bindings() -> BindingMap {
    BindingMap::new()
        .with("diffuseColor", Binding::target("material.diffuseColor"))
        .with("diffuseMap", Binding::target("material.diffuseMap"))
        .with("modelToWorldMatrix", Binding::target("transform.modelToWorldMatrix"))
        .with("worldToScreenMatrix", Binding::renderer("camera.worldToScreenMatrix"))
}

/// Pass drawing the basic program with default states.
pub fn basic_pass() -> Pass {
    Pass::new("basic", basic_program())
        .with_attribute_bindings(attribute_bindings())
        .with_uniform_bindings(uniform_bindings())
}

/// Program with a single uniform `value` at `location`.
pub fn single_uniform_program(id: u32, input_type: InputType, location: u32) -> Arc<Program> {
    Arc::new(Program::new(
        ProgramId(id),
        ProgramInputs::new().with_uniform("value", input_type, location),
    ))
}
