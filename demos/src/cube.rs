//! A textured, rotating cube published through the three data scopes.

use std::sync::Arc;

use tessera_core::data::{Binding, BindingMap, Container, DataScopes, Provider, SharedProvider, Variables};
use tessera_core::math::{self, Mat4, Vec3, Vec4};
use tessera_core::resource::{BufferId, TextureId, TextureSampler, VertexAttribute};
use tessera_core::state::States;
use tessera_graphics::{InputType, Pass, Program, ProgramId, ProgramInputs};

/// Unique id of the cube geometry.
pub const CUBE_UUID: &str = "cube";

/// Textures the cube alternates between.
pub const TEXTURES: [TextureId; 2] = [TextureId(1), TextureId(2)];

const INDEX_BUFFER: BufferId = BufferId(1);
const VERTEX_BUFFER: BufferId = BufferId(2);
const NUM_INDICES: u32 = 36;
// position (3) + uv (2)
const VERTEX_SIZE: u32 = 5;

/// Root, renderer and target scopes of a one-cube scene.
pub struct CubeScene {
    root: Container,
    renderer: Container,
    target: Container,
    material: SharedProvider,
    transform: SharedProvider,
    texture_index: usize,
}

impl CubeScene {
    pub fn new(aspect: f32) -> Self {
        let geometry = Provider::with_uuid(CUBE_UUID)
            .with("indices", INDEX_BUFFER)
            .with("firstIndex", 0u32)
            .with("numIndices", NUM_INDICES)
            .with("position", VertexAttribute::new(VERTEX_BUFFER, 3, VERTEX_SIZE, 0))
            .with("uv", VertexAttribute::new(VERTEX_BUFFER, 2, VERTEX_SIZE, 3))
            .into_shared();
        let material = Provider::new()
            .with("material.diffuseColor", Vec4::new(1.0, 1.0, 1.0, 1.0))
            .with("material.diffuseMap", TextureSampler::new(TEXTURES[0]).with_label("crate"))
            .into_shared();
        let transform = Provider::new()
            .with("transform.modelToWorldMatrix", Mat4::identity())
            .into_shared();

        let view = math::look_at_rh(&Vec3::new(0.0, 1.5, 4.0), &Vec3::zeros(), &Vec3::y());
        let projection = math::perspective_rh(std::f32::consts::FRAC_PI_4, aspect, 0.1, 100.0);
        let camera = Provider::new()
            .with("camera.worldToScreenMatrix", projection * view)
            .into_shared();

        let mut target = Container::new();
        target.add_to_collection("geometry", geometry);
        target.add_provider(material.clone());
        target.add_provider(transform.clone());

        let mut renderer = Container::new();
        renderer.add_provider(camera);

        Self {
            root: Container::new(),
            renderer,
            target,
            material,
            transform,
            texture_index: 0,
        }
    }

    pub fn scopes(&self) -> DataScopes<'_> {
        DataScopes::new(&self.root, &self.renderer, &self.target)
    }

    /// Template variables of the cube's draw call.
    pub fn variables(&self) -> Variables {
        let mut variables = Variables::new();
        variables.insert("geometryUuid".to_string(), CUBE_UUID.to_string());
        variables
    }

    /// Rotate the cube around Y. Written in place; bound draw calls see it.
    pub fn set_rotation(&self, angle: f32) {
        self.transform
            .write()
            .set("transform.modelToWorldMatrix", math::mat4_from_rotation_y(angle));
    }

    /// Switch the diffuse map to the next texture. Returns the new texture.
    pub fn swap_texture(&mut self) -> TextureId {
        self.texture_index = (self.texture_index + 1) % TEXTURES.len();
        let texture = TEXTURES[self.texture_index];
        self.material
            .write()
            .set("material.diffuseMap", TextureSampler::new(texture));
        texture
    }
}

/// The unlit textured pass used to draw the cube.
pub fn textured_pass() -> Pass {
    let inputs = ProgramInputs::new()
        .with_uniform("diffuseColor", InputType::Float4, 0)
        .with_uniform("modelToWorldMatrix", InputType::Float16, 1)
        .with_uniform("worldToScreenMatrix", InputType::Float16, 2)
        .with_uniform("diffuseMap", InputType::Sampler2d, 3)
        .with_attribute("position", InputType::Float3, 0)
        .with_attribute("uv", InputType::Float2, 1);
    let program = Program::new(ProgramId(1), inputs).with_label("unlit textured");

    Pass::new("unlit", Arc::new(program))
        .with_attribute_bindings(
            BindingMap::new()
                .with("position", Binding::target("geometry[${geometryUuid}].position"))
                .with("uv", Binding::target("geometry[${geometryUuid}].uv")),
        )
        .with_uniform_bindings(
            BindingMap::new()
                .with("diffuseColor", Binding::target("material.diffuseColor"))
                .with("diffuseMap", Binding::target("material.diffuseMap"))
                .with("modelToWorldMatrix", Binding::target("transform.modelToWorldMatrix"))
                .with("worldToScreenMatrix", Binding::renderer("camera.worldToScreenMatrix")),
        )
        .with_states(States::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_graphics::{ContextCommand, DrawCall, DrawCallLimits, RecordingContext};

    #[test]
    fn test_swap_is_visible_without_rebind() {
        let mut scene = CubeScene::new(16.0 / 9.0);
        let pass = textured_pass();
        let mut draw_call = DrawCall::for_pass(&pass, scene.variables(), DrawCallLimits::default());
        draw_call.bind_pass(&pass, scene.scopes()).unwrap();

        let texture = scene.swap_texture();
        assert_eq!(texture, TEXTURES[1]);
        scene.set_rotation(0.5);

        let mut context = RecordingContext::new();
        draw_call.render(&mut context, None).unwrap();
        assert!(context.commands().contains(&ContextCommand::Texture {
            position: 0,
            texture: TEXTURES[1],
            location: 3,
        }));
        assert!(context.commands().contains(&ContextCommand::UniformMatrix4x4(
            1,
            math::mat4_to_array(&math::mat4_from_rotation_y(0.5))
        )));
    }
}
