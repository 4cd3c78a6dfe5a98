// Scene packing into GPU records.

use glam::Vec3;
use lounge_core::constants::CLEAR_COLOR;
use lounge_core::{Camera, Category, Connector, Light, Scene, SceneObject, Shape, Style};
use lounge_gfx::packing::{
    build_batches, connector_vertices, Globals, Instance, LineVertex, MeshPass,
};
use lounge_gfx::PostUniforms;
use std::time::Duration;

fn object(shape: Shape, category: Category) -> SceneObject {
    SceneObject::new(shape, category, Style::hex(0x00ffcc, 0.5), 1.0, Vec3::ZERO)
}

#[test]
fn uniform_layouts_match_the_shaders() {
    assert_eq!(std::mem::size_of::<Globals>(), 304);
    assert_eq!(std::mem::size_of::<Instance>(), 96);
    assert_eq!(std::mem::size_of::<LineVertex>(), 28);
    assert_eq!(std::mem::size_of::<PostUniforms>(), 32);
}

#[test]
fn batches_group_by_pipeline_and_shape() {
    let cube = Shape::Cube;
    let ico = Shape::Icosahedron { detail: 1 };
    let objects = vec![
        object(ico, Category::Wireframe),
        object(cube, Category::Solid),
        object(ico, Category::Wireframe),
        object(ico, Category::Shader),
        object(cube, Category::Solid),
    ];
    let mut instances = Vec::new();
    let mut batches = Vec::new();
    build_batches(&objects, &mut instances, &mut batches);

    assert_eq!(instances.len(), objects.len());
    assert_eq!(batches.len(), 3);
    // lit before wire
    assert_eq!(batches[0].pass, MeshPass::Lit);
    assert_eq!(batches[0].shape, cube);
    assert_eq!(batches[0].instances, 0..2);
    assert_eq!(batches[1].pass, MeshPass::Lit);
    assert_eq!(batches[1].instances, 2..3);
    assert_eq!(instances[2].material[1], 1.0);
    assert_eq!(batches[2].pass, MeshPass::Wire);
    assert_eq!(batches[2].instances, 3..5);
}

#[test]
fn connector_alpha_tracks_its_fade() {
    let mut c = Connector::new(Vec3::ZERO, Vec3::X, [0.0, 1.0, 0.8], Duration::from_secs(4));
    c.age = Duration::from_secs(1);
    let mut out = Vec::new();
    connector_vertices(&[c], &mut out);
    assert_eq!(out.len(), 2);
    assert!((out[0].color[3] - 0.75).abs() < 1e-6);
    assert_eq!(out[1].position, [1.0, 0.0, 0.0]);
}

#[test]
fn globals_carry_lights_and_shader_inputs() {
    let mut scene = Scene::new(Camera::default(), CLEAR_COLOR);
    scene.lights.push(Light {
        position: Vec3::new(0.0, 0.0, 6.0),
        color: [1.0, 0.5, 0.25],
        intensity: 3.0,
    });
    scene.shader.time = 2.5;
    scene.shader.level = 0.4;
    let g = Globals::from_scene(&scene, 16.0 / 9.0);
    assert_eq!(g.light_pos[0], [0.0, 0.0, 6.0, 3.0]);
    assert_eq!(g.light_color[0], [1.0, 0.5, 0.25, 1.0]);
    // missing second light contributes nothing
    assert_eq!(g.light_pos[1][3], 0.0);
    assert_eq!(g.params[0], 2.5);
    assert_eq!(g.params[1], 0.4);
    assert_eq!(g.camera_pos, [0.0, 0.0, 12.0, 1.0]);
}
