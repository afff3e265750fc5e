//! GPU-compatible data types for the mesh pipeline
//!
//! These types are designed to match the shader layouts in `scene.wgsl` exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use marbles_core::{Material, Shading};

/// A mesh vertex in local space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Per-frame camera and lighting uniforms
/// Layout: 128 bytes total (must match scene.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// Camera position + padding (16 bytes)
    pub camera_position: [f32; 3],
    pub _padding0: f32,
    /// Unit direction from the surface toward the key light + padding (16 bytes)
    pub light_direction: [f32; 3],
    pub _padding1: f32,
    /// Key light color premultiplied by intensity + padding (16 bytes)
    pub light_color: [f32; 3],
    pub _padding2: f32,
    /// Ambient color premultiplied by intensity + padding (16 bytes)
    pub ambient: [f32; 3],
    pub _padding3: f32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_position: [0.0; 3],
            _padding0: 0.0,
            light_direction: [0.0, 1.0, 0.0],
            _padding1: 0.0,
            light_color: [1.0; 3],
            _padding2: 0.0,
            ambient: [0.3; 3],
            _padding3: 0.0,
        }
    }
}

impl SceneUniforms {
    /// Build uniforms from camera matrices and light terms
    ///
    /// `light_position` is where the directional light sits; it shines toward
    /// the origin, so the surface-to-light direction is the normalized position.
    pub fn new(
        view_proj: Mat4,
        camera_position: Vec3,
        light_position: Vec3,
        light_color: [f32; 3],
        ambient: [f32; 3],
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.to_array(),
            light_direction: light_position.normalize_or(Vec3::Y).to_array(),
            light_color,
            ambient,
            ..Default::default()
        }
    }
}

/// Per-mesh uniforms
/// Layout: 96 bytes total (must match scene.wgsl ObjectUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Local to world (64 bytes)
    pub model: [[f32; 4]; 4],
    /// RGBA base color (16 bytes)
    pub color: [f32; 4],
    /// x: 1.0 when unlit, y: roughness, zw: unused (16 bytes)
    pub params: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model: Mat4, material: &Material) -> Self {
        let (unlit, roughness) = match material.shading {
            Shading::Standard { roughness } => (0.0, roughness),
            Shading::Unlit => (1.0, 1.0),
        };
        Self {
            model: model.to_cols_array_2d(),
            color: material.base_color,
            params: [unlit, roughness, 0.0, 0.0],
        }
    }
}
