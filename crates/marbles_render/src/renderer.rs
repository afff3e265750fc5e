//! Scene renderer - bridges the scene graph to GPU buffers
//!
//! Geometry is tessellated and uploaded once per [`NodeKey`]. Uniforms are
//! rewritten only for nodes whose transform or material changed, and buffers
//! belonging to nodes no longer in the scene are dropped.

use std::collections::HashMap;

use glam::Vec3;
use marbles_core::{DirtyFlags, Light, MeshNode, MeshShape, NodeKey, Scene};

use crate::camera::Camera;
use crate::error::RenderError;
use crate::geometry::MeshData;
use crate::pipeline::{DrawCall, MeshPipeline, ObjectUniforms, SceneUniforms};

/// GPU resources for one mesh node
struct GpuMesh {
    shape: MeshShape,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// What a node needs before it can be drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeSync {
    /// No buffers yet, or the shape changed
    Upload,
    /// Buffers are current but uniforms are stale
    Refresh,
    /// Nothing to do
    Keep,
}

fn classify(node: &MeshNode, cached: Option<&MeshShape>) -> NodeSync {
    match cached {
        Some(shape) if *shape == node.shape => {
            if node
                .dirty_flags()
                .intersects(DirtyFlags::TRANSFORM | DirtyFlags::MATERIAL)
            {
                NodeSync::Refresh
            } else {
                NodeSync::Keep
            }
        }
        _ => NodeSync::Upload,
    }
}

/// Draws a [`Scene`] through the [`MeshPipeline`]
pub struct SceneRenderer {
    pipeline: MeshPipeline,
    meshes: HashMap<NodeKey, GpuMesh>,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            pipeline: MeshPipeline::new(device, surface_format),
            meshes: HashMap::new(),
        }
    }

    /// Resize the depth buffer
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.pipeline.ensure_depth_texture(device, width, height);
    }

    /// Bring GPU buffers in line with the scene and upload frame uniforms
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene, camera: &Camera) {
        let before = self.meshes.len();
        self.meshes.retain(|key, _| scene.contains(*key));
        let dropped = before - self.meshes.len();
        if dropped > 0 {
            log::debug!("Dropped GPU buffers for {} removed nodes", dropped);
        }

        // New nodes start dirty, so a clean scene only needs the removals above
        if scene.has_dirty_nodes() {
            for (key, node) in scene.iter() {
                match classify(node, self.meshes.get(&key).map(|m| &m.shape)) {
                    NodeSync::Upload => {
                        let mesh = self.upload(device, node);
                        self.meshes.insert(key, mesh);
                    }
                    NodeSync::Refresh => {
                        if let Some(mesh) = self.meshes.get(&key) {
                            let uniforms = ObjectUniforms::new(node.transform.matrix(), node.material());
                            queue.write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
                        }
                    }
                    NodeSync::Keep => {}
                }
            }
        }

        self.pipeline
            .update_scene_uniforms(queue, &scene_uniforms(scene, camera));
    }

    fn upload(&self, device: &wgpu::Device, node: &MeshNode) -> GpuMesh {
        use wgpu::util::DeviceExt;

        let data = MeshData::from_shape(&node.shape);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniforms = ObjectUniforms::new(node.transform.matrix(), node.material());
        let (uniform_buffer, bind_group) = self.pipeline.create_object_binding(device, &uniforms);

        log::debug!(
            "Uploaded {:?} ({} vertices, {} triangles)",
            node.name.as_deref().unwrap_or("unnamed"),
            data.vertex_count(),
            data.triangle_count()
        );

        GpuMesh {
            shape: node.shape,
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    /// Record the mesh pass for every cached node into `encoder`
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        scene: &Scene,
    ) -> Result<(), RenderError> {
        let bg = scene.background;
        let clear = wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        };
        let draws = self.meshes.values().map(|mesh| DrawCall {
            vertex_buffer: &mesh.vertex_buffer,
            index_buffer: &mesh.index_buffer,
            index_count: mesh.index_count,
            bind_group: &mesh.bind_group,
        });
        self.pipeline.render(encoder, view, clear, draws)
    }
}

/// Camera matrices plus the key light and ambient terms of the scene
pub fn scene_uniforms(scene: &Scene, camera: &Camera) -> SceneUniforms {
    let (light_position, light_color) = match scene.key_light() {
        Some(Light::Directional { color, intensity, position }) => {
            (*position, color.map(|c| c * intensity))
        }
        _ => (Vec3::Y, [0.0; 3]),
    };
    SceneUniforms::new(
        camera.view_projection(),
        camera.position,
        light_position,
        light_color,
        scene.ambient(),
    )
}
