//! CPU-side mesh tessellation
//!
//! Meshes are generated once per node and uploaded to the GPU by the renderer.

mod plane;
mod sphere;

pub use plane::plane;
pub use sphere::uv_sphere;

use marbles_core::MeshShape;

use crate::pipeline::Vertex;

/// Indexed triangle list in local space
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    /// Counter-clockwise triangles (front faces point outward)
    pub indices: Vec<u32>,
}

impl MeshData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Tessellate a mesh shape
    pub fn from_shape(shape: &MeshShape) -> Self {
        match *shape {
            MeshShape::Sphere { radius, segments, rings } => uv_sphere(radius, segments, rings),
            MeshShape::Plane { width, depth } => plane(width, depth),
        }
    }
}
