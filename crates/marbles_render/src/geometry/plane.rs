//! Horizontal plane facing +Y

use super::MeshData;
use crate::pipeline::Vertex;

/// Generate a `width` x `depth` quad in the XZ plane, centered on the origin
pub fn plane(width: f32, depth: f32) -> MeshData {
    let hw = width / 2.0;
    let hd = depth / 2.0;
    let up = [0.0, 1.0, 0.0];

    let vertices = vec![
        Vertex::new([-hw, 0.0, -hd], up),
        Vertex::new([hw, 0.0, -hd], up),
        Vertex::new([hw, 0.0, hd], up),
        Vertex::new([-hw, 0.0, hd], up),
    ];
    let indices = vec![0, 2, 1, 0, 3, 2];

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_plane_extent() {
        let mesh = plane(100.0, 40.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        for v in &mesh.vertices {
            assert_eq!(v.position[0].abs(), 50.0);
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.position[2].abs(), 20.0);
        }
    }

    #[test]
    fn test_plane_faces_up() {
        let mesh = plane(2.0, 2.0);
        for tri in mesh.indices.chunks(3) {
            let a = Vec3::from(mesh.vertices[tri[0] as usize].position);
            let b = Vec3::from(mesh.vertices[tri[1] as usize].position);
            let c = Vec3::from(mesh.vertices[tri[2] as usize].position);
            assert!((b - a).cross(c - a).y > 0.0);
        }
    }
}
