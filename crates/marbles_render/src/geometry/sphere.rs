//! UV sphere
//!
//! Vertices are laid out ring by ring from the north pole (+Y) to the south
//! pole, with a duplicated seam column so every ring has `segments + 1` vertices.

use std::f32::consts::{PI, TAU};

use super::MeshData;
use crate::pipeline::Vertex;

/// Generate a UV sphere centered on the origin
///
/// `segments` and `rings` are raised to the minimum of 3 and 2 respectively.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for i in 0..=rings {
        let theta = i as f32 * PI / rings as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for j in 0..=segments {
            let phi = j as f32 * TAU / segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let normal = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(Vertex::new(
                [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
            ));
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for i in 0..rings {
        for j in 0..segments {
            let a = i * stride + j;
            let b = a + stride;
            let c = a + 1;
            let d = b + 1;
            // Skip the degenerate triangle at each pole
            if i != 0 {
                indices.extend_from_slice(&[a, c, b]);
            }
            if i != rings - 1 {
                indices.extend_from_slice(&[c, d, b]);
            }
        }
    }

    MeshData { vertices, indices }
}
