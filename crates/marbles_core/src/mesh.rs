//! Mesh nodes
//!
//! A MeshNode is a visual object in the scene graph with a transform, shape, and material.

use std::sync::Arc;

use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Material, Transform};

bitflags! {
    /// Flags indicating which parts of a mesh node have changed and need updating
    ///
    /// The renderer uses these to avoid rebuilding GPU buffers for nodes whose
    /// geometry has not changed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Mesh/shape has changed
        const MESH = 1 << 1;
        /// Material has changed
        const MATERIAL = 1 << 2;
        /// All flags set - node needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::MATERIAL.bits();
    }
}

/// Geometry of a mesh node, in local space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MeshShape {
    /// UV sphere centered on the origin
    Sphere {
        radius: f32,
        /// Horizontal segments around the equator
        segments: u32,
        /// Vertical rings from pole to pole
        rings: u32,
    },
    /// Horizontal plane (XZ), facing +Y, centered on the origin
    Plane { width: f32, depth: f32 },
}

impl MeshShape {
    /// Sphere with the tessellation used for marbles
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere {
            radius,
            segments: 32,
            rings: 32,
        }
    }

    /// Square plane
    pub fn plane(size: f32) -> Self {
        Self::Plane {
            width: size,
            depth: size,
        }
    }

    /// Radius of a sphere around the local origin that contains the shape
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            MeshShape::Sphere { radius, .. } => radius,
            MeshShape::Plane { width, depth } => Vec3::new(width, 0.0, depth).length() / 2.0,
        }
    }
}

/// A visual object in the scene
///
/// Each node has:
/// - An optional name (used in logs)
/// - A transform (position, rotation, scale)
/// - A shape (the geometry)
/// - A shared material
/// - Dirty flags (for change tracking)
#[derive(Clone, Debug)]
pub struct MeshNode {
    /// Optional name for this node
    pub name: Option<String>,
    /// The node's transform in world space
    pub transform: Transform,
    /// The node's shape
    pub shape: MeshShape,
    material: Arc<Material>,
    dirty: DirtyFlags,
}

impl MeshNode {
    /// Create a new node with the given shape and material
    pub fn new(shape: MeshShape, material: Arc<Material>) -> Self {
        Self {
            name: None,
            transform: Transform::identity(),
            shape,
            material,
            dirty: DirtyFlags::ALL, // New nodes are dirty
        }
    }

    /// Set the name of this node
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// The node's current material
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Replace the material, returning the previous one
    pub fn set_material(&mut self, material: Arc<Material>) -> Arc<Material> {
        self.mark_dirty(DirtyFlags::MATERIAL);
        std::mem::replace(&mut self.material, material)
    }

    /// Set the transform and mark it as dirty
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.mark_dirty(DirtyFlags::TRANSFORM);
    }

    /// World-space bounding sphere (center, radius)
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        (
            self.transform.position,
            self.shape.bounding_radius() * self.transform.scale,
        )
    }

    // --- Dirty tracking methods ---

    /// Check if this node has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this node as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marble() -> MeshNode {
        MeshNode::new(MeshShape::sphere(0.5), Arc::new(Material::GREEN_MARBLE))
    }

    #[test]
    fn test_new_node_is_dirty() {
        let node = marble();
        assert!(node.is_dirty());
        assert_eq!(node.dirty_flags(), DirtyFlags::ALL);
    }

    #[test]
    fn test_builder() {
        let node = marble()
            .with_name("marble")
            .with_transform(Transform::from_position(Vec3::new(0.0, 5.0, 0.0)));

        assert_eq!(node.name.as_deref(), Some("marble"));
        assert_eq!(node.transform.position.y, 5.0);
    }

    #[test]
    fn test_set_material_returns_previous() {
        let original = Arc::new(Material::GREEN_MARBLE);
        let mut node = MeshNode::new(MeshShape::sphere(0.5), original.clone());
        node.clear_dirty();

        let previous = node.set_material(Arc::new(Material::HIGHLIGHT));
        assert!(Arc::ptr_eq(&previous, &original));
        assert!(node.dirty_flags().contains(DirtyFlags::MATERIAL));
        assert_eq!(**node.material(), Material::HIGHLIGHT);
    }

    #[test]
    fn test_set_transform_marks_dirty() {
        let mut node = marble();
        node.clear_dirty();
        node.set_transform(Transform::from_position(Vec3::ONE));
        assert_eq!(node.dirty_flags(), DirtyFlags::TRANSFORM);
    }

    #[test]
    fn test_bounding_sphere() {
        let mut node = marble().with_transform(Transform::from_position(Vec3::Y));
        node.transform.scale = 2.0;
        assert_eq!(node.bounding_sphere(), (Vec3::Y, 1.0));

        let plane = MeshShape::plane(100.0);
        assert!((plane.bounding_radius() - 70.710678).abs() < 1e-3);
    }
}
