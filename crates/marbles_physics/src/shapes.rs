//! Collision shapes understood by the physics adapter

use glam::Vec3;
use rapier3d::prelude::{ColliderBuilder, SharedShape};
use serde::{Deserialize, Serialize};

/// Collision geometry attached to a rigid body
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// A sphere centered on the body origin
    Ball { radius: f32 },
    /// A box centered on the body origin
    Cuboid { half_extents: Vec3 },
}

impl ColliderShape {
    /// Create a sphere shape
    pub fn ball(radius: f32) -> Self {
        Self::Ball { radius }
    }

    /// Create a box shape from its half extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Cuboid {
            half_extents: Vec3::new(hx, hy, hz),
        }
    }

    /// Radius of the smallest sphere around the body origin containing the shape
    pub fn bounding_radius(&self) -> f32 {
        match self {
            ColliderShape::Ball { radius } => *radius,
            ColliderShape::Cuboid { half_extents } => half_extents.length(),
        }
    }

    /// Convert to rapier's shared shape
    pub fn to_shared_shape(&self) -> SharedShape {
        match *self {
            ColliderShape::Ball { radius } => SharedShape::ball(radius),
            ColliderShape::Cuboid { half_extents } => {
                SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        }
    }

    /// Start a rapier collider builder for this shape
    pub(crate) fn builder(&self) -> ColliderBuilder {
        ColliderBuilder::new(self.to_shared_shape())
    }
}
