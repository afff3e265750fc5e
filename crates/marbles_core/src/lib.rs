//! Core types for the Marbles demo
//!
//! This crate provides the foundational types for building the demo scene:
//!
//! - [`Transform`] - Position, rotation, and scale in 3D space
//! - [`Material`] - Visual properties of a mesh
//! - [`MeshNode`] - A visual object in the scene graph
//! - [`Scene`] - Scene graph of meshes and lights
//! - [`Ray`] - Ray with sphere intersection, used for picking
//! - [`World`] - Scene plus physics, owning every physics object
//! - [`ObjectKey`] - Generational key to a physics object

mod transform;
mod material;
mod mesh;
mod scene;
mod ray;
mod world;

pub use transform::Transform;
pub use material::{hex_to_rgb, Material, Shading};
pub use mesh::{DirtyFlags, MeshNode, MeshShape};
pub use scene::{Light, NodeKey, Scene};
pub use ray::Ray;
pub use world::{MarbleDesc, ObjectKey, PhysicsObject, SpawnId, World, WorldError};

// Re-export commonly used types from glam for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};

// Re-export physics types for convenient access through marbles_core
pub use marbles_physics::{
    ColliderShape, PhysicsConfig, PhysicsError, PhysicsMaterial, PhysicsWorld, Pose,
    RigidBodyHandle,
};
