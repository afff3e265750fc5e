//! Rigid-body physics for Marbles
//!
//! This crate wraps `rapier3d` behind a small adapter so the rest of the
//! workspace never touches rapier's body/collider sets directly:
//! - Fixed and dynamic rigid bodies
//! - Sphere and cuboid colliders with friction/restitution materials
//! - Fixed-timestep stepping
//! - Per-body pose queries, enable/disable, impulses and velocity resets

pub mod convert;
pub mod error;
pub mod material;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use error::PhysicsError;
pub use material::PhysicsMaterial;
pub use shapes::ColliderShape;
pub use world::{PhysicsConfig, PhysicsWorld, Pose, DEFAULT_GRAVITY, DEFAULT_TIMESTEP};

pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};
