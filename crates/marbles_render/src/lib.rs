//! Rendering for the Marbles demo
//!
//! This crate provides the wgpu-based forward renderer that draws the scene
//! graph from `marbles_core`.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - Perspective camera with yaw/pitch look and picking rays
//! - [`pipeline::MeshPipeline`] - Lit/unlit mesh pipeline with depth testing
//! - [`renderer::SceneRenderer`] - Keeps per-node GPU buffers in step with the scene
//! - [`geometry`] - CPU-side sphere and plane tessellation

pub mod context;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod renderer;

pub use camera::Camera;
pub use error::RenderError;
pub use renderer::SceneRenderer;

// Re-export core types for convenience
pub use marbles_core::{Light, Material, MeshNode, MeshShape, NodeKey, Scene};
