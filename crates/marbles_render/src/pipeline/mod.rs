//! Rendering pipeline components

pub mod types;
pub mod mesh_pipeline;

pub use types::{ObjectUniforms, SceneUniforms, Vertex};
pub use mesh_pipeline::{DrawCall, MeshPipeline, DEPTH_FORMAT};
