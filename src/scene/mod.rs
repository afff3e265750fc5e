//! Scene construction utilities
//!
//! Declarative construction of the demo scene.

mod scene_builder;

pub use scene_builder::SceneBuilder;
