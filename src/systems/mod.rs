//! Application systems
//!
//! Window, rendering and per-frame simulation, kept out of main.rs so they can be tested.

mod render;
mod simulation;
mod window;

pub use render::RenderSystem;
pub use simulation::{step_world, SimulationResult, SimulationSystem};
pub use window::{WindowError, WindowSystem};
