//! Input handling for Marbles
//!
//! Maps raw winit events to semantic actions, tracks the pointer in
//! normalized device coordinates, and drives a free-look camera.

mod camera_controller;
mod input_mapper;
mod pointer;

pub use camera_controller::{CameraControl, CameraController};
pub use input_mapper::{InputAction, InputMapper};
pub use pointer::Pointer;
