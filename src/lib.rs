//! Marbles - an interactive physics demo
//!
//! Click a marble to pick it up, Space throws it along the view direction,
//! Enter respawns the oldest thrown marble.

pub mod config;
pub mod interaction;
pub mod scene;
pub mod stage;
pub mod systems;
