//! Object interaction
//!
//! Picking, dropping, carrying, throwing and respawning marbles.

mod controller;
mod respawn;

pub use controller::{
    InteractionController, Selection, DEFAULT_CARRY_DISTANCE, DEFAULT_MARBLE_RADIUS,
    DEFAULT_THROW_STRENGTH,
};
pub use respawn::{random_marble_material, spawn_points, RespawnQueue, SpawnPoint, MARBLE_ROUGHNESS};
