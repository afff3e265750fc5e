//! Spawn points and the pending respawn queue

use std::collections::VecDeque;

use glam::Vec3;
use marbles_core::{Material, SpawnId};
use rand::Rng;

/// Roughness shared by every marble material
pub const MARBLE_ROUGHNESS: f32 = 0.8;

/// A fixed location marbles are created at, and recreated at on respawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    pub id: SpawnId,
    pub position: Vec3,
}

/// Number spawn coordinates in order, starting at zero
pub fn spawn_points(positions: &[[f32; 3]]) -> Vec<SpawnPoint> {
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| SpawnPoint {
            id: SpawnId(i as u32),
            position: Vec3::from_array(*p),
        })
        .collect()
}

/// A lit marble material with a random color
pub fn random_marble_material<R: Rng + ?Sized>(rng: &mut R) -> Material {
    Material::standard(rng.gen(), rng.gen(), rng.gen(), MARBLE_ROUGHNESS)
}

/// Thrown marbles waiting to be replaced, oldest first
///
/// Capacity is unbounded and the same id may be queued more than once.
#[derive(Clone, Debug, Default)]
pub struct RespawnQueue {
    pending: VecDeque<SpawnId>,
}

impl RespawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: SpawnId) {
        self.pending.push_back(id);
    }

    /// Take the oldest pending id
    pub fn pop(&mut self) -> Option<SpawnId> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnId> {
        self.pending.iter()
    }
}
