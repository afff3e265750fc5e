//! Frame simulation system
//!
//! Runs the per-redraw update:
//! - Delta time calculation for camera movement
//! - Camera controller update
//! - Carrying the held marble
//! - One physics step and transform sync

use std::time::Instant;
use marbles_core::World;
use marbles_input::CameraController;
use marbles_render::Camera;

use crate::interaction::InteractionController;

/// Result of a simulation update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationResult {
    /// Seconds since the previous frame (capped)
    pub dt: f32,
    /// Whether the physics world advanced this frame
    pub stepped: bool,
}

/// Drives one frame of the demo
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    /// Longest frame time fed to the camera controller
    pub const MAX_DT: f32 = 0.25;

    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Run one simulation frame
    ///
    /// `running` is `None` while the physics world is unavailable; the camera
    /// still moves but nothing is stepped.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        controller: &mut CameraController,
        running: Option<(&mut World, &mut InteractionController)>,
    ) -> SimulationResult {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(Self::MAX_DT);
        self.last_frame = now;

        controller.update(camera, dt);

        let stepped = match running {
            Some((world, interaction)) => {
                step_world(world, interaction, camera);
                true
            }
            None => false,
        };

        SimulationResult { dt, stepped }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Carry, then advance physics by exactly one fixed step and copy poses onto meshes
pub fn step_world(world: &mut World, interaction: &mut InteractionController, camera: &Camera) {
    interaction.carry(world, camera);
    world.update();
}
