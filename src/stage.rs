//! Application stage
//!
//! Interaction needs a live physics world. Until one exists (or after it failed
//! to initialise) pick, drop, throw and respawn are ignored.

use marbles_core::{PhysicsError, PhysicsWorld, Scene, Vec2, World};
use marbles_input::InputAction;
use marbles_render::Camera;

use crate::config::AppConfig;
use crate::interaction::InteractionController;
use crate::scene::SceneBuilder;

/// Whether the physics world is ready to receive input
pub enum Stage {
    /// Window and physics not created yet
    Loading,
    /// Physics is live and the controller receives input
    Running {
        world: World,
        interaction: InteractionController,
    },
    /// Physics failed to initialise; the scene is drawn but input is ignored
    Failed { scene: Scene },
}

impl Stage {
    /// Create the physics world from config and build the demo scene on it
    pub fn init(config: &AppConfig) -> Self {
        Self::from_physics(config, PhysicsWorld::new(config.physics.to_physics_config()))
    }

    /// Build the demo scene on the outcome of physics initialisation
    ///
    /// Falls back to a visual-only scene when physics is unavailable.
    pub fn from_physics(config: &AppConfig, physics: Result<PhysicsWorld, PhysicsError>) -> Self {
        let physics = match physics {
            Ok(physics) => physics,
            Err(e) => {
                log::error!("Physics initialisation failed: {}. Interaction disabled.", e);
                return Stage::Failed {
                    scene: SceneBuilder::from_config(config).build_visual(),
                };
            }
        };

        match SceneBuilder::from_config(config).build(physics) {
            Ok(world) => {
                log::info!("Physics ready");
                let interaction = InteractionController::from_config(&config.interaction, &config.physics);
                Stage::Running { world, interaction }
            }
            Err(e) => {
                log::error!("Failed to build physics scene: {}. Interaction disabled.", e);
                Stage::Failed {
                    scene: SceneBuilder::from_config(config).build_visual(),
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Stage::Running { .. })
    }

    /// World and controller while running
    pub fn running_mut(&mut self) -> Option<(&mut World, &mut InteractionController)> {
        match self {
            Stage::Running { world, interaction } => Some((world, interaction)),
            _ => None,
        }
    }

    /// The scene to draw, if there is one yet
    pub fn scene(&self) -> Option<&Scene> {
        match self {
            Stage::Running { world, .. } => Some(world.scene()),
            Stage::Failed { scene } => Some(scene),
            Stage::Loading => None,
        }
    }

    /// Mark every node clean once its uniforms are uploaded
    pub fn clear_dirty(&mut self) {
        match self {
            Stage::Running { world, .. } => world.scene_mut().clear_all_dirty(),
            Stage::Failed { scene } => scene.clear_all_dirty(),
            Stage::Loading => {}
        }
    }

    /// Short hint shown in the window title
    pub fn status(&self) -> &'static str {
        match self {
            Stage::Loading => "Loading",
            Stage::Failed { .. } => "Physics unavailable",
            Stage::Running { interaction, .. } if interaction.is_holding() => {
                "Space to throw, click to drop"
            }
            Stage::Running { .. } => "Click a marble to pick it up",
        }
    }

    /// Forward an interaction action to the controller
    ///
    /// Only `Select`, `Throw` and `Respawn` are handled, and only while running.
    /// `ndc` is the pointer position, `None` when unknown.
    pub fn dispatch(&mut self, action: InputAction, camera: &Camera, ndc: Option<Vec2>) {
        let Stage::Running { world, interaction } = self else {
            log::debug!("{:?} ignored: physics not running", action);
            return;
        };

        match action {
            InputAction::Select => match ndc {
                Some(ndc) => interaction.select(world, camera, ndc),
                None => log::debug!("Select ignored: pointer position unknown"),
            },
            InputAction::Throw => {
                interaction.throw(world, camera);
            }
            InputAction::Respawn => {
                interaction.respawn(world);
            }
            _ => {}
        }
    }
}
