//! Physics world and simulation

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use crate::convert::{glam_quat_from_na, glam_vec_from_na, na_vector_from_glam};
use crate::error::PhysicsError;
use crate::material::PhysicsMaterial;
use crate::shapes::ColliderShape;

/// Default gravity (applied to the Y axis, negative = down)
pub const DEFAULT_GRAVITY: f32 = -9.81;

/// Default fixed timestep in seconds
pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity acceleration (applied to Y-axis, negative = down)
    pub gravity: f32,
    /// Fixed timestep advanced by every call to [`PhysicsWorld::step`]
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            timestep: DEFAULT_TIMESTEP,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity and the default timestep
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            timestep: DEFAULT_TIMESTEP,
        }
    }

    /// Set the fixed timestep
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(PhysicsError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        Ok(())
    }
}

/// Position and orientation of a rigid body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

/// The physics world containing all rigid bodies and colliders
///
/// A `PhysicsWorld` only exists once it has been successfully created, so
/// holding one means the simulation is ready for use.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    rigid_bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a physics world, validating the configuration first
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;

        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        log::info!(
            "Physics world initialized (gravity {}, timestep {:.4}s)",
            config.gravity,
            config.timestep
        );

        Ok(Self {
            gravity: vector![0.0, config.gravity, 0.0],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            config,
        })
    }

    /// Create a fixed (immovable) body at the given position
    pub fn create_fixed_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(na_vector_from_glam(position))
            .build();
        self.rigid_bodies.insert(body)
    }

    /// Create a dynamic body at the given position, affected by gravity and contacts
    pub fn create_dynamic_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(na_vector_from_glam(position))
            .build();
        self.rigid_bodies.insert(body)
    }

    /// Attach a collider with the given shape and material to a body
    pub fn attach_collider(
        &mut self,
        body: RigidBodyHandle,
        shape: ColliderShape,
        material: PhysicsMaterial,
    ) -> Result<ColliderHandle, PhysicsError> {
        if !self.rigid_bodies.contains(body) {
            return Err(PhysicsError::UnknownBody(body));
        }

        let collider = shape
            .builder()
            .restitution(material.restitution)
            .friction(material.friction)
            .build();

        Ok(self
            .colliders
            .insert_with_parent(collider, body, &mut self.rigid_bodies))
    }

    /// Remove a body together with every collider attached to it
    pub fn remove_body(&mut self, body: RigidBodyHandle) -> Result<(), PhysicsError> {
        self.rigid_bodies
            .remove(
                body,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .map(|_| ())
            .ok_or(PhysicsError::UnknownBody(body))
    }

    /// Advance the simulation by exactly one fixed timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Current position and orientation of a body
    pub fn pose(&self, body: RigidBodyHandle) -> Option<Pose> {
        self.rigid_bodies.get(body).map(|rb| Pose {
            translation: glam_vec_from_na(rb.translation()),
            rotation: glam_quat_from_na(rb.rotation()),
        })
    }

    /// Enable or disable simulation of a body
    ///
    /// A disabled body is skipped by gravity integration and collision
    /// detection but keeps its pose, so it can still be moved explicitly.
    pub fn set_enabled(&mut self, body: RigidBodyHandle, enabled: bool) -> Result<(), PhysicsError> {
        let rb = self.body_mut(body)?;
        rb.set_enabled(enabled);
        if enabled {
            rb.wake_up(true);
        }
        Ok(())
    }

    /// Whether a body takes part in the simulation
    pub fn is_enabled(&self, body: RigidBodyHandle) -> Option<bool> {
        self.rigid_bodies.get(body).map(|rb| rb.is_enabled())
    }

    /// Apply an instantaneous change of momentum
    pub fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec3) -> Result<(), PhysicsError> {
        self.body_mut(body)?
            .apply_impulse(na_vector_from_glam(impulse), true);
        Ok(())
    }

    /// Overwrite the linear and angular velocity of a body
    pub fn set_velocity(
        &mut self,
        body: RigidBodyHandle,
        linear: Vec3,
        angular: Vec3,
    ) -> Result<(), PhysicsError> {
        let rb = self.body_mut(body)?;
        rb.set_linvel(na_vector_from_glam(linear), true);
        rb.set_angvel(na_vector_from_glam(angular), true);
        Ok(())
    }

    /// Linear velocity of a body
    pub fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_bodies.get(body).map(|rb| glam_vec_from_na(rb.linvel()))
    }

    /// Angular velocity of a body
    pub fn angular_velocity(&self, body: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_bodies.get(body).map(|rb| glam_vec_from_na(rb.angvel()))
    }

    /// Teleport a body to a new position
    pub fn set_translation(&mut self, body: RigidBodyHandle, position: Vec3) -> Result<(), PhysicsError> {
        self.body_mut(body)?
            .set_translation(na_vector_from_glam(position), true);
        Ok(())
    }

    /// Check whether a handle refers to a live body
    pub fn contains_body(&self, body: RigidBodyHandle) -> bool {
        self.rigid_bodies.contains(body)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.rigid_bodies.len()
    }

    /// Get the number of colliders in the world
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn body_mut(&mut self, body: RigidBodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.rigid_bodies
            .get_mut(body)
            .ok_or(PhysicsError::UnknownBody(body))
    }
}
