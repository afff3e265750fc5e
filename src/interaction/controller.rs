//! Interaction controller
//!
//! Owns the selection state and the respawn queue. Every handler takes the
//! world and camera by reference and never fails from the caller's point of
//! view: physics errors are logged and the selection is left consistent.
//!
//! Selection state machine, per object:
//! - `Free -> Held` on a successful pick
//! - `Held -> Free` on drop or throw
//!
//! A held object's body is disabled and its mesh shows the highlight material.
//! Both are undone together when the object is released.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use marbles_core::{Material, MarbleDesc, ObjectKey, PhysicsMaterial, PhysicsObject, World};
use marbles_render::Camera;

use super::respawn::{random_marble_material, RespawnQueue, SpawnPoint};
use crate::config::{InteractionConfig, PhysicsConfig};

/// Default impulse magnitude for a throw
pub const DEFAULT_THROW_STRENGTH: f32 = 15.0;
/// Default distance a carried marble is held in front of the camera
pub const DEFAULT_CARRY_DISTANCE: f32 = 2.0;
/// Default marble radius
pub const DEFAULT_MARBLE_RADIUS: f32 = 0.5;

/// What the user is holding
#[derive(Clone, Debug, Default)]
pub enum Selection {
    #[default]
    Free,
    Held {
        object: ObjectKey,
        /// Material the mesh had before it was highlighted
        saved_material: Arc<Material>,
    },
}

impl Selection {
    pub fn is_free(&self) -> bool {
        matches!(self, Selection::Free)
    }

    /// Key of the held object, if any
    pub fn held(&self) -> Option<ObjectKey> {
        match self {
            Selection::Held { object, .. } => Some(*object),
            Selection::Free => None,
        }
    }
}

/// Maps pointer and key actions onto the world's physics objects
pub struct InteractionController {
    selection: Selection,
    respawn_queue: RespawnQueue,
    spawn_points: Vec<SpawnPoint>,
    highlight: Arc<Material>,
    /// Impulse magnitude applied along the camera's forward direction
    pub throw_strength: f32,
    /// Carry distance; `None` leaves the held body where it was picked
    pub carry_distance: Option<f32>,
    /// Queue thrown marbles for replacement
    pub respawn_enabled: bool,
    /// Radius of respawned marbles
    pub marble_radius: f32,
    /// Collision response of respawned marbles
    pub marble_material: PhysicsMaterial,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    /// Single-marble behavior: no carry, no respawn
    pub fn new() -> Self {
        Self {
            selection: Selection::Free,
            respawn_queue: RespawnQueue::new(),
            spawn_points: Vec::new(),
            highlight: Arc::new(Material::HIGHLIGHT),
            throw_strength: DEFAULT_THROW_STRENGTH,
            carry_distance: None,
            respawn_enabled: false,
            marble_radius: DEFAULT_MARBLE_RADIUS,
            marble_material: PhysicsMaterial::MARBLE,
        }
    }

    /// Build from configuration
    pub fn from_config(interaction: &InteractionConfig, physics: &PhysicsConfig) -> Self {
        let mut controller = Self::new()
            .with_throw_strength(interaction.throw_strength);
        controller.marble_radius = interaction.marble_radius;
        controller.marble_material = physics.marble_material();
        if interaction.carry_enabled {
            controller = controller.with_carry(interaction.carry_distance);
        }
        if interaction.respawn_enabled {
            controller = controller
                .with_respawn(super::respawn::spawn_points(&interaction.spawn_points));
        }
        controller
    }

    /// Builder: set throw strength
    pub fn with_throw_strength(mut self, strength: f32) -> Self {
        self.throw_strength = strength;
        self
    }

    /// Builder: keep the held marble `distance` in front of the camera
    pub fn with_carry(mut self, distance: f32) -> Self {
        self.carry_distance = Some(distance);
        self
    }

    /// Builder: enable the respawn queue for the given spawn points
    pub fn with_respawn(mut self, spawn_points: Vec<SpawnPoint>) -> Self {
        self.respawn_enabled = true;
        self.spawn_points = spawn_points;
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_holding(&self) -> bool {
        !self.selection.is_free()
    }

    pub fn held(&self) -> Option<ObjectKey> {
        self.selection.held()
    }

    /// Thrown marbles waiting for respawn, oldest first
    pub fn pending_respawns(&self) -> &RespawnQueue {
        &self.respawn_queue
    }

    /// The shared highlight material applied to held meshes
    pub fn highlight(&self) -> &Arc<Material> {
        &self.highlight
    }

    /// Primary click: drop what is held, otherwise try to pick
    pub fn select(&mut self, world: &mut World, camera: &Camera, ndc: Vec2) {
        if self.is_holding() {
            self.drop_held(world);
        } else {
            self.pick(world, camera, ndc);
        }
    }

    /// Pick the nearest object under `ndc`
    ///
    /// Does nothing while something is already held or when the ray hits nothing.
    pub fn pick(&mut self, world: &mut World, camera: &Camera, ndc: Vec2) -> Option<ObjectKey> {
        if self.is_holding() {
            return None;
        }

        let ray = camera.ray_from_ndc(ndc);
        let Some((key, t)) = world.raycast(&ray) else {
            log::debug!("Pick at ({:.2}, {:.2}) hit nothing", ndc.x, ndc.y);
            return None;
        };
        let object = *world.object(key)?;

        if let Err(e) = world.physics_mut().set_enabled(object.body(), false) {
            log::warn!("Cannot hold object: {}", e);
            return None;
        }

        let Some(node) = world.scene_mut().get_mut(object.node()) else {
            log::warn!("Picked object has no mesh");
            let _ = world.physics_mut().set_enabled(object.body(), true);
            return None;
        };
        let saved_material = node.set_material(self.highlight.clone());

        self.selection = Selection::Held {
            object: key,
            saved_material,
        };
        log::info!("Marble picked at distance {:.2}", t);
        Some(key)
    }

    /// Put the held object down where it is
    ///
    /// Returns false when nothing was held.
    pub fn drop_held(&mut self, world: &mut World) -> bool {
        match self.release(world) {
            Some(_) => {
                log::info!("Marble dropped");
                true
            }
            None => false,
        }
    }

    /// Throw the held object along the camera's view direction
    ///
    /// Returns the applied impulse, or `None` when nothing was held.
    pub fn throw(&mut self, world: &mut World, camera: &Camera) -> Option<Vec3> {
        let object = self.release(world)?;

        let impulse = camera.forward().normalize() * self.throw_strength;
        if let Err(e) = world.physics_mut().apply_impulse(object.body(), impulse) {
            log::warn!("Throw impulse not applied: {}", e);
        }

        if self.respawn_enabled {
            if let Some(spawn) = object.spawn() {
                self.respawn_queue.push(spawn);
                log::debug!("Queued {} for respawn ({} pending)", spawn, self.respawn_queue.len());
            }
        }

        log::info!(
            "Marble thrown with impulse ({:.2}, {:.2}, {:.2})",
            impulse.x,
            impulse.y,
            impulse.z
        );
        Some(impulse)
    }

    /// Replace the oldest thrown marble with a fresh one at its spawn point
    ///
    /// Does nothing when the queue is empty.
    pub fn respawn(&mut self, world: &mut World) -> Option<ObjectKey> {
        let Some(id) = self.respawn_queue.pop() else {
            log::debug!("Nothing to respawn");
            return None;
        };

        let Some(point) = self.spawn_points.iter().find(|p| p.id == id).copied() else {
            log::warn!("No spawn point for {}", id);
            return None;
        };

        if let Some(current) = world.find_by_spawn(id) {
            if self.held() == Some(current) {
                self.release(world);
            }
            if let Err(e) = world.despawn(current) {
                log::warn!("Failed to remove {}: {}", id, e);
            }
        }

        let material = Arc::new(random_marble_material(&mut rand::thread_rng()));
        let desc = MarbleDesc::new(format!("marble_{}", id.0), point.position, self.marble_radius, material)
            .with_physics_material(self.marble_material)
            .with_spawn(id);

        match world.spawn_marble(desc) {
            Ok(key) => {
                log::info!("Respawned {}", id);
                Some(key)
            }
            Err(e) => {
                log::error!("Failed to respawn {}: {}", id, e);
                None
            }
        }
    }

    /// Move the held body to the carry point in front of the camera
    ///
    /// Called once per frame before the physics step.
    pub fn carry(&mut self, world: &mut World, camera: &Camera) {
        let (Some(distance), Some(key)) = (self.carry_distance, self.held()) else {
            return;
        };
        let Some(object) = world.object(key).copied() else {
            self.selection = Selection::Free;
            return;
        };
        let target = camera.position + camera.forward() * distance;
        if let Err(e) = world.physics_mut().set_translation(object.body(), target) {
            log::warn!("Carry failed: {}", e);
        }
    }

    /// Clear the selection, restoring the material and re-enabling the body together
    ///
    /// With carrying on, velocity is zeroed first since the body was moved by hand.
    fn release(&mut self, world: &mut World) -> Option<PhysicsObject> {
        let Selection::Held { object: key, saved_material } =
            std::mem::take(&mut self.selection)
        else {
            return None;
        };

        // The object may have been removed while held
        let object = *world.object(key)?;

        if self.carry_distance.is_some() {
            if let Err(e) = world
                .physics_mut()
                .set_velocity(object.body(), Vec3::ZERO, Vec3::ZERO)
            {
                log::warn!("Velocity reset failed: {}", e);
            }
        }
        if let Err(e) = world.physics_mut().set_enabled(object.body(), true) {
            log::warn!("Re-enable failed: {}", e);
        }
        if let Some(node) = world.scene_mut().get_mut(object.node()) {
            node.set_material(saved_material);
        }

        Some(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use marbles_core::{PhysicsConfig as WorldPhysicsConfig, PhysicsWorld, Scene, SpawnId};

    use crate::interaction::spawn_points;

    /// Camera at (0, 5, 10) looking straight at a marble at (0, 5, 0)
    fn camera() -> Camera {
        Camera::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::new(0.0, 5.0, 0.0))
    }

    fn world_with_marble() -> (World, ObjectKey) {
        let physics = PhysicsWorld::new(WorldPhysicsConfig::default()).unwrap();
        let mut world = World::new(Scene::new(), physics);
        let key = world
            .spawn_marble(
                MarbleDesc::new("marble_0", Vec3::new(0.0, 5.0, 0.0), 0.5, Arc::new(Material::GREEN_MARBLE))
                    .with_spawn(SpawnId(0)),
            )
            .unwrap();
        // One step so mass properties and mesh transforms are current
        world.update();
        (world, key)
    }

    fn body(world: &World, key: ObjectKey) -> marbles_core::RigidBodyHandle {
        world.object(key).unwrap().body()
    }

    fn material(world: &World, key: ObjectKey) -> Arc<Material> {
        let node = world.object(key).unwrap().node();
        world.scene().get(node).unwrap().material().clone()
    }

    #[test]
    fn test_click_on_empty_space_stays_free() {
        let (mut world, _) = world_with_marble();
        let mut controller = InteractionController::new();
        controller.select(&mut world, &camera(), Vec2::new(0.9, 0.9));
        assert!(controller.selection().is_free());
        controller.select(&mut world, &camera(), Vec2::new(-0.9, -0.9));
        assert!(controller.selection().is_free());
    }

    #[test]
    fn test_pick_center_holds_marble() {
        let (mut world, key) = world_with_marble();
        let mut controller = InteractionController::new();

        let picked = controller.pick(&mut world, &camera(), Vec2::ZERO);
        assert_eq!(picked, Some(key));
        assert_eq!(controller.held(), Some(key));
        assert_eq!(world.physics().is_enabled(body(&world, key)), Some(false));
        assert!(Arc::ptr_eq(&material(&world, key), controller.highlight()));
        assert_eq!(material(&world, key).base_color, [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_pick_then_drop_restores_exact_material() {
        let (mut world, key) = world_with_marble();
        let original = material(&world, key);
        let mut controller = InteractionController::new();

        controller.select(&mut world, &camera(), Vec2::ZERO);
        assert!(controller.is_holding());
        controller.select(&mut world, &camera(), Vec2::new(0.9, 0.9));

        assert!(controller.selection().is_free());
        assert!(Arc::ptr_eq(&material(&world, key), &original));
        assert_eq!(world.physics().is_enabled(body(&world, key)), Some(true));
    }

    #[test]
    fn test_pick_then_throw_applies_forward_impulse() {
        let (mut world, key) = world_with_marble();
        let original = material(&world, key);
        let cam = camera();
        let mut controller = InteractionController::new();

        controller.pick(&mut world, &cam, Vec2::ZERO);
        let impulse = controller.throw(&mut world, &cam).unwrap();

        let expected = cam.forward().normalize() * 15.0;
        assert_relative_eq!(impulse.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(impulse.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(impulse.z, expected.z, epsilon = 1e-5);
        assert_relative_eq!(impulse.length(), 15.0, epsilon = 1e-4);

        assert!(controller.selection().is_free());
        assert_eq!(world.physics().is_enabled(body(&world, key)), Some(true));
        assert!(Arc::ptr_eq(&material(&world, key), &original));

        // The impulse shows up as velocity along -Z
        let velocity = world.physics().linear_velocity(body(&world, key)).unwrap();
        assert!(velocity.z < 0.0);
        assert_relative_eq!(velocity.normalize().dot(expected.normalize()), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_throw_in_any_direction_frees_selection() {
        for (yaw, pitch) in [(0.0, 0.0), (1.0, 0.5), (-2.0, -1.2), (3.0, 1.4)] {
            let (mut world, _) = world_with_marble();
            let mut cam = camera();
            let mut controller = InteractionController::new();
            controller.pick(&mut world, &cam, Vec2::ZERO);
            marbles_input::CameraControl::rotate(&mut cam, yaw, pitch);
            assert!(controller.throw(&mut world, &cam).is_some());
            assert!(controller.selection().is_free());
        }
    }

    #[test]
    fn test_throw_without_selection_is_noop() {
        let (mut world, key) = world_with_marble();
        let before = world.physics().linear_velocity(body(&world, key));
        let mut controller = InteractionController::new();
        assert_eq!(controller.throw(&mut world, &camera()), None);
        assert_eq!(world.physics().linear_velocity(body(&world, key)), before);
    }

    #[test]
    fn test_at_most_one_held() {
        let (mut world, first) = world_with_marble();
        let second = world
            .spawn_marble(MarbleDesc::new("other", Vec3::new(0.0, 5.0, -3.0), 0.5, Arc::new(Material::GREEN_MARBLE)))
            .unwrap();
        let mut controller = InteractionController::new();

        assert_eq!(controller.pick(&mut world, &camera(), Vec2::ZERO), Some(first));
        // A second pick while holding is refused
        assert_eq!(controller.pick(&mut world, &camera(), Vec2::ZERO), None);
        assert_eq!(controller.held(), Some(first));
        assert_eq!(world.physics().is_enabled(body(&world, second)), Some(true));

        let disabled = world
            .objects()
            .filter(|(_, o)| world.physics().is_enabled(o.body()) == Some(false))
            .count();
        assert_eq!(disabled, 1);
    }

    #[test]
    fn test_pick_takes_nearest_hit() {
        let (mut world, near) = world_with_marble();
        world
            .spawn_marble(MarbleDesc::new("far", Vec3::new(0.0, 5.0, -4.0), 0.5, Arc::new(Material::GREEN_MARBLE)))
            .unwrap();
        let mut controller = InteractionController::new();
        assert_eq!(controller.pick(&mut world, &camera(), Vec2::ZERO), Some(near));
    }

    #[test]
    fn test_carry_moves_held_body_in_front_of_camera() {
        let (mut world, key) = world_with_marble();
        let cam = camera();
        let mut controller = InteractionController::new().with_carry(2.0);

        controller.pick(&mut world, &cam, Vec2::ZERO);
        controller.carry(&mut world, &cam);

        let pose = world.physics().pose(body(&world, key)).unwrap();
        let expected = cam.position + cam.forward() * 2.0;
        assert_relative_eq!(pose.translation.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(pose.translation.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(pose.translation.z, expected.z, epsilon = 1e-4);
    }

    #[test]
    fn test_carry_without_selection_is_noop() {
        let (mut world, key) = world_with_marble();
        let before = world.physics().pose(body(&world, key)).unwrap();
        let mut controller = InteractionController::new().with_carry(2.0);
        controller.carry(&mut world, &camera());
        let pose = world.physics().pose(body(&world, key)).unwrap();
        assert_eq!(pose.translation, before.translation);
    }

    #[test]
    fn test_drop_after_carry_zeroes_velocity() {
        let (mut world, key) = world_with_marble();
        // Let the marble pick up some speed first
        for _ in 0..10 {
            world.update();
        }
        assert!(world.physics().linear_velocity(body(&world, key)).unwrap().y < 0.0);

        let marble_pos = world.physics().pose(body(&world, key)).unwrap().translation;
        let cam = Camera::looking_at(marble_pos + Vec3::new(0.0, 0.0, 10.0), marble_pos);
        let mut controller = InteractionController::new().with_carry(2.0);
        assert_eq!(controller.pick(&mut world, &cam, Vec2::ZERO), Some(key));
        controller.carry(&mut world, &cam);
        assert!(controller.drop_held(&mut world));

        assert_eq!(world.physics().linear_velocity(body(&world, key)), Some(Vec3::ZERO));
        assert_eq!(world.physics().angular_velocity(body(&world, key)), Some(Vec3::ZERO));
        assert_eq!(world.physics().is_enabled(body(&world, key)), Some(true));
    }

    #[test]
    fn test_drop_without_carry_keeps_velocity() {
        let (mut world, key) = world_with_marble();
        for _ in 0..10 {
            world.update();
        }
        let before = world.physics().linear_velocity(body(&world, key)).unwrap();

        let marble_pos = world.physics().pose(body(&world, key)).unwrap().translation;
        let cam = Camera::looking_at(marble_pos + Vec3::new(0.0, 0.0, 10.0), marble_pos);
        let mut controller = InteractionController::new();
        controller.pick(&mut world, &cam, Vec2::ZERO);
        controller.drop_held(&mut world);

        assert_eq!(world.physics().linear_velocity(body(&world, key)), Some(before));
    }

    #[test]
    fn test_respawn_empty_queue_is_noop() {
        let (mut world, _) = world_with_marble();
        let mut controller =
            InteractionController::new().with_respawn(spawn_points(&[[0.0, 5.0, 0.0]]));
        assert_eq!(controller.respawn(&mut world), None);
        assert_eq!(world.object_count(), 1);
    }

    #[test]
    fn test_throw_queues_spawn_id_and_respawn_replaces() {
        let (mut world, key) = world_with_marble();
        let cam = camera();
        let mut controller =
            InteractionController::new().with_respawn(spawn_points(&[[0.0, 5.0, 0.0]]));

        controller.pick(&mut world, &cam, Vec2::ZERO);
        controller.throw(&mut world, &cam);
        assert_eq!(controller.pending_respawns().len(), 1);

        for _ in 0..30 {
            world.update();
        }

        let bodies = world.physics().body_count();
        let replacement = controller.respawn(&mut world).unwrap();
        assert!(controller.pending_respawns().is_empty());
        assert!(!world.contains(key));
        assert_ne!(replacement, key);
        assert_eq!(world.object_count(), 1);
        assert_eq!(world.physics().body_count(), bodies);

        let object = world.object(replacement).unwrap();
        assert_eq!(object.spawn(), Some(SpawnId(0)));
        let pose = world.physics().pose(object.body()).unwrap();
        assert_eq!(pose.translation, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_respawn_order_is_fifo() {
        let physics = PhysicsWorld::new(WorldPhysicsConfig::default()).unwrap();
        let mut world = World::new(Scene::new(), physics);
        let points = spawn_points(&[[-3.0, 5.0, 0.0], [3.0, 5.0, 0.0]]);
        for point in &points {
            world
                .spawn_marble(
                    MarbleDesc::new("m", point.position, 0.5, Arc::new(Material::GREEN_MARBLE))
                        .with_spawn(point.id),
                )
                .unwrap();
        }
        let mut controller = InteractionController::new().with_respawn(points.clone());

        // Throw the right marble first, then the left one
        for target in [points[1].position, points[0].position] {
            let cam = Camera::looking_at(target + Vec3::new(0.0, 0.0, 10.0), target);
            assert!(controller.pick(&mut world, &cam, Vec2::ZERO).is_some());
            controller.throw(&mut world, &cam);
        }
        assert_eq!(
            controller.pending_respawns().iter().copied().collect::<Vec<_>>(),
            vec![SpawnId(1), SpawnId(0)]
        );

        let first = controller.respawn(&mut world).unwrap();
        assert_eq!(world.object(first).unwrap().spawn(), Some(SpawnId(1)));
        let second = controller.respawn(&mut world).unwrap();
        assert_eq!(world.object(second).unwrap().spawn(), Some(SpawnId(0)));
        assert_eq!(controller.respawn(&mut world), None);
    }

    #[test]
    fn test_respawn_releases_held_object() {
        let (mut world, key) = world_with_marble();
        let cam = camera();
        let mut controller =
            InteractionController::new().with_respawn(spawn_points(&[[0.0, 5.0, 0.0]]));

        controller.pick(&mut world, &cam, Vec2::ZERO);
        controller.throw(&mut world, &cam);

        // Pick the replacement-to-be before confirming
        world.despawn(key).unwrap();
        let fresh = world
            .spawn_marble(
                MarbleDesc::new("marble_0", Vec3::new(0.0, 5.0, 0.0), 0.5, Arc::new(Material::GREEN_MARBLE))
                    .with_spawn(SpawnId(0)),
            )
            .unwrap();
        assert_eq!(controller.pick(&mut world, &cam, Vec2::ZERO), Some(fresh));

        controller.respawn(&mut world).unwrap();
        assert!(controller.selection().is_free());
        assert!(!world.contains(fresh));
    }

    #[test]
    fn test_throw_without_respawn_does_not_queue() {
        let (mut world, _) = world_with_marble();
        let cam = camera();
        let mut controller = InteractionController::new();
        controller.pick(&mut world, &cam, Vec2::ZERO);
        controller.throw(&mut world, &cam);
        assert!(controller.pending_respawns().is_empty());
    }

    #[test]
    fn test_despawned_while_held_frees_selection() {
        let (mut world, key) = world_with_marble();
        let mut controller = InteractionController::new();
        controller.pick(&mut world, &camera(), Vec2::ZERO);
        world.despawn(key).unwrap();
        assert!(!controller.drop_held(&mut world));
        assert!(controller.selection().is_free());
    }

    #[test]
    fn test_from_config() {
        let interaction = InteractionConfig {
            respawn_enabled: true,
            carry_enabled: false,
            throw_strength: 20.0,
            ..Default::default()
        };
        let controller = InteractionController::from_config(&interaction, &PhysicsConfig::default());
        assert!(controller.respawn_enabled);
        assert_eq!(controller.carry_distance, None);
        assert_eq!(controller.throw_strength, 20.0);
        assert_eq!(controller.marble_material.restitution, 1.0);
    }
}
