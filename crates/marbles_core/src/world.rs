//! World: scene plus physics
//!
//! The World owns the render scene, the physics world, and the set of
//! physics objects pairing one mesh node with one rigid body. It can
//! only be built from a ready [`PhysicsWorld`].

use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use marbles_physics::{
    ColliderShape, PhysicsError, PhysicsMaterial, PhysicsWorld, RigidBodyHandle,
};
use slotmap::{new_key_type, SlotMap};

use crate::{Material, MeshNode, MeshShape, NodeKey, Ray, Scene, Transform};

new_key_type! {
    /// Key to a physics object in the world
    pub struct ObjectKey;
}

/// Identifier of a fixed spawn location; stable across respawns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpawnId(pub u32);

impl fmt::Display for SpawnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spawn#{}", self.0)
    }
}

/// A mesh node paired with the rigid body that drives it
///
/// The pairing never changes after creation and is removed as a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsObject {
    node: NodeKey,
    body: RigidBodyHandle,
    spawn: Option<SpawnId>,
}

impl PhysicsObject {
    /// Key of the visual mesh
    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// Handle of the rigid body
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// Spawn location this object was created at, if any
    pub fn spawn(&self) -> Option<SpawnId> {
        self.spawn
    }
}

/// Description of a marble to spawn
#[derive(Clone, Debug)]
pub struct MarbleDesc {
    pub name: String,
    pub position: Vec3,
    pub radius: f32,
    pub material: Arc<Material>,
    pub physics_material: PhysicsMaterial,
    pub spawn: Option<SpawnId>,
}

impl MarbleDesc {
    /// A marble with the default physics material and no spawn id
    pub fn new(name: impl Into<String>, position: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            name: name.into(),
            position,
            radius,
            material,
            physics_material: PhysicsMaterial::MARBLE,
            spawn: None,
        }
    }

    /// Builder: physics material
    pub fn with_physics_material(mut self, material: PhysicsMaterial) -> Self {
        self.physics_material = material;
        self
    }

    /// Builder: spawn id
    pub fn with_spawn(mut self, spawn: SpawnId) -> Self {
        self.spawn = Some(spawn);
        self
    }
}

/// World error types
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// The key does not refer to a live object
    UnknownObject(ObjectKey),
    /// The physics adapter rejected an operation
    Physics(PhysicsError),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::UnknownObject(key) => write!(f, "Unknown object: {:?}", key),
            WorldError::Physics(err) => write!(f, "Physics error: {}", err),
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::Physics(err) => Some(err),
            WorldError::UnknownObject(_) => None,
        }
    }
}

impl From<PhysicsError> for WorldError {
    fn from(err: PhysicsError) -> Self {
        WorldError::Physics(err)
    }
}

/// The demo world: scene, physics, and their pairings
pub struct World {
    scene: Scene,
    physics: PhysicsWorld,
    objects: SlotMap<ObjectKey, PhysicsObject>,
}

impl World {
    /// Create a world from a scene and a ready physics world
    pub fn new(scene: Scene, physics: PhysicsWorld) -> Self {
        Self {
            scene,
            physics,
            objects: SlotMap::with_key(),
        }
    }

    /// The render scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The render scene, mutably
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The physics world
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// The physics world, mutably
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// Add a horizontal floor: a visual plane at y = 0 and a fixed cuboid collider
    pub fn add_floor(
        &mut self,
        size: f32,
        half_thickness: f32,
        material: Arc<Material>,
        physics_material: PhysicsMaterial,
    ) -> Result<NodeKey, WorldError> {
        let body = self.physics.create_fixed_body(Vec3::ZERO);
        self.physics.attach_collider(
            body,
            ColliderShape::cuboid(size / 2.0, half_thickness, size / 2.0),
            physics_material,
        )?;

        let node = MeshNode::new(MeshShape::plane(size), material)
            .with_name("floor");
        Ok(self.scene.add(node))
    }

    /// Create a marble: mesh node, dynamic body, ball collider, and their pairing
    pub fn spawn_marble(&mut self, desc: MarbleDesc) -> Result<ObjectKey, WorldError> {
        let body = self.physics.create_dynamic_body(desc.position);
        if let Err(err) = self.physics.attach_collider(
            body,
            ColliderShape::ball(desc.radius),
            desc.physics_material,
        ) {
            // Do not leave a body behind without its mesh
            let _ = self.physics.remove_body(body);
            return Err(err.into());
        }

        let node = MeshNode::new(MeshShape::sphere(desc.radius), desc.material)
            .with_name(desc.name.clone())
            .with_transform(Transform::from_position(desc.position));
        let node = self.scene.add(node);

        let key = self.objects.insert(PhysicsObject {
            node,
            body,
            spawn: desc.spawn,
        });

        log::info!(
            "Added marble '{}' at ({:.1}, {:.1}, {:.1})",
            desc.name,
            desc.position.x,
            desc.position.y,
            desc.position.z
        );
        Ok(key)
    }

    /// Destroy an object: detach its mesh, remove its body and colliders, drop the pairing
    pub fn despawn(&mut self, key: ObjectKey) -> Result<(), WorldError> {
        let object = self
            .objects
            .remove(key)
            .ok_or(WorldError::UnknownObject(key))?;

        self.scene.remove(object.node);
        self.physics.remove_body(object.body)?;
        Ok(())
    }

    /// Get an object by key
    pub fn object(&self, key: ObjectKey) -> Option<&PhysicsObject> {
        self.objects.get(key)
    }

    /// Check whether a key refers to a live object
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Iterate over keys and objects
    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &PhysicsObject)> {
        self.objects.iter()
    }

    /// Get the number of live objects
    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Find the live object created at the given spawn location
    pub fn find_by_spawn(&self, spawn: SpawnId) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find(|(_, object)| object.spawn == Some(spawn))
            .map(|(key, _)| key)
    }

    /// Nearest object hit by the ray, with its ray parameter
    ///
    /// Every tracked object is tested against its mesh's bounding sphere; the
    /// minimum non-negative parameter wins.
    pub fn raycast(&self, ray: &Ray) -> Option<(ObjectKey, f32)> {
        let mut nearest: Option<(ObjectKey, f32)> = None;

        for (key, object) in &self.objects {
            let Some(node) = self.scene.get(object.node) else {
                continue;
            };
            let (center, radius) = node.bounding_sphere();
            if let Some(t) = ray.intersect_sphere(center, radius) {
                if nearest.map_or(true, |(_, best)| t < best) {
                    nearest = Some((key, t));
                }
            }
        }

        nearest
    }

    /// Step physics once and copy body poses onto their meshes
    pub fn update(&mut self) {
        self.physics.step();
        self.sync_transforms();
    }

    /// Copy every body's position and orientation onto its paired mesh
    pub fn sync_transforms(&mut self) {
        for object in self.objects.values() {
            let Some(pose) = self.physics.pose(object.body) else {
                continue;
            };
            if let Some(node) = self.scene.get_mut(object.node) {
                let mut transform = node.transform;
                transform.position = pose.translation;
                transform.rotation = pose.rotation;
                if transform != node.transform {
                    node.set_transform(transform);
                }
            }
        }
    }
}
