//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for describing the demo scene once and building it
//! either with physics (a [`World`]) or visual-only (a bare [`Scene`]) when
//! the physics world could not be created.

use std::sync::Arc;

use marbles_core::{
    Light, MarbleDesc, Material, MeshNode, MeshShape, PhysicsMaterial, PhysicsWorld, Scene,
    Transform, Vec3, World, WorldError,
};

use crate::config::AppConfig;
use crate::interaction::{random_marble_material, spawn_points};

/// Floor parameters kept until build time
#[derive(Clone, Debug)]
struct FloorDesc {
    size: f32,
    half_thickness: f32,
    material: Arc<Material>,
    physics_material: PhysicsMaterial,
}

/// Builder for the demo scene
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::new()
///     .with_background(0x87CEEB)
///     .add_floor(100.0, 0.1, Material::FLOOR)
///     .add_light(Light::ambient(0.3))
///     .add_marble(MarbleDesc::new("marble", Vec3::new(0.0, 5.0, 0.0), 0.5, green))
///     .build(physics)?;
/// ```
pub struct SceneBuilder {
    scene: Scene,
    floor: Option<FloorDesc>,
    marbles: Vec<MarbleDesc>,
}

impl SceneBuilder {
    /// Create a new scene builder with the default sky background
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            floor: None,
            marbles: Vec::new(),
        }
    }

    /// Describe the whole demo scene from configuration
    ///
    /// With respawn disabled every marble is green; otherwise each gets a random color.
    pub fn from_config(config: &AppConfig) -> Self {
        let rendering = &config.rendering;
        let mut builder = Self::new()
            .with_background(rendering.background_color)
            .add_floor(
                config.physics.floor_size,
                config.physics.floor_half_thickness,
                Material::from_hex(rendering.floor_color, 1.0),
            )
            .add_light(Light::ambient(rendering.ambient_intensity))
            .add_light(Light::directional(
                rendering.directional_intensity,
                Vec3::from_array(rendering.light_position),
            ));

        let mut rng = rand::thread_rng();
        let green = Arc::new(Material::GREEN_MARBLE);
        let radius = config.interaction.marble_radius;
        for point in spawn_points(&config.interaction.spawn_points) {
            let material = if config.interaction.respawn_enabled {
                Arc::new(random_marble_material(&mut rng))
            } else {
                green.clone()
            };
            builder = builder.add_marble(
                MarbleDesc::new(format!("marble_{}", point.id.0), point.position, radius, material)
                    .with_physics_material(config.physics.marble_material())
                    .with_spawn(point.id),
            );
        }
        builder
    }

    /// Set the clear color from a `0xRRGGBB` value
    pub fn with_background(mut self, hex: u32) -> Self {
        let [r, g, b] = marbles_core::hex_to_rgb(hex);
        self.scene.background = [r, g, b, 1.0];
        self
    }

    /// Add a square floor at y = 0 with a fixed cuboid collider
    pub fn add_floor(mut self, size: f32, half_thickness: f32, material: Material) -> Self {
        self.floor = Some(FloorDesc {
            size,
            half_thickness,
            material: Arc::new(material),
            physics_material: PhysicsMaterial::FLOOR,
        });
        self
    }

    /// Add a light
    pub fn add_light(mut self, light: Light) -> Self {
        self.scene.add_light(light);
        self
    }

    /// Add a marble
    pub fn add_marble(mut self, desc: MarbleDesc) -> Self {
        self.marbles.push(desc);
        self
    }

    /// Number of marbles described so far
    pub fn marble_count(&self) -> usize {
        self.marbles.len()
    }

    /// Build the world on a ready physics world
    pub fn build(self, physics: PhysicsWorld) -> Result<World, WorldError> {
        let mut world = World::new(self.scene, physics);

        if let Some(floor) = self.floor {
            world.add_floor(floor.size, floor.half_thickness, floor.material, floor.physics_material)?;
        }
        for desc in self.marbles {
            world.spawn_marble(desc)?;
        }

        log::info!(
            "Built scene with {} marbles ({} bodies, {} colliders)",
            world.object_count(),
            world.physics().body_count(),
            world.physics().collider_count()
        );
        Ok(world)
    }

    /// Build meshes and lights only, with marbles frozen at their spawn points
    pub fn build_visual(self) -> Scene {
        let mut scene = self.scene;

        if let Some(floor) = self.floor {
            scene.add(
                MeshNode::new(MeshShape::plane(floor.size), floor.material)
                    .with_name("floor"),
            );
        }
        for desc in self.marbles {
            scene.add(
                MeshNode::new(MeshShape::sphere(desc.radius), desc.material)
                    .with_name(desc.name)
                    .with_transform(Transform::from_position(desc.position)),
            );
        }

        log::info!("Built visual-only scene with {} nodes", scene.node_count());
        scene
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
