//! End-to-end interaction tests
//!
//! Builds the demo scene from configuration and drives it the way the event
//! loop does: input actions, then one simulation step per frame.

use marbles::config::AppConfig;
use marbles::interaction::{InteractionController, Selection};
use marbles::scene::SceneBuilder;
use marbles::systems::step_world;
use marbles_core::{Material, PhysicsWorld, SpawnId, Vec2, Vec3, World};
use marbles_render::Camera;

fn respawn_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.interaction.respawn_enabled = true;
    config.interaction.carry_enabled = false;
    config.interaction.spawn_points = vec![[-3.0, 5.0, 0.0], [0.0, 5.0, 0.0], [3.0, 5.0, 0.0]];
    config
}

fn build(config: &AppConfig) -> (World, InteractionController) {
    let physics = PhysicsWorld::new(config.physics.to_physics_config()).unwrap();
    let mut world = SceneBuilder::from_config(config).build(physics).unwrap();
    world.update();
    let controller = InteractionController::from_config(&config.interaction, &config.physics);
    (world, controller)
}

/// Camera ten units in front of a spawn point, level with it
fn camera_facing(point: [f32; 3]) -> Camera {
    let target = Vec3::from_array(point);
    Camera::looking_at(target + Vec3::new(0.0, 0.0, 10.0), target)
}

fn body_y(world: &World, spawn: SpawnId) -> f32 {
    let key = world.find_by_spawn(spawn).unwrap();
    world.physics().pose(world.object(key).unwrap().body()).unwrap().translation.y
}

#[test]
fn test_pick_hold_drop_cycle() {
    let config = AppConfig::default();
    let (mut world, mut controller) = build(&config);
    let camera = camera_facing([0.0, 5.0, 0.0]);

    controller.select(&mut world, &camera, Vec2::ZERO);
    let held = controller.held().unwrap();
    let body = world.object(held).unwrap().body();
    assert_eq!(world.physics().is_enabled(body), Some(false));

    // Held marble does not fall while the world keeps stepping
    let y = body_y(&world, SpawnId(0));
    for _ in 0..30 {
        step_world(&mut world, &mut controller, &camera);
    }
    let carried = body_y(&world, SpawnId(0));
    assert!((carried - y).abs() < 0.1, "held marble moved from {} to {}", y, carried);

    // Second click drops it
    controller.select(&mut world, &camera, Vec2::ZERO);
    assert!(matches!(controller.selection(), Selection::Free));
    assert_eq!(world.physics().is_enabled(body), Some(true));
    let node = world.scene().get(world.object(held).unwrap().node()).unwrap();
    assert_eq!(**node.material(), Material::GREEN_MARBLE);

    for _ in 0..30 {
        step_world(&mut world, &mut controller, &camera);
    }
    assert!(body_y(&world, SpawnId(0)) < carried);
}

#[test]
fn test_click_on_empty_sky_keeps_selection_free() {
    let config = AppConfig::default();
    let (mut world, mut controller) = build(&config);
    let camera = camera_facing([0.0, 5.0, 0.0]);

    controller.select(&mut world, &camera, Vec2::new(0.9, 0.9));
    assert!(!controller.is_holding());
}

#[test]
fn test_throw_then_respawn_replaces_marble() {
    let config = respawn_config();
    let (mut world, mut controller) = build(&config);
    let camera = camera_facing([0.0, 5.0, 0.0]);
    let objects = world.object_count();
    let nodes = world.scene().node_count();
    let bodies = world.physics().body_count();

    let thrown = controller.pick(&mut world, &camera, Vec2::ZERO).unwrap();
    assert_eq!(world.object(thrown).unwrap().spawn(), Some(SpawnId(1)));
    controller.throw(&mut world, &camera).unwrap();
    assert_eq!(controller.pending_respawns().len(), 1);

    for _ in 0..60 {
        step_world(&mut world, &mut controller, &camera);
    }

    let fresh = controller.respawn(&mut world).unwrap();
    assert!(!world.contains(thrown));
    assert!(controller.pending_respawns().is_empty());
    assert_eq!(world.find_by_spawn(SpawnId(1)), Some(fresh));

    // Counts are unchanged: one marble out, one marble in
    assert_eq!(world.object_count(), objects);
    assert_eq!(world.scene().node_count(), nodes);
    assert_eq!(world.physics().body_count(), bodies);

    let pose = world.physics().pose(world.object(fresh).unwrap().body()).unwrap();
    assert_eq!(pose.translation, Vec3::new(0.0, 5.0, 0.0));
}

#[test]
fn test_respawn_order_is_oldest_first() {
    let config = respawn_config();
    let (mut world, mut controller) = build(&config);

    for point in [[3.0, 5.0, 0.0], [-3.0, 5.0, 0.0]] {
        let camera = camera_facing(point);
        controller.pick(&mut world, &camera, Vec2::ZERO).unwrap();
        controller.throw(&mut world, &camera).unwrap();
    }

    let order: Vec<SpawnId> = controller.pending_respawns().iter().copied().collect();
    assert_eq!(order, vec![SpawnId(2), SpawnId(0)]);

    controller.respawn(&mut world).unwrap();
    let remaining: Vec<SpawnId> = controller.pending_respawns().iter().copied().collect();
    assert_eq!(remaining, vec![SpawnId(0)]);
}

#[test]
fn test_respawn_with_empty_queue_is_noop() {
    let config = respawn_config();
    let (mut world, mut controller) = build(&config);
    let objects = world.object_count();

    assert!(controller.respawn(&mut world).is_none());
    assert_eq!(world.object_count(), objects);
}

#[test]
fn test_at_most_one_marble_held() {
    let config = respawn_config();
    let (mut world, mut controller) = build(&config);

    let first = controller
        .pick(&mut world, &camera_facing([-3.0, 5.0, 0.0]), Vec2::ZERO)
        .unwrap();
    // Clicking another marble while holding drops the first one instead
    controller.select(&mut world, &camera_facing([3.0, 5.0, 0.0]), Vec2::ZERO);
    assert!(!controller.is_holding());

    let disabled = world
        .objects()
        .filter(|(_, object)| world.physics().is_enabled(object.body()) == Some(false))
        .count();
    assert_eq!(disabled, 0);
    assert!(world.contains(first));
}
