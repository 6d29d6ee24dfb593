//! Tests for driving a herd through the Bevy plugin.

use std::time::Duration;

use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_time::Time;
use bevy_transform::components::Transform;
use fauna::{AnimalBehaviourPlugin, AnimalHandle, AnimalState, Herd, Player, WorldParams};
use glam::Vec3;
use rstest::{fixture, rstest};
use test_utils::{herd, StubTerrain};

struct Scene {
    app: App,
    player: Entity,
    animals: Vec<Entity>,
}

impl Scene {
    fn frame(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(50));
        self.app.update();
    }

    fn translation(&self, entity: Entity) -> Vec3 {
        self.app
            .world()
            .get::<Transform>(entity)
            .expect("entity has a transform")
            .translation
    }

    fn move_player(&mut self, to: Vec3) {
        self.app
            .world_mut()
            .get_mut::<Transform>(self.player)
            .expect("player has a transform")
            .translation = to;
    }
}

#[fixture]
fn scene() -> Scene {
    let mut controller = herd(StubTerrain::flat(1.0), WorldParams::new(80.0, 0.0));
    let mut app = App::new();
    app.insert_resource(Time::<()>::default());
    app.add_plugins(AnimalBehaviourPlugin::<StubTerrain>::default());

    let mut animals = Vec::new();
    for i in 0..4_u8 {
        let start = Vec3::new(f32::from(i) * 2.0, 0.0, 0.0);
        let id = controller.register(start, 0.5).expect("finite start");
        controller.set_state(id, AnimalState::Idle { timer: 1_000.0 });
        animals.push(app.world_mut().spawn((AnimalHandle(id), Transform::default())).id());
    }
    app.insert_resource(Herd(controller));
    let player = app
        .world_mut()
        .spawn((Player, Transform::from_xyz(70.0, 0.0, 70.0)))
        .id();
    Scene {
        app,
        player,
        animals,
    }
}

#[rstest]
fn transforms_follow_the_controller(mut scene: Scene) {
    scene.frame();
    for &entity in &scene.animals {
        let translation = scene.translation(entity);
        assert!((translation.y - 1.1).abs() < 1e-5);
    }
}

#[rstest]
fn approaching_player_scatters_the_herd(mut scene: Scene) {
    scene.frame();
    let before: Vec<Vec3> = scene.animals.iter().map(|&e| scene.translation(e)).collect();

    scene.move_player(Vec3::new(3.0, 0.0, -4.0));
    for _ in 0..20 {
        scene.frame();
    }

    let herd = scene.app.world().resource::<Herd<StubTerrain>>();
    assert!(herd.census().fleeing > 0);
    for (&entity, start) in scene.animals.iter().zip(before) {
        let after = scene.translation(entity);
        let player = Vec3::new(3.0, 0.0, -4.0);
        assert!(
            after.distance(player) > start.distance(player),
            "animal moved from {start} to {after} towards the player"
        );
    }
}

#[rstest]
fn second_player_pauses_the_herd(mut scene: Scene) {
    scene.frame();
    let before: Vec<Vec3> = scene.animals.iter().map(|&e| scene.translation(e)).collect();
    scene
        .app
        .world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.0, 0.0)));

    for _ in 0..5 {
        scene.frame();
    }
    let after: Vec<Vec3> = scene.animals.iter().map(|&e| scene.translation(e)).collect();
    assert_eq!(before, after);
}
