//! Long-running herd simulations checking the guarantees every animal keeps.
//!
//! Animals are scattered over procedural hills with a lake and chased by a
//! circling player; after every tick each animal must still stand on dry,
//! in-bounds ground without having jumped a cliff.

use fauna::{
    populate, AnimalBehaviourController, AnimalId, BehaviourConfig, Heightmap, SpawnRules,
    TerrainHeightQuery, WorldParams,
};
use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::{fixture, rstest};

const EXTENT: f32 = 60.0;
const WATER: f32 = 0.0;

fn ground(x: f32, z: f32) -> f32 {
    let hills = (x * 0.1).sin() * 2.5 + (z * 0.07).cos() * 1.5 + 2.5;
    let lake = (-((x - 20.0).powi(2) + (z + 15.0).powi(2)) / 200.0).exp() * 9.0;
    let ridge = if x < -35.0 { (-35.0 - x) * 1.5 } else { 0.0 };
    hills - lake + ridge
}

#[fixture]
fn terrain() -> Heightmap {
    Heightmap::from_fn(121, EXTENT, ground).expect("valid grid")
}

fn scattered(
    terrain: Heightmap,
    config: BehaviourConfig,
    seed: u64,
) -> (AnimalBehaviourController<Heightmap>, Vec<AnimalId>) {
    let mut herd =
        AnimalBehaviourController::seeded(terrain, &WorldParams::new(EXTENT, WATER), config, seed)
            .expect("valid configuration");
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0xfeed);
    let ids = populate(&mut herd, 30, &mut rng, &SpawnRules::default()).expect("dry land exists");
    (herd, ids)
}

fn player_at(tick: u16) -> Vec3 {
    let angle = f32::from(tick) * 0.004;
    Vec3::new(angle.cos() * 25.0, 0.0, angle.sin() * 25.0)
}

#[rstest]
#[case::default_behaviour(BehaviourConfig::default(), 1)]
#[case::restless(
    BehaviourConfig { wander_chance: 1.0, look_around_chance: 0.2, ..BehaviourConfig::default() },
    2
)]
#[case::skittish(
    BehaviourConfig { flee_trigger_radius: 40.0, ..BehaviourConfig::default() },
    3
)]
fn animals_stay_on_dry_ground_within_bounds(
    terrain: Heightmap,
    #[case] config: BehaviourConfig,
    #[case] seed: u64,
) {
    let offset = config.ground_offset;
    let max_climb = config.max_climb;
    let (mut herd, ids) = scattered(terrain, config, seed);
    assert!(!ids.is_empty());
    let mut previous: Vec<Vec3> = ids
        .iter()
        .map(|&id| herd.position(id).expect("registered"))
        .collect();

    for tick in 0..3_000_u16 {
        herd.update(1.0 / 30.0, player_at(tick));
        for (&id, last) in ids.iter().zip(previous.iter_mut()) {
            let position = herd.position(id).expect("registered");
            let planar = Vec2::new(position.x, position.z);
            assert!(herd.bounds().contains(planar), "{id} left the world at {position}");

            let height = herd
                .terrain()
                .height_at(position.x, position.z)
                .expect("inside the heightmap");
            assert!(height >= WATER, "{id} entered water at {position}");
            assert!(
                (position.y - (height + offset)).abs() < 1e-3,
                "{id} floats at {position} over ground {height}"
            );
            let climb = (position.y - last.y).abs();
            assert!(climb <= max_climb + 1e-4, "{id} jumped {climb} at {position}");
            *last = position;
        }
    }
}

#[rstest]
fn herd_reacts_to_the_player(terrain: Heightmap) {
    let (mut herd, _) = scattered(terrain, BehaviourConfig::default(), 4);
    let mut saw_flight = false;
    for tick in 0..3_000_u16 {
        herd.update(1.0 / 30.0, player_at(tick));
        let census = herd.census();
        assert_eq!(census.total(), herd.len());
        saw_flight |= census.fleeing > 0;
    }
    assert!(saw_flight, "no animal ever fled from a player crossing the herd");
}

#[rstest]
fn seeded_runs_replay_identically(terrain: Heightmap) {
    let (mut first, ids) = scattered(terrain.clone(), BehaviourConfig::default(), 7);
    let (mut second, replay_ids) = scattered(terrain, BehaviourConfig::default(), 7);
    assert_eq!(ids, replay_ids);

    for tick in 0..600_u16 {
        first.update(1.0 / 30.0, player_at(tick));
        second.update(1.0 / 30.0, player_at(tick));
    }
    for id in ids {
        assert_eq!(first.position(id), second.position(id));
        assert_eq!(first.state(id), second.state(id));
    }
}
