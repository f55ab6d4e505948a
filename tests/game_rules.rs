//! Property tests for the game-over rule and collision filters
//!
//! - Threshold comparison is strict for any threshold position
//! - Game over fires exactly once however many steps follow
//! - Filter assignment has no cross-talk between bodies
//! - With real contacts the funnels hold the sand above the basin floor

use funnel_drop::audio::{EXPLOSION, HeadlessAudio};
use funnel_drop::consts::{GAME_OVER_LIMIT, SIM_DT};
use funnel_drop::sim::spawner::sand_spec;
use funnel_drop::sim::{
    BodySpec, Category, CollisionFilter, GameMonitor, GameState, NoPointer, PhysicsEngine,
    RapierWorld, Role, World, build_world, count_settled, spawn_particles,
};
use funnel_drop::AudioPlayer;
use glam::Vec2;
use proptest::prelude::*;

fn role_strategy() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

proptest! {
    #[test]
    fn threshold_is_strict(threshold in -1000.0f32..1000.0) {
        let mut world = World::with_gravity(Vec2::ZERO);
        let mut rng = GameState::new(0).rng();
        world.add_body(sand_spec(Vec2::new(0.0, threshold - 1.0), 10.0, &mut rng));
        prop_assert_eq!(count_settled(world.bodies(), threshold), 0);

        world.add_body(sand_spec(Vec2::new(0.0, threshold + 1.0), 10.0, &mut rng));
        prop_assert_eq!(count_settled(world.bodies(), threshold), 1);
    }

    #[test]
    fn game_over_fires_once(below in 0usize..200, extra_steps in 1usize..20) {
        let mut audio = HeadlessAudio::new();
        let clip = audio.load(EXPLOSION);
        let monitor = GameMonitor::new(clip);
        let mut state = GameState::new(0);
        let mut world = World::with_gravity(Vec2::ZERO);
        let mut rng = state.rng();

        let y = monitor.threshold_y + 10.0;
        let specs = (0..below).map(|i| sand_spec(Vec2::new(i as f32, y), 10.0, &mut rng)).collect();
        world.add_bodies(specs);

        let mut fired = 0;
        for _ in 0..extra_steps {
            if monitor.on_after_update(&mut state, &mut world, &mut audio).is_some() {
                fired += 1;
            }
        }

        let expected = usize::from(below >= GAME_OVER_LIMIT);
        prop_assert_eq!(fired, expected);
        prop_assert_eq!(audio.play_count(clip), expected);
        prop_assert_eq!(state.is_game_over(), below >= GAME_OVER_LIMIT);
    }

    #[test]
    fn filters_have_no_cross_talk(roles in prop::collection::vec(role_strategy(), 1..40)) {
        let mut world = World::with_gravity(Vec2::ZERO);
        let mut rng = GameState::new(1).rng();
        let specs = roles
            .iter()
            .enumerate()
            .map(|(i, &role)| {
                let position = Vec2::new(i as f32 * 50.0, 0.0);
                match role {
                    Role::Sand => sand_spec(position, 15.0, &mut rng),
                    other => BodySpec::circle(position, 10.0).with_role(other),
                }
            })
            .collect();
        let ids = world.add_bodies(specs);
        prop_assert_eq!(ids.len(), roles.len());

        let sand_bits = Category::Wall.bits() | Category::Sand.bits();
        for (role, body) in roles.iter().zip(world.bodies()) {
            prop_assert_eq!(body.filter, CollisionFilter::for_role(*role));
            if *role == Role::Sand {
                prop_assert!(body.is_sand());
                prop_assert_eq!(body.filter.category, Category::Sand.bits());
                prop_assert_eq!(body.filter.mask, sand_bits);
            } else {
                prop_assert!(!body.is_sand());
            }
        }
    }
}

#[test]
fn build_then_spawn_adds_one_sand_batch() {
    let mut world = World::new();
    build_world(&mut world, &mut NoPointer).expect("build");
    let before = world.bodies().len();

    let mut state = GameState::new(2024);
    let mut rng = state.rng();
    let ids = spawn_particles(&mut state, &mut world, &mut rng).expect("first spawn");
    assert!(spawn_particles(&mut state, &mut world, &mut rng).is_none());

    assert_eq!(ids.len(), 144);
    assert_eq!(world.bodies().len(), before + 144);

    let sand: Vec<_> = world.bodies().iter().filter(|b| b.is_sand()).collect();
    assert_eq!(sand.len(), 144);
    for body in sand {
        let r = body.radius().expect("round");
        assert!((10.0..=20.0).contains(&r));
        assert_eq!(body.filter.category, Category::Sand.bits());
        assert_eq!(body.filter.mask, Category::Wall.bits() | Category::Sand.bits());
    }
}

#[test]
fn funnels_hold_sand_with_contacts() {
    let mut world = RapierWorld::new();
    build_world(&mut world, &mut NoPointer).expect("build");

    let mut state = GameState::new(7);
    let mut rng = state.rng();
    spawn_particles(&mut state, &mut world, &mut rng).expect("spawn");

    for _ in 0..300 {
        world.step(SIM_DT);
    }

    let floor_top = 905.0;
    let held = world
        .bodies()
        .iter()
        .filter(|b| b.is_sand() && b.position.y < floor_top)
        .count();
    assert!(held >= 72, "only {} of 144 grains stayed above the floor", held);
}
