//! Game-over detection
//!
//! Runs after every physics step: count the sand that has fallen below the
//! threshold line and end the game the first time the count reaches the
//! limit. The end effect (sprite + explosion) fires exactly once.

use super::body::Body;
use super::builder::sprite_spec;
use super::engine::PhysicsEngine;
use super::geometry::{GAME_OVER_SPRITE, THRESHOLD};
use super::state::GameState;
use crate::audio::{AudioPlayer, ClipId};
use crate::consts::GAME_OVER_LIMIT;

/// Events raised by the simulation for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Sand batch dropped
    Spawned { count: usize },
    /// Basin overflowed
    GameOver { settled: usize },
}

/// Sand strictly below `threshold_y` (y grows downward)
pub fn count_settled(bodies: &[Body], threshold_y: f32) -> usize {
    bodies
        .iter()
        .filter(|b| b.is_sand() && b.position.y > threshold_y)
        .count()
}

/// Post-step observer
#[derive(Debug, Clone)]
pub struct GameMonitor {
    pub threshold_y: f32,
    pub limit: usize,
    effect_clip: ClipId,
}

impl GameMonitor {
    /// Monitor using the playfield's threshold line and the standard limit
    pub fn new(effect_clip: ClipId) -> Self {
        Self::with_threshold(THRESHOLD.y, GAME_OVER_LIMIT, effect_clip)
    }

    pub fn with_threshold(threshold_y: f32, limit: usize, effect_clip: ClipId) -> Self {
        Self {
            threshold_y,
            limit,
            effect_clip,
        }
    }

    /// Handle one completed physics step
    pub fn on_after_update<E, A>(
        &self,
        state: &mut GameState,
        engine: &mut E,
        audio: &mut A,
    ) -> Option<GameEvent>
    where
        E: PhysicsEngine + ?Sized,
        A: AudioPlayer + ?Sized,
    {
        let settled = count_settled(engine.bodies(), self.threshold_y);
        state.settled = settled;

        if settled < self.limit || !state.end() {
            return None;
        }

        log::info!("Game over: {} grains below the line", settled);
        engine.add_body(sprite_spec(&GAME_OVER_SPRITE));
        audio.play(self.effect_clip);
        Some(GameEvent::GameOver { settled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{EXPLOSION, HeadlessAudio};
    use crate::sim::body::{BodySpec, RenderStyle};
    use crate::sim::collision::Role;
    use crate::sim::engine::World;
    use crate::sim::spawner::sand_spec;
    use glam::Vec2;

    fn fixture() -> (GameState, World, HeadlessAudio, GameMonitor) {
        let mut audio = HeadlessAudio::new();
        let clip = audio.load(EXPLOSION);
        // No gravity so bodies stay where they are put
        let world = World::with_gravity(Vec2::ZERO);
        (GameState::new(0), world, audio, GameMonitor::new(clip))
    }

    fn add_sand(world: &mut World, n: usize, y: f32) {
        let mut rng = GameState::new(1).rng();
        let specs = (0..n)
            .map(|i| sand_spec(Vec2::new(i as f32, y), 10.0, &mut rng))
            .collect();
        world.add_bodies(specs);
    }

    fn game_over_sprites(world: &World) -> usize {
        world
            .bodies()
            .iter()
            .filter(|b| {
                matches!(b.render, RenderStyle::Sprite(s) if s.texture == GAME_OVER_SPRITE.texture)
            })
            .count()
    }

    #[test]
    fn test_count_uses_strict_threshold() {
        let (_, mut world, _, _) = fixture();
        add_sand(&mut world, 1, 649.0);
        add_sand(&mut world, 1, 650.0);
        add_sand(&mut world, 1, 651.0);
        assert_eq!(count_settled(world.bodies(), 650.0), 1);
    }

    #[test]
    fn test_count_ignores_unlabeled_bodies() {
        let (_, mut world, _, _) = fixture();
        world.add_body(BodySpec::circle(Vec2::new(0.0, 900.0), 10.0).with_role(Role::Obstacle));
        world.add_body(BodySpec::circle(Vec2::new(0.0, 900.0), 10.0).with_role(Role::Sand));
        assert_eq!(count_settled(world.bodies(), 650.0), 0);
    }

    #[test]
    fn test_119_then_120() {
        let (mut state, mut world, mut audio, monitor) = fixture();
        add_sand(&mut world, 119, THRESHOLD.y + 50.0);

        assert_eq!(monitor.on_after_update(&mut state, &mut world, &mut audio), None);
        assert!(!state.is_game_over());
        assert_eq!(state.settled, 119);

        add_sand(&mut world, 1, THRESHOLD.y + 50.0);
        let event = monitor.on_after_update(&mut state, &mut world, &mut audio);
        assert_eq!(event, Some(GameEvent::GameOver { settled: 120 }));
        assert!(state.is_game_over());
        assert_eq!(game_over_sprites(&world), 1);
        assert_eq!(audio.played().len(), 1);
    }

    #[test]
    fn test_fires_once() {
        let (mut state, mut world, mut audio, monitor) = fixture();
        add_sand(&mut world, 130, THRESHOLD.y + 1.0);

        assert!(monitor.on_after_update(&mut state, &mut world, &mut audio).is_some());
        for _ in 0..10 {
            add_sand(&mut world, 5, THRESHOLD.y + 1.0);
            assert!(monitor.on_after_update(&mut state, &mut world, &mut audio).is_none());
        }

        assert_eq!(game_over_sprites(&world), 1);
        assert_eq!(audio.played().len(), 1);
        assert_eq!(state.settled, 180);
    }

    #[test]
    fn test_jump_past_limit_fires_once() {
        let (mut state, mut world, mut audio, monitor) = fixture();
        add_sand(&mut world, 119, THRESHOLD.y + 1.0);
        assert!(monitor.on_after_update(&mut state, &mut world, &mut audio).is_none());

        add_sand(&mut world, 6, THRESHOLD.y + 1.0);
        assert_eq!(
            monitor.on_after_update(&mut state, &mut world, &mut audio),
            Some(GameEvent::GameOver { settled: 125 })
        );
        assert!(monitor.on_after_update(&mut state, &mut world, &mut audio).is_none());
        assert_eq!(audio.played().len(), 1);
    }

    #[test]
    fn test_sand_above_line_never_counts() {
        let (mut state, mut world, mut audio, monitor) = fixture();
        add_sand(&mut world, 200, THRESHOLD.y - 1.0);
        assert!(monitor.on_after_update(&mut state, &mut world, &mut audio).is_none());
        assert_eq!(state.settled, 0);
    }
}
