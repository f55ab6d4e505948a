//! Fixed timestep runner
//!
//! Owns the engine, the audio player and the game state, and advances them in
//! fixed steps. Host input arrives as a `TickInput` message; the monitor sees
//! every completed step.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::builder::{BuildError, build_world};
use super::engine::PhysicsEngine;
use super::input::InputConstraint;
use super::monitor::{GameEvent, GameMonitor};
use super::spawner::spawn_particles;
use super::state::GameState;
use crate::audio::{AudioPlayer, BACKGROUND_MUSIC, EXPLOSION};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn trigger (click on the play area)
    pub spawn: bool,
    /// Pointer position in world space while the button is held
    pub pointer: Option<Vec2>,
}

/// A running session
pub struct Game<E, A> {
    pub state: GameState,
    pub engine: E,
    pub audio: A,
    monitor: GameMonitor,
    rng: Pcg32,
    accumulator: f32,
    /// Spawn request waiting for the next step
    pending_spawn: bool,
}

impl<E: PhysicsEngine, A: AudioPlayer> Game<E, A> {
    /// Build the playfield into `engine` and start the background music
    pub fn new<I>(mut engine: E, mut audio: A, input: &mut I, seed: u64) -> Result<Self, BuildError>
    where
        I: InputConstraint + ?Sized,
    {
        build_world(&mut engine, input)?;

        let bgm = audio.load(BACKGROUND_MUSIC);
        let explosion = audio.load(EXPLOSION);
        audio.play(bgm);

        let state = GameState::new(seed);
        let rng = state.rng();
        log::info!("Game created with seed {}", seed);

        Ok(Self {
            state,
            engine,
            audio,
            monitor: GameMonitor::new(explosion),
            rng,
            accumulator: 0.0,
            pending_spawn: false,
        })
    }

    /// Advance exactly one fixed step
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if input.spawn {
            if let Some(ids) = spawn_particles(&mut self.state, &mut self.engine, &mut self.rng) {
                events.push(GameEvent::Spawned { count: ids.len() });
            }
        }

        self.engine.set_pointer(input.pointer);
        self.engine.step(dt);
        self.state.time_ticks += 1;

        if let Some(event) =
            self.monitor
                .on_after_update(&mut self.state, &mut self.engine, &mut self.audio)
        {
            events.push(event);
        }

        events
    }

    /// Feed a frame's worth of wall-clock time and run the due steps.
    ///
    /// A spawn request is held until a step runs, then delivered to that step
    /// only; frames shorter than `SIM_DT` never lose it.
    pub fn update(&mut self, input: &TickInput, frame_dt: f32) -> Vec<GameEvent> {
        self.pending_spawn |= input.spawn;
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut events = Vec::new();
        let mut step_input = TickInput {
            spawn: false,
            pointer: input.pointer,
        };
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            step_input.spawn = std::mem::take(&mut self.pending_spawn);
            events.extend(self.tick(&step_input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        events
    }

    /// Whether a spawn request is waiting for a step
    pub fn spawn_pending(&self) -> bool {
        self.pending_spawn
    }
}
