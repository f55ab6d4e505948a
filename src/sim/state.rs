//! Game state machine
//!
//! `NotStarted -> Playing -> Ended`. The transition methods are the only way
//! to change phase, and each reports whether it actually fired.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Playfield built, waiting for the spawn trigger
    #[default]
    NotStarted,
    /// Sand has been dropped
    Playing,
    /// Basin overflowed (terminal)
    Ended,
}

/// Per-session game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for the spawn RNG
    pub seed: u64,
    phase: GamePhase,
    /// Sand below the threshold as of the last step
    pub settled: usize,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            settled: 0,
            time_ticks: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Sand has been spawned (stays true after the game ends)
    pub fn is_playing(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// `NotStarted -> Playing`; false if the game already started
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// Any phase `-> Ended`; false if already ended
    pub fn end(&mut self) -> bool {
        if self.phase == GamePhase::Ended {
            return false;
        }
        self.phase = GamePhase::Ended;
        true
    }

    /// Fresh spawn RNG for this session's seed
    pub fn rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_transitions_fire_once() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert!(!state.is_playing());

        assert!(state.start());
        assert!(!state.start());
        assert!(state.is_playing());
        assert!(!state.is_game_over());

        assert!(state.end());
        assert!(!state.end());
        assert!(state.is_game_over());
        assert!(state.is_playing());

        // Ended is terminal
        assert!(!state.start());
        assert_eq!(state.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_rng_is_seeded() {
        let a: u32 = GameState::new(42).rng().random();
        let b: u32 = GameState::new(42).rng().random();
        assert_eq!(a, b);
    }
}
