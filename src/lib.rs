//! Funnel Drop - a falling-sand funnel arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (playfield geometry, collision filters, spawning, game-over detection)
//! - `audio`: Clip loading/playback behind the `AudioPlayer` trait
//! - `renderer`: 2D canvas rendering (web only)
//! - `platform`: DOM lookups and pointer input (web only)
//! - `settings`: Player preferences (volumes, mute, seed)

pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioPlayer, ClipId, ClipKind, ClipSpec, HeadlessAudio};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (world units = canvas pixels)
    pub const WORLD_WIDTH: f32 = 1400.0;
    pub const WORLD_HEIGHT: f32 = 800.0;
    /// Camera looks a little further down than the canvas so the floor is visible
    pub const VIEWPORT_HEIGHT: f32 = WORLD_HEIGHT * 1.2;
    pub const BACKGROUND: &str = "peru";

    /// Downward acceleration applied to dynamic bodies (units/s²)
    pub const GRAVITY: f32 = 980.0;

    /// Sand bodies below the threshold line needed to end the game
    pub const GAME_OVER_LIMIT: usize = 120;

    /// Label carried by every countable sand particle
    pub const SAND_LABEL: &str = "sand";

    /// Drag constraint stiffness (0-1, fraction of the gap closed per step)
    pub const DRAG_STIFFNESS: f32 = 0.9;
}
