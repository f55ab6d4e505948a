//! Audio playback
//!
//! The game uses two clips: looping background music started with the game,
//! and a one-shot explosion at game over. Clips are loaded once and played by
//! handle through the `AudioPlayer` trait.

/// Which volume channel a clip belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKind {
    Music,
    Effect,
}

/// A clip to load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSpec {
    pub src: &'static str,
    pub kind: ClipKind,
    pub looping: bool,
    /// Clip's own volume (0.0 - 1.0), scaled by the player's channel volume
    pub volume: f32,
}

/// Background track
pub const BACKGROUND_MUSIC: ClipSpec = ClipSpec {
    src: "./sound/こんとどぅふぇ素材No.0173-冬眠終了！.mp3",
    kind: ClipKind::Music,
    looping: true,
    volume: 0.5,
};

/// Game-over explosion
pub const EXPLOSION: ClipSpec = ClipSpec {
    src: "./sound/nc9232.mp3",
    kind: ClipKind::Effect,
    looping: false,
    volume: 0.5,
};

/// Handle returned by `AudioPlayer::load`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(pub usize);

/// Clip loading and playback
pub trait AudioPlayer {
    fn load(&mut self, clip: ClipSpec) -> ClipId;
    fn play(&mut self, clip: ClipId);
}

/// Player with no output device; remembers what it was asked to play
#[derive(Debug, Default, Clone)]
pub struct HeadlessAudio {
    clips: Vec<ClipSpec>,
    played: Vec<ClipId>,
}

impl HeadlessAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clips(&self) -> &[ClipSpec] {
        &self.clips
    }

    /// Every `play` call, in order
    pub fn played(&self) -> &[ClipId] {
        &self.played
    }

    /// How many times `clip` was played
    pub fn play_count(&self, clip: ClipId) -> usize {
        self.played.iter().filter(|&&c| c == clip).count()
    }
}

impl AudioPlayer for HeadlessAudio {
    fn load(&mut self, clip: ClipSpec) -> ClipId {
        self.clips.push(clip);
        ClipId(self.clips.len() - 1)
    }

    fn play(&mut self, clip: ClipId) {
        match self.clips.get(clip.0) {
            Some(spec) => log::debug!("(headless) play {}", spec.src),
            None => log::warn!("(headless) play of unknown clip {:?}", clip),
        }
        self.played.push(clip);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::{AudioPlayer, ClipId, ClipKind, ClipSpec};
    use crate::settings::Settings;

    /// `<audio>` element per clip
    pub struct WebAudio {
        clips: Vec<(ClipSpec, Option<HtmlAudioElement>)>,
        master_volume: f32,
        music_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            Self {
                clips: Vec::new(),
                master_volume: settings.master_volume.clamp(0.0, 1.0),
                music_volume: settings.music_volume.clamp(0.0, 1.0),
                sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
                muted: settings.muted,
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            for (spec, element) in &self.clips {
                if let Some(element) = element {
                    element.set_volume(self.effective_volume(spec) as f64);
                }
            }
        }

        fn effective_volume(&self, clip: &ClipSpec) -> f32 {
            if self.muted {
                return 0.0;
            }
            let channel = match clip.kind {
                ClipKind::Music => self.music_volume,
                ClipKind::Effect => self.sfx_volume,
            };
            clip.volume * self.master_volume * channel
        }
    }

    impl AudioPlayer for WebAudio {
        fn load(&mut self, clip: ClipSpec) -> ClipId {
            let element = match HtmlAudioElement::new_with_src(clip.src) {
                Ok(element) => {
                    element.set_loop(clip.looping);
                    element.set_volume(self.effective_volume(&clip) as f64);
                    Some(element)
                }
                Err(e) => {
                    log::warn!("Failed to create audio element for {}: {:?}", clip.src, e);
                    None
                }
            };
            self.clips.push((clip, element));
            ClipId(self.clips.len() - 1)
        }

        fn play(&mut self, clip: ClipId) {
            let Some((spec, Some(element))) = self.clips.get(clip.0) else {
                return;
            };
            if !spec.looping {
                element.set_current_time(0.0);
            }
            // Autoplay may be blocked until the first user gesture
            if let Err(e) = element.play() {
                log::warn!("Audio play rejected for {}: {:?}", spec.src, e);
            }
        }
    }
}
