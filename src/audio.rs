//! Sound identifiers and volume rules
//!
//! The platform owns the actual output device; this module only says which
//! sounds exist and how loud they should be.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Block destroyed
    BlockBreak,
    /// Last life lost
    GameOver,
    /// Win threshold reached
    GameClear,
}

impl SoundEffect {
    /// Asset file name a sample-based backend would load
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::BlockBreak => "block_break.wav",
            SoundEffect::GameOver => "game_over.wav",
            SoundEffect::GameClear => "game_clear.wav",
        }
    }
}

/// Looping music streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Background,
}

impl MusicTrack {
    pub fn asset_name(&self) -> &'static str {
        match self {
            MusicTrack::Background => "background_music.wav",
        }
    }
}

/// Volume state shared by every backend
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Mixer {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective volume for sound effects
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective volume for music
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}
