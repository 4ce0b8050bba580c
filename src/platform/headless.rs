//! Scripted platform with no output device
//!
//! Input is set directly by the caller, draw calls and sounds are recorded.
//! One-shot inputs (pressed keys, clicks) last exactly one frame.

use anyhow::Result;
use glam::Vec2;

use super::{Color, Key, Platform};
use crate::audio::{MusicTrack, SoundEffect};
use crate::sim::Rect;

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    /// Frames presented so far
    pub frames: u64,
    /// Close after this many frames
    pub max_frames: Option<u64>,

    pub pointer: Vec2,
    pub clicked: bool,
    pub held: Vec<Key>,
    pub pressed: Vec<Key>,

    /// Text drawn during the last frame
    pub texts: Vec<String>,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub sounds: Vec<SoundEffect>,
    pub music: Option<MusicTrack>,
    pub music_updates: u64,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_frames(max_frames: u64) -> Self {
        Self {
            max_frames: Some(max_frames),
            ..Self::default()
        }
    }

    /// Queue a key press for the next frame
    pub fn press(&mut self, key: Key) {
        self.pressed.push(key);
    }

    /// Queue a click at `pos` for the next frame
    pub fn click(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.clicked = true;
    }

    pub fn drew_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

impl Platform for HeadlessPlatform {
    fn begin_frame(&mut self) -> Result<()> {
        self.texts.clear();
        self.rects_drawn = 0;
        self.circles_drawn = 0;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.frames += 1;
        self.pressed.clear();
        self.clicked = false;
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.max_frames.is_some_and(|max| self.frames >= max)
    }

    fn clear(&mut self, _color: Color) {}

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {
        self.rects_drawn += 1;
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.circles_drawn += 1;
    }

    fn draw_text(&mut self, text: &str, _pos: Vec2, _size: f32, _color: Color) {
        self.texts.push(text.to_string());
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    fn pointer_pressed(&self) -> bool {
        self.clicked
    }

    fn key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }

    fn play_music(&mut self, track: MusicTrack) {
        self.music = Some(track);
    }

    fn update_music(&mut self) {
        if self.music.is_some() {
            self.music_updates += 1;
        }
    }
}
