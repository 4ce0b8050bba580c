//! Platform abstraction layer
//!
//! The game loop only needs a handful of capabilities from whatever is hosting
//! it:
//! - Frame lifecycle and pacing
//! - Draw primitives (rectangle, circle, text)
//! - Pointer and key state
//! - Sound effect and music playback
//!
//! `terminal` backs these with crossterm, `headless` records them for tests.

pub mod headless;
pub mod terminal;

use anyhow::Result;
use glam::Vec2;

use crate::audio::{MusicTrack, SoundEffect};
use crate::sim::Rect;

pub use headless::HeadlessPlatform;
pub use terminal::TerminalPlatform;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GRAY: Color = Color::new(130, 130, 130);
    pub const LIGHT_GRAY: Color = Color::new(200, 200, 200);
    pub const DARK_GRAY: Color = Color::new(80, 80, 80);
    pub const GREEN: Color = Color::new(0, 228, 48);
    pub const BLUE: Color = Color::new(0, 121, 241);
    pub const ORANGE: Color = Color::new(255, 161, 0);
    pub const RED: Color = Color::new(230, 41, 55);
    pub const MAROON: Color = Color::new(190, 33, 55);
    pub const GOLD: Color = Color::new(255, 203, 0);
    pub const PURPLE: Color = Color::new(200, 122, 255);
    pub const YELLOW: Color = Color::new(253, 249, 0);
}

/// Keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    One,
    Two,
    Three,
    Enter,
}

/// Everything the game loop needs from its host
pub trait Platform {
    /// Collect input for the coming frame
    fn begin_frame(&mut self) -> Result<()>;
    /// Present the frame and wait out the rest of the frame budget
    fn end_frame(&mut self) -> Result<()>;
    /// Host asked to quit
    fn should_close(&self) -> bool;

    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Draw text with its top-left corner at `pos`; `size` is the nominal font height
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);

    /// Pointer position in world coordinates
    fn pointer_position(&self) -> Vec2;
    /// Primary button went down this frame
    fn pointer_pressed(&self) -> bool;
    /// Key is currently held
    fn key_down(&self, key: Key) -> bool;
    /// Key went down this frame
    fn key_pressed(&self, key: Key) -> bool;

    fn play_sound(&mut self, effect: SoundEffect);
    fn play_music(&mut self, track: MusicTrack);
    /// Keep the music stream fed; called once per frame
    fn update_music(&mut self);
}
