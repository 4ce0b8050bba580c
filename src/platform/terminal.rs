//! crossterm-backed platform
//!
//! Draws into a character framebuffer scaled from world units, reads keys and
//! mouse events from the terminal, and paces frames with a sleep. Sounds are
//! reduced to the terminal bell.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use glam::Vec2;

use super::{Color, Key, Platform};
use crate::audio::{Mixer, MusicTrack, SoundEffect};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::fb::{self, FrameBuffer, Viewport};
use crate::renderer::TerminalRenderer;
use crate::sim::Rect;

// Terminals without key-release events only send repeats while a key is held.
// A key counts as held until this long after its last press/repeat.
const KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

pub struct TerminalPlatform {
    renderer: TerminalRenderer,
    fb: FrameBuffer,
    view: Viewport,
    mixer: Mixer,

    frame_budget: Duration,
    frame_start: Instant,
    close_requested: bool,

    pointer: Vec2,
    clicked: bool,
    held: HashMap<Key, Instant>,
    pressed: Vec<Key>,
    pending_bell: bool,
    music: Option<MusicTrack>,
}

impl TerminalPlatform {
    /// Take over the terminal. Call [`TerminalPlatform::shutdown`] to restore it.
    pub fn new(target_fps: u32, mixer: Mixer) -> Result<Self> {
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));

        Ok(Self {
            renderer,
            fb: FrameBuffer::new(cols, rows),
            view: world_view(cols, rows),
            mixer,
            frame_budget: Duration::from_secs(1) / target_fps.max(1),
            frame_start: Instant::now(),
            close_requested: false,
            pointer: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            clicked: false,
            held: HashMap::new(),
            pressed: Vec::new(),
            pending_bell: false,
            music: None,
        })
    }

    /// Restore the terminal
    pub fn shutdown(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.fb.resize(cols, rows);
        self.view = world_view(cols, rows);
        self.renderer.invalidate();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Press && is_quit(&key) {
            self.close_requested = true;
            return;
        }
        let Some(mapped) = map_key(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => {
                if !self.held.contains_key(&mapped) {
                    self.pressed.push(mapped);
                }
                self.held.insert(mapped, Instant::now());
            }
            KeyEventKind::Repeat => {
                self.held.insert(mapped, Instant::now());
            }
            KeyEventKind::Release => {
                self.held.remove(&mapped);
            }
        }
    }

    fn drain_events(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => {
                    self.pointer = self.view.to_world(mouse.column, mouse.row);
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        self.clicked = true;
                    }
                }
                Event::Resize(cols, rows) => self.resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Drop keys whose release we never saw
    fn expire_held_keys(&mut self) {
        if self.renderer.enhanced_keys() {
            return;
        }
        let now = Instant::now();
        self.held.retain(|_, last| now.duration_since(*last) < KEY_RELEASE_TIMEOUT);
    }
}

impl Platform for TerminalPlatform {
    fn begin_frame(&mut self) -> Result<()> {
        self.frame_start = Instant::now();
        self.pressed.clear();
        self.clicked = false;
        self.expire_held_keys();
        self.drain_events()
    }

    fn end_frame(&mut self) -> Result<()> {
        if self.pending_bell {
            self.renderer.bell()?;
            self.pending_bell = false;
        }
        self.renderer.draw(&self.fb)?;

        if let Some(remaining) = self.frame_budget.checked_sub(self.frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn clear(&mut self, color: Color) {
        self.fb.clear(color);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        fb::fill_rect(&mut self.fb, &self.view, rect, color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        fb::fill_circle(&mut self.fb, &self.view, center, radius, color);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, _size: f32, color: Color) {
        fb::put_text(&mut self.fb, &self.view, text, pos, color);
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    fn pointer_pressed(&self) -> bool {
        self.clicked
    }

    fn key_down(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn play_sound(&mut self, effect: SoundEffect) {
        log::debug!("Sound: {}", effect.asset_name());
        if self.mixer.sfx_gain() > 0.0 {
            self.pending_bell = true;
        }
    }

    fn play_music(&mut self, track: MusicTrack) {
        if self.mixer.music_gain() > 0.0 {
            log::info!("Music {} requested (no music output in terminal)", track.asset_name());
        }
        self.music = Some(track);
    }

    fn update_music(&mut self) {}
}

fn world_view(cols: u16, rows: u16) -> Viewport {
    Viewport::new(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), cols, rows)
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::A),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::D),
        KeyCode::Char('1') => Some(Key::One),
        KeyCode::Char('2') => Some(Key::Two),
        KeyCode::Char('3') => Some(Key::Three),
        KeyCode::Enter => Some(Key::Enter),
        _ => None,
    }
}
