//! Flushes a framebuffer to the real terminal.
//!
//! The first frame (and any frame after a resize) is a full redraw; after that
//! only runs of changed cells are rewritten.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    QueueableCommand, cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use super::fb::{Cell, FrameBuffer};
use crate::platform::Color;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    enhanced_keys: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            enhanced_keys: false,
        }
    }

    /// True when the terminal reports key releases
    pub fn enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    /// Raw mode, alternate screen, mouse capture. If any step after raw mode
    /// fails the terminal is restored before the error is returned.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        let setup = self.setup_screen();
        restore_on_err(setup, || self.exit())
    }

    fn setup_screen(&mut self) -> Result<()> {
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.queue(EnableMouseCapture)?;

        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.enhanced_keys {
            self.stdout.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.stdout.flush()?;
        log::info!(
            "Terminal ready (key release events: {})",
            if self.enhanced_keys { "yes" } else { "no" }
        );
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if self.enhanced_keys {
            self.stdout.queue(PopKeyboardEnhancementFlags)?;
        }
        self.stdout.queue(DisableMouseCapture)?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize)
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Ring the terminal bell
    pub fn bell(&mut self) -> Result<()> {
        self.stdout.queue(Print('\x07'))?;
        Ok(())
    }

    /// Draw `fb`, diffing against the previous frame
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                self.diff_redraw(fb, &prev)?;
            }
            _ => self.full_redraw(fb)?,
        }
        self.last = Some(fb.clone());
        Ok(())
    }

    fn full_redraw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        let mut current: Option<(Color, Color)> = None;
        for y in 0..fb.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..fb.width() {
                let cell = fb.get(x, y).unwrap_or_default();
                self.print_cell(cell, &mut current)?;
            }
        }
        self.finish()
    }

    fn diff_redraw(&mut self, next: &FrameBuffer, prev: &FrameBuffer) -> Result<()> {
        let mut current: Option<(Color, Color)> = None;
        for y in 0..next.height() {
            let mut x = 0;
            while x < next.width() {
                if prev.get(x, y) == next.get(x, y) {
                    x += 1;
                    continue;
                }
                self.stdout.queue(cursor::MoveTo(x, y))?;
                while x < next.width() && prev.get(x, y) != next.get(x, y) {
                    let cell = next.get(x, y).unwrap_or_default();
                    self.print_cell(cell, &mut current)?;
                    x += 1;
                }
            }
        }
        self.finish()
    }

    fn print_cell(&mut self, cell: Cell, current: &mut Option<(Color, Color)>) -> Result<()> {
        let style = (cell.fg, cell.bg);
        if *current != Some(style) {
            self.stdout.queue(SetForegroundColor(to_term_color(cell.fg)))?;
            self.stdout.queue(SetBackgroundColor(to_term_color(cell.bg)))?;
            *current = Some(style);
        }
        self.stdout.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn to_term_color(c: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Run `restore` when `result` is an error, keeping the original error
fn restore_on_err<T>(result: Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    if result.is_err() {
        restore().unwrap_or_else(|e| log::error!("Failed to restore terminal: {}", e));
    }
    result
}
