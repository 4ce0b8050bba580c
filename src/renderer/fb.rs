//! Character-cell framebuffer
//!
//! World geometry (1600x900 units) is rasterized into terminal cells. Each
//! cell carries a glyph and a foreground/background color.

use glam::Vec2;

use crate::platform::Color;
use crate::sim::Rect;

/// A single terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::WHITE,
            bg: Color::BLACK,
        }
    }
}

/// 2D framebuffer of styled character cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    #[inline]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell {
            bg,
            ..Cell::default()
        });
    }

    /// Paint a glyph, keeping whatever background is already there
    fn put_char(&mut self, x: u16, y: u16, ch: char, fg: Color) {
        if let Some(i) = self.idx(x, y) {
            let bg = self.cells[i].bg;
            self.cells[i] = Cell { ch, fg, bg };
        }
    }

    fn fill_cells(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: Color) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.set(
                    x,
                    y,
                    Cell {
                        ch: ' ',
                        fg: color,
                        bg: color,
                    },
                );
            }
        }
    }
}

/// Maps world units onto a framebuffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Cells per world unit on each axis
    pub scale: Vec2,
}

impl Viewport {
    pub fn new(world: Vec2, cols: u16, rows: u16) -> Self {
        Self {
            scale: Vec2::new(cols as f32 / world.x, rows as f32 / world.y),
        }
    }

    /// World point to the cell containing it
    pub fn to_cell(&self, p: Vec2) -> (i32, i32) {
        let c = p * self.scale;
        (c.x.floor() as i32, c.y.floor() as i32)
    }

    /// Cell center back to world coordinates
    pub fn to_world(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(col as f32 + 0.5, row as f32 + 0.5) / self.scale
    }
}

/// Rasterize a rectangle; anything with area covers at least one cell
pub fn fill_rect(fb: &mut FrameBuffer, view: &Viewport, rect: Rect, color: Color) {
    let (x0, y0) = view.to_cell(Vec2::new(rect.x, rect.y));
    let (x1, y1) = view.to_cell(Vec2::new(rect.right(), rect.bottom()));
    let x1 = x1.max(x0 + 1);
    let y1 = y1.max(y0 + 1);
    fb.fill_cells(
        clamp_u16(x0),
        clamp_u16(y0),
        clamp_u16(x1),
        clamp_u16(y1),
        color,
    );
}

/// Rasterize a circle as the cells whose centers fall inside it
pub fn fill_circle(fb: &mut FrameBuffer, view: &Viewport, center: Vec2, radius: f32, color: Color) {
    let (cx, cy) = view.to_cell(center);
    let mut painted = false;
    let (x0, y0) = view.to_cell(center - Vec2::splat(radius));
    let (x1, y1) = view.to_cell(center + Vec2::splat(radius));
    for y in y0.max(0)..=y1 {
        for x in x0.max(0)..=x1 {
            let cell_center = view.to_world(clamp_u16(x), clamp_u16(y));
            if cell_center.distance_squared(center) <= radius * radius {
                fb.put_char(clamp_u16(x), clamp_u16(y), '●', color);
                painted = true;
            }
        }
    }
    if !painted && cx >= 0 && cy >= 0 {
        fb.put_char(clamp_u16(cx), clamp_u16(cy), '●', color);
    }
}

/// Write text starting at the cell containing `pos`
pub fn put_text(fb: &mut FrameBuffer, view: &Viewport, text: &str, pos: Vec2, color: Color) {
    let (x, y) = view.to_cell(pos);
    if y < 0 {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if cx < 0 {
            continue;
        }
        fb.put_char(clamp_u16(cx), clamp_u16(y), ch, color);
    }
}

fn clamp_u16(v: i32) -> u16 {
    v.clamp(0, u16::MAX as i32) as u16
}
