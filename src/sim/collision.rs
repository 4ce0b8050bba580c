//! Collision detection for axis-aligned geometry
//!
//! Everything on the playfield is either an axis-aligned rectangle (paddle,
//! blocks, items, menu buttons) or a circle (the ball), so three tests cover
//! the whole game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `x`/`y` is the top-left corner (screen space, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point containment, half-open on the right/bottom edges
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Check whether a circle intersects a rectangle
///
/// Works on the distance from the circle center to the rectangle center so the
/// corner case reduces to a single squared-distance comparison.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let half = Vec2::new(rect.width / 2.0, rect.height / 2.0);
    let delta = (center - rect.center()).abs();

    if delta.x > half.x + radius || delta.y > half.y + radius {
        return false;
    }
    if delta.x <= half.x || delta.y <= half.y {
        return true;
    }

    (delta - half).length_squared() <= radius * radius
}

/// Negate a velocity component only if it points toward the wall being hit.
///
/// `outward` is the sign of the wall's outward direction on that axis
/// (-1.0 for the left/top walls, +1.0 for the right wall).
#[inline]
pub fn reflect_axis(velocity: f32, outward: f32) -> f32 {
    if velocity * outward > 0.0 {
        -velocity
    } else {
        velocity
    }
}
