//! Collision primitives
//!
//! Everything in the arena is an axis-aligned box. A single half-open overlap
//! test is shared by player/enemy, player/potion and projectile/enemy checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Half-open overlap test: boxes that only touch along an edge do not collide
pub fn collides(a: &Aabb, b: &Aabb) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector from `from` toward `to`, or `fallback` when the points coincide
#[inline]
pub fn direction(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    (to - from).normalize_or(fallback)
}

/// Rectangular playfield in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether a box of `size` at `x` stays inside horizontally
    pub fn fits_x(&self, x: f32, size: Vec2) -> bool {
        x >= 0.0 && x <= self.width - size.x
    }

    /// Whether a box of `size` at `y` stays inside vertically
    pub fn fits_y(&self, y: f32, size: Vec2) -> bool {
        y >= 0.0 && y <= self.height - size.y
    }

    /// Pull a box position inside the arena
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let hi = (self.size() - size).max(Vec2::ZERO);
        pos.clamp(Vec2::ZERO, hi)
    }

    /// Move `pos` by `delta`, applying each axis only if it keeps the box inside.
    /// A blocked axis never blocks the other one.
    pub fn step_box(&self, pos: Vec2, delta: Vec2, size: Vec2) -> Vec2 {
        let next = pos + delta;
        let mut out = pos;
        if self.fits_x(next.x, size) {
            out.x = next.x;
        }
        if self.fits_y(next.y, size) {
            out.y = next.y;
        }
        out
    }
}
