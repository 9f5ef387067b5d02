//! Smoothed follow camera

use glam::Vec2;

use super::geometry::Arena;
use crate::consts::{CAMERA_LERP, SIM_DT};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Top-left of the viewport in world space
    pub pos: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            viewport,
        }
    }

    /// Ease toward centering `target`, then clamp so the view never leaves the map.
    ///
    /// The follow factor is `CAMERA_LERP` per nominal step and is rescaled for other `dt`.
    pub fn follow(&mut self, target: Vec2, dt: f32, arena: &Arena) {
        let desired = target - self.viewport * 0.5;
        let alpha = 1.0 - (1.0 - CAMERA_LERP).powf(dt / SIM_DT);
        self.pos += (desired - self.pos) * alpha;

        let hi = (arena.size() - self.viewport).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, hi);
    }

    /// Offset to subtract from world positions when drawing
    pub fn offset(&self) -> Vec2 {
        self.pos
    }

    /// Jump straight to `target` without easing (used after a reset)
    pub fn snap_to(&mut self, target: Vec2, arena: &Arena) {
        let hi = (arena.size() - self.viewport).max(Vec2::ZERO);
        self.pos = (target - self.viewport * 0.5).clamp(Vec2::ZERO, hi);
    }
}
