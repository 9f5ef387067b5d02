//! Projectiles and scheduled repeat volleys

use glam::Vec2;

use super::geometry::{Aabb, Arena};
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Projectile {
    /// Top-left corner
    pub pos: Vec2,
    /// Units per second, fixed at creation
    pub vel: Vec2,
    pub damage: f32,
    pub size: Vec2,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub active: bool,
    /// Keeps flying after hitting an enemy
    pub piercing: bool,
    /// Enemy IDs already damaged by this projectile
    pub hits: Vec<u32>,
}

impl Projectile {
    /// Projectile centered on `origin`, flying in a straight line toward `target`.
    /// Coincident points produce a stationary projectile that simply expires.
    pub fn aimed(origin: Vec2, target: Vec2, speed: f32, damage: f32) -> Self {
        let size = Vec2::splat(PROJECTILE_SIZE);
        Self {
            pos: origin - size * 0.5,
            vel: (target - origin).normalize_or_zero() * speed,
            damage,
            size,
            lifetime: 0.0,
            max_lifetime: PROJECTILE_MAX_LIFETIME,
            active: true,
            piercing: false,
            hits: Vec::new(),
        }
    }

    pub fn with_piercing(mut self, piercing: bool) -> Self {
        self.piercing = piercing;
        self
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Advance position and age; deactivate once it leaves the arena or expires
    pub fn update(&mut self, dt: f32, arena: &Arena) {
        if !self.active {
            return;
        }

        self.pos += self.vel * dt;
        self.lifetime += dt;

        let out_of_bounds = self.pos.x < -self.size.x
            || self.pos.x > arena.width + self.size.x
            || self.pos.y < -self.size.y
            || self.pos.y > arena.height + self.size.y;

        if out_of_bounds || self.lifetime >= self.max_lifetime {
            self.active = false;
        }
    }

    pub fn has_hit(&self, enemy_id: u32) -> bool {
        self.hits.contains(&enemy_id)
    }
}

/// A volley queued to fire later at a fixed aim point (Multishot)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayedShot {
    pub ticks_remaining: u32,
    pub target: Vec2,
}
