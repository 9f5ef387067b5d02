//! Wave scheduling and difficulty progression
//!
//! The wave state only decides *when* an enemy is due. Creating it is the
//! orchestrator's job, so `update` returns a spawn signal instead of an enemy.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Arena;
use crate::angle_to_dir;
use crate::consts::*;

/// Random ring samples tried before sweeping the ring
const SPAWN_ATTEMPTS: usize = 16;
/// Angles checked per radius when sweeping
const SPAWN_SWEEP_STEPS: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    /// Current wave number (1-based)
    pub wave: u32,
    pub enemies_per_wave: u32,
    pub enemies_spawned: u32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub spawn_timer: f32,
    /// Every enemy of this wave has been signalled
    pub complete: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            wave: 1,
            enemies_per_wave: WAVE_BASE_ENEMIES,
            enemies_spawned: 0,
            spawn_interval: WAVE_BASE_INTERVAL,
            spawn_timer: 0.0,
            complete: false,
        }
    }
}

/// Enemy count for a wave
pub fn enemies_for_wave(wave: u32) -> u32 {
    WAVE_BASE_ENEMIES + wave * WAVE_ENEMIES_PER_WAVE
}

/// Spawn interval for a wave, floored so late waves stay playable
pub fn interval_for_wave(wave: u32) -> f32 {
    (WAVE_BASE_INTERVAL - wave as f32 * WAVE_INTERVAL_STEP).max(WAVE_MIN_INTERVAL)
}

impl WaveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate spawn time. Returns true when one more enemy should be materialized.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.complete {
            return false;
        }

        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval && self.enemies_spawned < self.enemies_per_wave {
            self.spawn_timer = 0.0;
            self.enemies_spawned += 1;
            self.complete = self.all_spawned();
            return true;
        }
        false
    }

    pub fn all_spawned(&self) -> bool {
        self.enemies_spawned >= self.enemies_per_wave
    }

    /// Every enemy of the wave has spawned and none is left alive
    pub fn is_wave_clear(&self, live_enemies: usize) -> bool {
        self.all_spawned() && live_enemies == 0
    }

    /// Start the next wave: more enemies, shorter interval
    pub fn advance(&mut self) {
        self.wave += 1;
        self.enemies_per_wave = enemies_for_wave(self.wave);
        self.enemies_spawned = 0;
        self.complete = false;
        self.spawn_timer = 0.0;
        self.spawn_interval = interval_for_wave(self.wave);
    }

    /// Back to wave 1
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Random point on a ring around the player: angle in [0, 2π), radius in [150, 250)
pub fn spawn_position<R: Rng + ?Sized>(player_pos: Vec2, rng: &mut R) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let radius = SPAWN_MIN_RADIUS + rng.random::<f32>() * SPAWN_RADIUS_SPREAD;
    player_pos + angle_to_dir(angle) * radius
}

/// Ring spawn point where a box of `size` fits inside `arena`.
///
/// Resamples the ring a few times, then sweeps it for the fitting point
/// farthest from the walls. Clamping a random ring point is the last resort,
/// for arenas too small to hold any part of the ring.
pub fn spawn_position_in<R: Rng + ?Sized>(
    player_pos: Vec2,
    arena: &Arena,
    size: Vec2,
    rng: &mut R,
) -> Vec2 {
    let fits = |p: Vec2| arena.fits_x(p.x, size) && arena.fits_y(p.y, size);

    for _ in 0..SPAWN_ATTEMPTS {
        let pos = spawn_position(player_pos, rng);
        if fits(pos) {
            return pos;
        }
    }

    let wall_margin = |p: Vec2| {
        let far = arena.size() - size - p;
        p.x.min(p.y).min(far.x).min(far.y)
    };
    let radii = [
        SPAWN_MIN_RADIUS,
        SPAWN_MIN_RADIUS + SPAWN_RADIUS_SPREAD * 0.5,
        SPAWN_MIN_RADIUS + SPAWN_RADIUS_SPREAD * 0.99,
    ];
    let best = radii
        .iter()
        .flat_map(|&r| {
            (0..SPAWN_SWEEP_STEPS).map(move |i| {
                let angle = i as f32 / SPAWN_SWEEP_STEPS as f32 * std::f32::consts::TAU;
                player_pos + angle_to_dir(angle) * r
            })
        })
        .filter(|&p| fits(p))
        .max_by(|a, b| {
            wall_margin(*a)
                .partial_cmp(&wall_margin(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match best {
        Some(pos) => pos,
        None => arena.clamp_box(spawn_position(player_pos, rng), size),
    }
}
