//! Pixel Archer - A top-down auto-attack arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, skills, waves, combat, camera)
//! - `tilemap`: Read-only tile map asset (teleport gate lookup)
//! - `persistence`: Flat player stats record, load/save
//! - `settings`: Runtime configuration
//! - `session`: Fixed-step frame driver and persistence side effects

pub mod error;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tilemap;

pub use error::{Error, Result};
pub use persistence::SaveRecord;
pub use session::{FixedStepClock, Session};
pub use settings::Settings;
pub use tilemap::TileMap;

use glam::Vec2;

/// Game configuration constants
///
/// Speeds are in units per second. Tuning was done per
/// frame at 60 Hz, so each speed below is the per-frame value times 60.
pub mod consts {
    /// Fixed simulation timestep (nominal 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame the clock will account for (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 16.0;
    pub const PLAYER_SPEED: f32 = 3.2 * 60.0;
    /// Added to player speed per SpeedBoost stack
    pub const SPEED_BOOST_INCREMENT: f32 = 0.5 * 60.0;
    /// Multiplier applied to attack damage per AttackBoost stack
    pub const ATTACK_BOOST_FACTOR: f32 = 1.2;
    /// Attack speed floor so the cooldown never divides by zero
    pub const MIN_ATTACKS_PER_SECOND: f32 = 0.01;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 16.0;
    pub const ENEMY_HEALTH: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 1.2 * 60.0;
    pub const ENEMY_CONTACT_DAMAGE: f32 = 5.0;
    pub const ENEMY_FOLLOW_DISTANCE: f32 = 400.0;
    /// Speed multiplier while dashing
    pub const DASH_SPEED_MULTIPLIER: f32 = 1.8;
    /// Grace period after spawning before the first dash
    pub const ENEMY_SPAWN_REST: f32 = 1.0;
    pub const ENEMY_DASH_DURATION: f32 = 1.2;
    pub const ENEMY_REST_DURATION: f32 = 0.8;
    /// Countdowns at or below this are treated as expired (absorbs f32 drift)
    pub const TIMER_EPSILON: f32 = 1e-4;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 8.0;
    pub const PROJECTILE_SPEED: f32 = 4.5 * 60.0;
    pub const PROJECTILE_MAX_LIFETIME: f32 = 5.0;

    /// Perpendicular gap between ParallelShot projectiles
    pub const PARALLEL_SPACING: f32 = 5.0;
    /// Ticks between Multishot repeat volleys
    pub const MULTISHOT_DELAY_TICKS: u32 = 8;
    /// DiagonalArrow side angle (30 degrees)
    pub const DIAGONAL_ANGLE: f32 = std::f32::consts::FRAC_PI_6;
    /// Virtual range of the DiagonalArrow aim points
    pub const DIAGONAL_RANGE: f32 = 200.0;

    /// Potion defaults
    pub const POTION_SIZE: f32 = 16.0;
    pub const POTION_HEAL: f32 = 20.0;
    pub const POTION_DROP_CHANCE: f64 = 0.3;

    /// Wave defaults
    pub const WAVE_BASE_ENEMIES: u32 = 5;
    pub const WAVE_ENEMIES_PER_WAVE: u32 = 2;
    pub const WAVE_BASE_INTERVAL: f32 = 1.0;
    pub const WAVE_INTERVAL_STEP: f32 = 0.05;
    pub const WAVE_MIN_INTERVAL: f32 = 0.3;
    /// Spawn ring around the player
    pub const SPAWN_MIN_RADIUS: f32 = 150.0;
    pub const SPAWN_RADIUS_SPREAD: f32 = 100.0;

    /// Camera follow factor per nominal step
    pub const CAMERA_LERP: f32 = 0.1;

    /// Tile ID of the teleport gate in the map data
    pub const TELEPORT_GATE_TILE: u32 = 159;

    /// Autopilot steps away from enemies closer than this
    pub const AUTOPILOT_FLEE_DISTANCE: f32 = 48.0;

    /// Default arena and viewport (pixels)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 960.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 540.0;
}

/// Unit vector for an angle in radians
#[inline]
pub fn angle_to_dir(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Perpendicular of a direction (rotated +90 degrees)
#[inline]
pub fn perpendicular(dir: Vec2) -> Vec2 {
    Vec2::new(-dir.y, dir.x)
}
