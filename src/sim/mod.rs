//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (the step is passed to every time-based update)
//! - Seeded RNG only
//! - Stable iteration order (entities keep insertion order)
//! - No rendering, input polling or file I/O

pub mod camera;
pub mod combat;
pub mod enemy;
pub mod geometry;
pub mod player;
pub mod projectile;
pub mod skill;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use camera::Camera;
pub use enemy::{Enemy, EnemyMode};
pub use geometry::{Aabb, Arena, collides, direction, distance};
pub use player::Player;
pub use projectile::{DelayedShot, Projectile};
pub use skill::{OFFER_COUNT, Skill, SkillKind, roll_offers};
pub use snapshot::{EntityView, FrameSnapshot, ProjectileView};
pub use state::{GameEvent, GamePhase, GameState, PiercingRule, Potion};
pub use tick::{TickInput, tick};
pub use wave::{WaveState, spawn_position, spawn_position_in};
