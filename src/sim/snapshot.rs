//! Read-only frame snapshot for renderers
//!
//! Copies just what a drawing collaborator needs so it never touches the
//! live entity lists.

use glam::Vec2;

use super::skill::{OFFER_COUNT, Skill};
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq)]
pub struct EntityView {
    pub pos: Vec2,
    pub size: Vec2,
    /// Health as a fraction of max (1.0 for entities without health)
    pub health_ratio: f32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub piercing: bool,
}

#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub camera_offset: Vec2,
    pub wave: u32,
    pub player: EntityView,
    pub enemies: Vec<EntityView>,
    pub projectiles: Vec<ProjectileView>,
    pub potions: Vec<EntityView>,
    /// Offers to show while the skill menu is open
    pub skill_offers: Option<[Skill; OFFER_COUNT]>,
    /// Show the "press E" hint over the player
    pub on_gate: bool,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;

        let enemies = state
            .enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| EntityView {
                pos: e.pos,
                size: e.size,
                health_ratio: e.health_ratio(),
                active: e.active,
            })
            .collect();

        let projectiles = state
            .projectiles
            .iter()
            .filter(|p| p.active)
            .map(|p| ProjectileView {
                pos: p.pos,
                size: p.size,
                active: p.active,
                piercing: p.piercing,
            })
            .collect();

        let potions = state
            .potions
            .iter()
            .map(|p| EntityView {
                pos: p.pos,
                size: p.size,
                health_ratio: 1.0,
                active: true,
            })
            .collect();

        let skill_offers = (state.phase == GamePhase::SkillSelect)
            .then(|| state.skill_offers.map(|kind| kind.info()));

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            camera_offset: state.camera.offset(),
            wave: state.wave.wave,
            player: EntityView {
                pos: player.pos,
                size: player.size,
                health_ratio: player.health_ratio(),
                active: player.is_alive(),
            },
            enemies,
            projectiles,
            potions,
            skill_offers,
            on_gate: state.on_gate,
        }
    }

    /// Screen-space position of a world point
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.camera_offset
    }
}
