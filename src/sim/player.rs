//! The player character

use glam::Vec2;

use super::geometry::{Aabb, Arena};
use super::skill::SkillKind;
use crate::consts::*;
use crate::persistence::SaveRecord;

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Units per second
    pub speed: f32,
    pub attack_damage: f32,
    pub attacks_per_second: f32,
    /// Seconds until the next attack is allowed
    pub attack_cooldown: f32,
    pub size: Vec2,
    /// Learned skills in acquisition order (duplicates stack)
    pub skills: Vec<SkillKind>,
}

impl Player {
    pub fn new(pos: Vec2, max_health: f32, attack_damage: f32, attacks_per_second: f32) -> Self {
        Self {
            pos,
            health: max_health,
            max_health,
            speed: PLAYER_SPEED,
            attack_damage,
            attacks_per_second,
            attack_cooldown: 0.0,
            size: Vec2::splat(PLAYER_SIZE),
            skills: Vec::new(),
        }
    }

    /// Build a fresh player from persisted stats (full health, no skills)
    pub fn from_record(record: &SaveRecord) -> Self {
        Self::new(
            Vec2::new(record.player_x, record.player_y),
            record.max_health,
            record.attack_damage,
            record.attack_speed,
        )
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Count down the attack cooldown
    pub fn update(&mut self, dt: f32) {
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        }
    }

    pub fn can_attack(&self) -> bool {
        self.attack_cooldown <= 0.0
    }

    /// Restart the cooldown after an attack
    pub fn mark_attacked(&mut self) {
        self.attack_cooldown = 1.0 / self.attacks_per_second.max(MIN_ATTACKS_PER_SECOND);
    }

    /// Move along `dir` (caller normalizes). Each axis is kept only if it stays in the arena.
    pub fn move_by(&mut self, dir: Vec2, dt: f32, arena: &Arena) {
        let delta = dir * self.speed * dt;
        self.pos = arena.step_box(self.pos, delta, self.size);
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }

    /// Learn a skill. Stat boosts apply immediately and compound with earlier stacks.
    pub fn learn_skill(&mut self, kind: SkillKind) {
        self.skills.push(kind);
        match kind {
            SkillKind::AttackBoost => self.attack_damage *= ATTACK_BOOST_FACTOR,
            SkillKind::SpeedBoost => self.speed += SPEED_BOOST_INCREMENT,
            _ => {}
        }
    }

    pub fn skill_count(&self, kind: SkillKind) -> usize {
        self.skills.iter().filter(|&&k| k == kind).count()
    }

    pub fn has_skill(&self, kind: SkillKind) -> bool {
        self.skills.contains(&kind)
    }
}
