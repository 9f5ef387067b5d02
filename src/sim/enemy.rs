//! Enemies and their rest/dash behavior
//!
//! Enemies alternate between standing still and dashing at the player on a
//! fixed schedule. The schedule does not depend on where the player is; only
//! the dash movement does.

use glam::Vec2;

use super::geometry::{Aabb, Arena};
use crate::consts::*;

/// Two-phase behavior, each phase carrying its own countdown (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyMode {
    Resting { remaining: f32 },
    Dashing { remaining: f32 },
}

impl EnemyMode {
    /// Mode of a freshly spawned enemy (short grace period before the first dash)
    pub fn spawned() -> Self {
        EnemyMode::Resting {
            remaining: ENEMY_SPAWN_REST,
        }
    }

    pub fn remaining(&self) -> f32 {
        match *self {
            EnemyMode::Resting { remaining } | EnemyMode::Dashing { remaining } => remaining,
        }
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self, EnemyMode::Dashing { .. })
    }

    /// Count down by `dt` and flip to the other phase once the countdown runs out
    pub fn advance(self, dt: f32) -> Self {
        match self {
            EnemyMode::Resting { remaining } => {
                let remaining = remaining - dt;
                if remaining <= TIMER_EPSILON {
                    EnemyMode::Dashing {
                        remaining: ENEMY_DASH_DURATION,
                    }
                } else {
                    EnemyMode::Resting { remaining }
                }
            }
            EnemyMode::Dashing { remaining } => {
                let remaining = remaining - dt;
                if remaining <= TIMER_EPSILON {
                    EnemyMode::Resting {
                        remaining: ENEMY_REST_DURATION,
                    }
                } else {
                    EnemyMode::Dashing { remaining }
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Units per second at walking pace
    pub speed: f32,
    /// Damage dealt to the player per tick of contact
    pub damage: f32,
    pub size: Vec2,
    /// Aggro range: no dash movement beyond this distance
    pub follow_distance: f32,
    pub mode: EnemyMode,
    pub active: bool,
}

impl Enemy {
    pub fn new(
        id: u32,
        pos: Vec2,
        max_health: f32,
        speed: f32,
        damage: f32,
        follow_distance: f32,
    ) -> Self {
        Self {
            id,
            pos,
            health: max_health,
            max_health,
            speed,
            damage,
            size: Vec2::splat(ENEMY_SIZE),
            follow_distance,
            mode: EnemyMode::spawned(),
            active: true,
        }
    }

    /// Standard wave enemy
    pub fn standard(id: u32, pos: Vec2) -> Self {
        Self::new(
            id,
            pos,
            ENEMY_HEALTH,
            ENEMY_SPEED,
            ENEMY_CONTACT_DAMAGE,
            ENEMY_FOLLOW_DISTANCE,
        )
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Distance from the box center to a point
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.center().distance(point)
    }

    pub fn is_alive(&self) -> bool {
        self.active && self.health > 0.0
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            (self.health / self.max_health).clamp(0.0, 1.0)
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.active = false;
        }
    }

    /// Advance the behavior timer, then dash toward `target` (the player's corner)
    /// if in the dashing phase and within aggro range.
    pub fn update(&mut self, target: Vec2, dt: f32, arena: &Arena) {
        if !self.is_alive() {
            self.active = false;
            return;
        }

        self.mode = self.mode.advance(dt);

        if self.mode.is_dashing() {
            let to_target = target - self.pos;
            let dist = to_target.length();
            if dist > 0.0 && dist < self.follow_distance {
                let step = to_target / dist * self.speed * DASH_SPEED_MULTIPLIER * dt;
                self.pos = arena.step_box(self.pos, step, self.size);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big_arena() -> Arena {
        Arena::new(2000.0, 2000.0)
    }

    #[test]
    fn test_mode_oscillation() {
        let mut mode = EnemyMode::spawned();
        for _ in 0..59 {
            mode = mode.advance(SIM_DT);
            assert!(!mode.is_dashing());
        }
        mode = mode.advance(SIM_DT);
        assert_eq!(mode, EnemyMode::Dashing { remaining: 1.2 });

        for _ in 0..71 {
            mode = mode.advance(SIM_DT);
            assert!(mode.is_dashing());
        }
        mode = mode.advance(SIM_DT);
        assert_eq!(mode, EnemyMode::Resting { remaining: 0.8 });

        // Rest phase is 48 ticks
        for _ in 0..47 {
            mode = mode.advance(SIM_DT);
            assert!(!mode.is_dashing());
        }
        mode = mode.advance(SIM_DT);
        assert!(mode.is_dashing());
    }

    #[test]
    fn test_oscillation_ignores_player_distance() {
        let arena = big_arena();
        // Player far outside aggro range
        let far = Vec2::new(1900.0, 1900.0);
        let mut e = Enemy::standard(1, Vec2::new(10.0, 10.0));
        for _ in 0..60 {
            e.update(far, SIM_DT, &arena);
        }
        assert!(e.mode.is_dashing());
        assert_eq!(e.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_resting_does_not_move() {
        let arena = big_arena();
        let mut e = Enemy::standard(1, Vec2::new(500.0, 500.0));
        e.update(Vec2::new(520.0, 500.0), SIM_DT, &arena);
        assert_eq!(e.pos, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_dash_step_toward_player() {
        let arena = big_arena();
        let mut e = Enemy::new(1, Vec2::new(500.0, 500.0), 30.0, 1.2 * 60.0, 5.0, 400.0);
        e.mode = EnemyMode::Dashing { remaining: 1.2 };
        // Player 300 units away along a 3-4-5 diagonal
        let player = Vec2::new(680.0, 740.0);
        e.update(player, SIM_DT, &arena);
        // 1.2 * 1.8 = 2.16 units along (0.6, 0.8)
        assert!((e.pos.x - 501.296).abs() < 1e-3);
        assert!((e.pos.y - 501.728).abs() < 1e-3);
    }

    #[test]
    fn test_no_dash_outside_follow_distance() {
        let arena = big_arena();
        let mut e = Enemy::standard(1, Vec2::new(0.0, 0.0));
        e.mode = EnemyMode::Dashing { remaining: 1.2 };
        e.update(Vec2::new(401.0, 0.0), SIM_DT, &arena);
        assert_eq!(e.pos, Vec2::ZERO);
    }

    #[test]
    fn test_no_dash_at_zero_distance() {
        let arena = big_arena();
        let mut e = Enemy::standard(1, Vec2::new(50.0, 50.0));
        e.mode = EnemyMode::Dashing { remaining: 1.2 };
        e.update(Vec2::new(50.0, 50.0), SIM_DT, &arena);
        assert_eq!(e.pos, Vec2::new(50.0, 50.0));
        assert!(e.pos.is_finite());
    }

    #[test]
    fn test_damage_and_death() {
        let mut e = Enemy::standard(1, Vec2::ZERO);
        e.take_damage(10.0);
        assert!(e.is_alive());
        assert!((e.health_ratio() - 2.0 / 3.0).abs() < 1e-6);
        e.take_damage(25.0);
        assert_eq!(e.health, 0.0);
        assert!(!e.active);
        assert!(!e.is_alive());
    }

    #[test]
    fn test_dead_enemy_is_inert() {
        let arena = big_arena();
        let mut e = Enemy::standard(1, Vec2::new(100.0, 100.0));
        e.mode = EnemyMode::Dashing { remaining: 1.2 };
        e.take_damage(100.0);
        e.update(Vec2::new(110.0, 100.0), SIM_DT, &arena);
        assert_eq!(e.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_distance_uses_center() {
        let e = Enemy::standard(1, Vec2::new(0.0, 0.0));
        assert!((e.distance_to(Vec2::new(8.0, 8.0))).abs() < 1e-6);
    }
}
