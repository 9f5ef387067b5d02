//! Combat: targeting, volley fan-out, repeat volleys and hit resolution
//!
//! An *attack* is one volley now plus one delayed repeat per Multishot stack.
//! A *volley* is one projectile, or N+1 side-by-side projectiles with N
//! ParallelShot stacks. DiagonalArrow adds two more full attacks at ±30°.

use glam::Vec2;
use rand::Rng;

use super::enemy::Enemy;
use super::geometry::{collides, direction};
use super::projectile::{DelayedShot, Projectile};
use super::skill::SkillKind;
use super::state::{GameEvent, GameState, PiercingRule, Potion};
use crate::consts::*;
use crate::{angle_to_dir, perpendicular};

/// Index of the closest live enemy to `point` (by box center)
pub fn nearest_enemy(enemies: &[Enemy], point: Vec2) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive())
        .min_by(|(_, a), (_, b)| {
            a.distance_to(point)
                .partial_cmp(&b.distance_to(point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Perpendicular offsets for a volley with `parallel` ParallelShot stacks.
///
/// Always `parallel + 1` entries, `PARALLEL_SPACING` apart and centered on zero.
pub fn volley_offsets(parallel: usize) -> Vec<f32> {
    let half = parallel as f32 / 2.0;
    (0..=parallel)
        .map(|i| (i as f32 - half) * PARALLEL_SPACING)
        .collect()
}

/// Fire one volley from `origin` toward `target`. Returns the number of projectiles.
pub fn fire_volley(state: &mut GameState, origin: Vec2, target: Vec2) -> usize {
    let player = &state.player;
    let perp = perpendicular(direction(origin, target, Vec2::X));
    let piercing = player.has_skill(SkillKind::PiercingShot);
    let damage = player.attack_damage;
    let offsets = volley_offsets(player.skill_count(SkillKind::ParallelShot));

    for offset in &offsets {
        let shift = perp * *offset;
        state.projectiles.push(
            Projectile::aimed(origin + shift, target + shift, PROJECTILE_SPEED, damage)
                .with_piercing(piercing),
        );
    }
    offsets.len()
}

/// One attack at `target`: a volley now, plus a delayed repeat per Multishot stack
pub fn fire_attack(state: &mut GameState, target: Vec2) {
    let origin = state.player.center();
    fire_volley(state, origin, target);

    let repeats = state.player.skill_count(SkillKind::Multishot) as u32;
    for i in 1..=repeats {
        state.delayed_shots.push(DelayedShot {
            ticks_remaining: i * MULTISHOT_DELAY_TICKS,
            target,
        });
    }
}

/// Attack the nearest enemy if allowed. Returns true if an attack happened.
///
/// Holding any movement key suppresses attacking entirely, whether or not the
/// player actually moved.
pub fn auto_attack(state: &mut GameState, movement_held: bool) -> bool {
    if movement_held {
        return false;
    }
    let origin = state.player.center();
    let Some(index) = nearest_enemy(&state.enemies, origin) else {
        return false;
    };
    if !state.player.can_attack() {
        return false;
    }

    let target = state.enemies[index].center();
    fire_attack(state, target);

    if state.player.has_skill(SkillKind::DiagonalArrow) {
        let aim = direction(origin, target, Vec2::X);
        let angle = aim.y.atan2(aim.x);
        for side in [-DIAGONAL_ANGLE, DIAGONAL_ANGLE] {
            let side_target = origin + angle_to_dir(angle + side) * DIAGONAL_RANGE;
            fire_attack(state, side_target);
        }
    }

    state.player.mark_attacked();
    true
}

/// Fire repeat volleys that are due and count down the rest.
///
/// A shot queued with `ticks_remaining = d` fires on the d-th tick after the
/// tick it was queued in. Returns the number of volleys fired.
pub fn resolve_delayed_shots(state: &mut GameState) -> usize {
    let mut due = Vec::new();
    state.delayed_shots.retain_mut(|shot| {
        if shot.ticks_remaining == 0 {
            due.push(shot.target);
            false
        } else {
            shot.ticks_remaining -= 1;
            true
        }
    });

    let origin = state.player.center();
    for target in &due {
        fire_volley(state, origin, *target);
    }
    due.len()
}

/// Run enemy AI and apply contact damage for every overlapping enemy, every tick
pub fn update_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.pos;
    let arena = state.arena;
    for enemy in &mut state.enemies {
        enemy.update(target, dt, &arena);
        if enemy.is_alive() && collides(&enemy.bounds(), &state.player.bounds()) {
            state.player.take_damage(enemy.damage);
        }
    }
}

/// Move projectiles and resolve hits against live enemies
pub fn update_projectiles(state: &mut GameState, dt: f32) {
    let arena = state.arena;
    let rule = state.piercing;
    let mut kills = Vec::new();

    for projectile in &mut state.projectiles {
        projectile.update(dt, &arena);
        if !projectile.active {
            continue;
        }

        for enemy in &mut state.enemies {
            if !enemy.is_alive() || projectile.has_hit(enemy.id) {
                continue;
            }
            if !collides(&projectile.bounds(), &enemy.bounds()) {
                continue;
            }

            enemy.take_damage(projectile.damage);
            if !enemy.is_alive() {
                kills.push((enemy.id, enemy.pos));
            }

            if projectile.piercing && rule == PiercingRule::PassThrough {
                projectile.hits.push(enemy.id);
            } else {
                projectile.active = false;
                break;
            }
        }
    }

    for (id, pos) in kills {
        state.events.push(GameEvent::EnemyKilled { id, pos });
        if state.rng.random_bool(POTION_DROP_CHANCE) {
            state.potions.push(Potion::new(pos));
            state.events.push(GameEvent::PotionDropped { pos });
        }
    }
}

/// Drop inactive projectiles and dead enemies
pub fn prune(state: &mut GameState) {
    state.projectiles.retain(|p| p.active);
    state.enemies.retain(|e| e.is_alive());
}

/// Heal for every potion the player touches and remove those potions
pub fn collect_potions(state: &mut GameState) {
    let bounds = state.player.bounds();
    let before = state.potions.len();
    state.potions.retain(|p| !collides(&bounds, &p.bounds()));

    for _ in state.potions.len()..before {
        state.player.heal(POTION_HEAL);
        log::debug!("Potion collected, health {}", state.player.health);
        state.events.push(GameEvent::PotionCollected {
            health: state.player.health,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Large open arena, player at (500, 500), nothing else
    fn arena_state() -> GameState {
        let mut state = GameState::with_arena(7, 2000.0, 2000.0);
        state.player.pos = Vec2::new(500.0, 500.0);
        state
    }

    fn perp_offset(p: &Projectile, origin: Vec2, perp: Vec2) -> f32 {
        (p.center() - origin).dot(perp)
    }

    #[test]
    fn test_nearest_enemy_skips_dead() {
        let mut state = arena_state();
        state.spawn_enemy(Vec2::new(520.0, 500.0));
        state.spawn_enemy(Vec2::new(700.0, 500.0));
        let center = state.player.center();
        assert_eq!(nearest_enemy(&state.enemies, center), Some(0));
        state.enemies[0].take_damage(1000.0);
        assert_eq!(nearest_enemy(&state.enemies, center), Some(1));
        state.enemies[1].take_damage(1000.0);
        assert_eq!(nearest_enemy(&state.enemies, center), None);
    }

    #[test]
    fn test_single_projectile_without_skills() {
        let mut state = arena_state();
        state.spawn_enemy(Vec2::new(700.0, 500.0));
        assert!(auto_attack(&mut state, false));
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.delayed_shots.is_empty());
        let p = &state.projectiles[0];
        assert!(!p.piercing);
        assert!(p.vel.x > 0.0 && p.vel.y.abs() < 1e-3);
        assert!((p.vel.length() - PROJECTILE_SPEED).abs() < 1e-2);
        assert_eq!(p.damage, 10.0);
    }

    #[test]
    fn test_parallel_fan_is_symmetric() {
        let mut state = arena_state();
        state.player.learn_skill(SkillKind::ParallelShot);
        state.player.learn_skill(SkillKind::ParallelShot);
        let origin = state.player.center();
        let target = origin + Vec2::new(300.0, 400.0);

        assert_eq!(fire_volley(&mut state, origin, target), 3);

        let perp = perpendicular((target - origin).normalize());
        let mut offsets: Vec<f32> = state
            .projectiles
            .iter()
            .map(|p| perp_offset(p, origin, perp))
            .collect();
        offsets.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((offsets[0] + 5.0).abs() < 1e-3);
        assert!(offsets[1].abs() < 1e-3);
        assert!((offsets[2] - 5.0).abs() < 1e-3);

        // All parallel to the aim line
        let aim = (target - origin).normalize();
        for p in &state.projectiles {
            assert!((p.vel.normalize() - aim).length() < 1e-4);
        }
    }

    #[test]
    fn test_piercing_marks_whole_volley() {
        let mut state = arena_state();
        state.player.learn_skill(SkillKind::ParallelShot);
        state.player.learn_skill(SkillKind::PiercingShot);
        let origin = state.player.center();
        fire_volley(&mut state, origin, origin + Vec2::new(100.0, 0.0));
        assert_eq!(state.projectiles.len(), 2);
        assert!(state.projectiles.iter().all(|p| p.piercing));
    }

    #[test]
    fn test_multishot_schedules_staggered_repeats() {
        let mut state = arena_state();
        state.player.learn_skill(SkillKind::Multishot);
        state.player.learn_skill(SkillKind::Multishot);
        state.spawn_enemy(Vec2::new(800.0, 500.0));
        let target = state.enemies[0].center();

        assert!(auto_attack(&mut state, false));
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(
            state.delayed_shots,
            vec![
                DelayedShot { ticks_remaining: 8, target },
                DelayedShot { ticks_remaining: 16, target },
            ]
        );

        // Resolution on the attack tick itself, then count the following ticks
        let mut fired_at = Vec::new();
        for tick in 0..=20 {
            if resolve_delayed_shots(&mut state) > 0 {
                fired_at.push(tick);
            }
        }
        assert_eq!(fired_at, vec![8, 16]);
        assert_eq!(state.projectiles.len(), 3);
        assert!(state.delayed_shots.is_empty());
    }

    #[test]
    fn test_delayed_volley_keeps_original_aim_and_fan() {
        let mut state = arena_state();
        state.player.learn_skill(SkillKind::Multishot);
        state.player.learn_skill(SkillKind::ParallelShot);
        let target = Vec2::new(900.0, 508.0);
        fire_attack(&mut state, target);
        assert_eq!(state.projectiles.len(), 2);

        // Player moves before the repeat fires; aim point stays fixed
        state.player.pos = Vec2::new(500.0, 300.0);
        for _ in 0..=8 {
            resolve_delayed_shots(&mut state);
        }
        assert_eq!(state.projectiles.len(), 4);
        let origin = state.player.center();
        let aim = (target - origin).normalize();
        for p in &state.projectiles[2..] {
            assert!((p.vel.normalize() - aim).length() < 1e-4);
        }
    }

    #[test]
    fn test_diagonal_adds_two_attacks() {
        let mut state = arena_state();
        state.player.learn_skill(SkillKind::DiagonalArrow);
        state.spawn_enemy(Vec2::new(800.0, 500.0));
        assert!(auto_attack(&mut state, false));
        assert_eq!(state.projectiles.len(), 3);

        let mut angles: Vec<f32> = state
            .projectiles
            .iter()
            .map(|p| p.vel.y.atan2(p.vel.x).to_degrees())
            .collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((angles[0] + 30.0).abs() < 1e-2);
        assert!(angles[1].abs() < 1e-2);
        assert!((angles[2] - 30.0).abs() < 1e-2);
    }

    #[test]
    fn test_diagonal_attacks_stack_with_other_skills() {
        let mut state = arena_state();
        state.player.learn_skill(SkillKind::DiagonalArrow);
        state.player.learn_skill(SkillKind::ParallelShot);
        state.player.learn_skill(SkillKind::Multishot);
        state.spawn_enemy(Vec2::new(800.0, 500.0));
        assert!(auto_attack(&mut state, false));
        // 3 attacks x 2 parallel projectiles, each attack queues one repeat
        assert_eq!(state.projectiles.len(), 6);
        assert_eq!(state.delayed_shots.len(), 3);
    }

    #[test]
    fn test_cooldown_reset_once_per_attack() {
        let mut state = arena_state();
        state.player.learn_skill(SkillKind::DiagonalArrow);
        state.player.learn_skill(SkillKind::Multishot);
        state.spawn_enemy(Vec2::new(800.0, 500.0));
        assert!(auto_attack(&mut state, false));
        assert!((state.player.attack_cooldown - 1.0).abs() < 1e-6);
        // Still cooling down
        assert!(!auto_attack(&mut state, false));
        assert_eq!(state.projectiles.len(), 3);
    }

    #[test]
    fn test_movement_suppresses_attack() {
        let mut state = arena_state();
        state.spawn_enemy(Vec2::new(800.0, 500.0));
        assert!(!auto_attack(&mut state, true));
        assert!(state.projectiles.is_empty());
        assert!(state.player.can_attack());
    }

    #[test]
    fn test_no_target_no_attack() {
        let mut state = arena_state();
        assert!(!auto_attack(&mut state, false));
        assert!(state.player.can_attack());
    }

    fn projectile_into_enemies(state: &mut GameState, piercing: bool) {
        // Two enemies in a row to the right of a projectile about to hit the first
        state.spawn_enemy(Vec2::new(600.0, 500.0));
        state.spawn_enemy(Vec2::new(620.0, 500.0));
        let origin = Vec2::new(598.0, 508.0);
        state.projectiles.push(
            Projectile::aimed(origin, origin + Vec2::X * 100.0, PROJECTILE_SPEED, 10.0)
                .with_piercing(piercing),
        );
    }

    #[test]
    fn test_non_piercing_stops_on_first_hit() {
        let mut state = arena_state();
        projectile_into_enemies(&mut state, false);
        update_projectiles(&mut state, SIM_DT);
        assert!(!state.projectiles[0].active);
        assert_eq!(state.enemies[0].health, 20.0);
        assert_eq!(state.enemies[1].health, 30.0);
    }

    #[test]
    fn test_piercing_pass_through() {
        let mut state = arena_state();
        projectile_into_enemies(&mut state, true);
        for _ in 0..10 {
            update_projectiles(&mut state, SIM_DT);
        }
        let p = &state.projectiles[0];
        assert!(p.active);
        // Each enemy damaged exactly once despite multi-tick overlap
        assert_eq!(state.enemies[0].health, 20.0);
        assert_eq!(state.enemies[1].health, 20.0);
        assert_eq!(p.hits.len(), 2);
    }

    #[test]
    fn test_piercing_stop_on_hit_rule() {
        let mut state = arena_state();
        state.piercing = PiercingRule::StopOnHit;
        projectile_into_enemies(&mut state, true);
        update_projectiles(&mut state, SIM_DT);
        assert!(!state.projectiles[0].active);
        assert_eq!(state.enemies[0].health, 20.0);
        assert_eq!(state.enemies[1].health, 30.0);
    }

    #[test]
    fn test_kill_emits_event_and_prunes() {
        let mut state = arena_state();
        projectile_into_enemies(&mut state, false);
        state.enemies[0].health = 5.0;
        update_projectiles(&mut state, SIM_DT);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::EnemyKilled { .. })));
        let drops = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PotionDropped { .. }))
            .count();
        assert_eq!(drops, state.potions.len());

        prune(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_contact_damage_every_tick() {
        let mut state = arena_state();
        state.spawn_enemy(Vec2::new(505.0, 505.0));
        for _ in 0..3 {
            update_enemies(&mut state, SIM_DT);
        }
        assert_eq!(state.player.health, 85.0);
    }

    #[test]
    fn test_potion_heal_capped() {
        let mut state = arena_state();
        state.player.health = 90.0;
        state.potions.push(Potion::new(Vec2::new(505.0, 505.0)));
        state.potions.push(Potion::new(Vec2::new(900.0, 900.0)));
        collect_potions(&mut state);
        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.potions.len(), 1);
    }

    #[test]
    fn test_zero_length_aim_is_safe() {
        let mut state = arena_state();
        state.player.learn_skill(SkillKind::ParallelShot);
        let origin = state.player.center();
        fire_volley(&mut state, origin, origin);
        assert!(state.projectiles.iter().all(|p| p.pos.is_finite() && p.vel.is_finite()));
    }

    proptest! {
        #[test]
        fn prop_offsets_symmetric_and_even(n in 0usize..12) {
            let offsets = volley_offsets(n);
            prop_assert_eq!(offsets.len(), n + 1);
            for (a, b) in offsets.iter().zip(offsets.iter().rev()) {
                prop_assert!((a + b).abs() < 1e-4);
            }
            for pair in offsets.windows(2) {
                prop_assert!((pair[1] - pair[0] - PARALLEL_SPACING).abs() < 1e-4);
            }
        }
    }
}
