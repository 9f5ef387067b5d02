//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The order of
//! the stages matters and is kept stable.

use glam::Vec2;

use super::combat;
use super::skill::OFFER_COUNT;
use super::state::{GameEvent, GamePhase, GameState};
use super::wave::spawn_position_in;
use crate::consts::{AUTOPILOT_FLEE_DISTANCE, ENEMY_SIZE};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement keys held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Open the skill menu (edge-triggered)
    pub open_skill_menu: bool,
    /// Pick offer 0, 1 or 2 in the skill menu (edge-triggered)
    pub choose: Option<usize>,
    /// Reroll the skill offers (edge-triggered)
    pub reroll: bool,
    /// Use the teleport gate under the player (edge-triggered)
    pub interact: bool,
    /// Persist / restore the stats record (edge-triggered)
    pub save: bool,
    pub load: bool,
    /// Stop the simulation
    pub quit: bool,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

impl TickInput {
    /// Any movement key held (this is what suppresses auto-attack)
    pub fn movement_held(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Combined movement direction, normalized so diagonals are not faster
    pub fn movement_dir(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }

    /// Clear the edge-triggered signals after they were consumed
    pub fn clear_one_shots(&mut self) {
        self.open_skill_menu = false;
        self.choose = None;
        self.reroll = false;
        self.interact = false;
        self.save = false;
        self.load = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::Exited {
        return;
    }
    if input.quit {
        state.phase = GamePhase::Exited;
        state.events.push(GameEvent::Quit);
        log::info!("Quit requested at tick {}", state.time_ticks);
        return;
    }

    let input = if input.autopilot {
        autopilot_input(state, input)
    } else {
        input.clone()
    };
    let input = &input;

    if input.open_skill_menu && state.phase == GamePhase::Playing {
        state.open_skill_menu();
    }

    // Gameplay is frozen while choosing a skill
    if state.phase == GamePhase::SkillSelect {
        handle_skill_selection(state, input);
        return;
    }

    state.time_ticks += 1;

    // Teleport gate
    state.on_gate = state.map.is_gate_at(state.player.center());
    if state.on_gate && input.interact {
        log::info!("Teleport gate activated");
        state.events.push(GameEvent::GateActivated);
    }

    // Player movement and cooldown
    if input.movement_held() {
        let arena = state.arena;
        state.player.move_by(input.movement_dir(), dt, &arena);
    }
    state.player.update(dt);

    // Wave scheduling
    if state.wave.update(dt) {
        let pos = spawn_position_in(
            state.player.pos,
            &state.arena,
            Vec2::splat(ENEMY_SIZE),
            &mut state.rng,
        );
        let id = state.spawn_enemy(pos);
        log::debug!("Spawned enemy {} at ({:.1}, {:.1})", id, pos.x, pos.y);
    }

    // Enemy AI and contact damage
    combat::update_enemies(state, dt);

    // Firing
    combat::auto_attack(state, input.movement_held());

    // Projectiles, then repeat volleys
    combat::update_projectiles(state, dt);
    combat::resolve_delayed_shots(state);

    combat::prune(state);
    combat::collect_potions(state);

    let arena = state.arena;
    state.camera.follow(state.player.center(), dt, &arena);

    // Wave completion
    if state.wave.is_wave_clear(state.live_enemy_count()) {
        state.wave.advance();
        log::info!(
            "Wave {} started: {} enemies, every {:.2}s",
            state.wave.wave,
            state.wave.enemies_per_wave,
            state.wave.spawn_interval
        );
        state.events.push(GameEvent::WaveStarted {
            wave: state.wave.wave,
        });
        state.open_skill_menu();
    }

    // Persistence is handled by the session
    if input.save {
        state.events.push(GameEvent::SaveRequested);
    }
    if input.load {
        state.events.push(GameEvent::LoadRequested);
    }
}

fn handle_skill_selection(state: &mut GameState, input: &TickInput) {
    if input.reroll {
        state.open_skill_menu();
        return;
    }
    if let Some(choice) = input.choose.filter(|&c| c < OFFER_COUNT) {
        let kind = state.skill_offers[choice];
        state.player.learn_skill(kind);
        state.phase = GamePhase::Playing;
        log::info!("Learned {}", kind.info().name);
        state.events.push(GameEvent::SkillLearned { kind });
    }
}

/// Simple demo AI: take the first offer, back away from enemies that get close,
/// otherwise stand still so auto-attack can fire.
fn autopilot_input(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    if state.phase == GamePhase::SkillSelect {
        input.choose = Some(0);
        return input;
    }

    let center = state.player.center();
    let threat = combat::nearest_enemy(&state.enemies, center)
        .map(|i| &state.enemies[i])
        .filter(|e| e.distance_to(center) < AUTOPILOT_FLEE_DISTANCE);

    if let Some(enemy) = threat {
        let away = center - enemy.center();
        input.left = away.x < 0.0;
        input.right = away.x > 0.0;
        input.up = away.y < 0.0;
        input.down = away.y > 0.0;
    }
    input
}
