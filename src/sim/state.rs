//! Game state and core simulation types
//!
//! The top-level state owns every entity collection. Nothing else holds
//! references into them, and they are only mutated during `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::enemy::Enemy;
use super::geometry::{Aabb, Arena};
use super::player::Player;
use super::projectile::{DelayedShot, Projectile};
use super::skill::{OFFER_COUNT, SkillKind, roll_offers};
use super::wave::WaveState;
use crate::consts::*;
use crate::persistence::SaveRecord;
use crate::tilemap::TileMap;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen while the player picks a skill
    SkillSelect,
    /// Quit was requested; ticks are no-ops
    Exited,
}

/// How piercing projectiles resolve hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PiercingRule {
    /// Piercing projectiles survive hits and keep scanning for more enemies
    #[default]
    PassThrough,
    /// Every projectile stops on its first hit, piercing or not
    StopOnHit,
}

/// Things that happened during a tick, for logging and side effects outside the sim
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: u32, pos: Vec2 },
    EnemyKilled { id: u32, pos: Vec2 },
    PotionDropped { pos: Vec2 },
    PotionCollected { health: f32 },
    WaveStarted { wave: u32 },
    SkillMenuOpened,
    SkillLearned { kind: SkillKind },
    GateActivated,
    SaveRequested,
    LoadRequested,
    Quit,
}

/// Health pickup dropped by enemies
#[derive(Debug, Clone, PartialEq)]
pub struct Potion {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Potion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(POTION_SIZE),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub arena: Arena,
    /// Map used for gate detection
    pub map: TileMap,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub potions: Vec<Potion>,
    pub delayed_shots: Vec<DelayedShot>,
    pub wave: WaveState,
    pub camera: Camera,
    /// Skills on offer while in `SkillSelect`
    pub skill_offers: [SkillKind; OFFER_COUNT],
    pub piercing: PiercingRule,
    /// Player center is over a teleport gate tile
    pub on_gate: bool,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New run on `map`, with the player built from `record`
    pub fn new(seed: u64, map: TileMap, viewport: Vec2, record: &SaveRecord) -> Self {
        let size = map.pixel_size();
        let mut rng = Pcg32::seed_from_u64(seed);
        let skill_offers = roll_offers(&mut rng);
        let mut state = Self {
            seed,
            rng,
            time_ticks: 0,
            phase: GamePhase::Playing,
            arena: Arena::new(size.x, size.y),
            map,
            player: Player::from_record(record),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            potions: Vec::new(),
            delayed_shots: Vec::new(),
            wave: WaveState::new(),
            camera: Camera::new(viewport),
            skill_offers,
            piercing: PiercingRule::default(),
            on_gate: false,
            events: Vec::new(),
            next_id: 1,
        };
        state.camera.snap_to(state.player.center(), &state.arena);
        state
    }

    /// Blank arena of the given size, default record (handy for tests and demos)
    pub fn with_arena(seed: u64, width: f32, height: f32) -> Self {
        Self::new(
            seed,
            TileMap::blank(width, height),
            Vec2::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            &SaveRecord::default(),
        )
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start over from a persisted record: fresh player, empty field, wave 1
    pub fn reset_from_record(&mut self, record: &SaveRecord) {
        self.player = Player::from_record(record);
        self.enemies.clear();
        self.projectiles.clear();
        self.potions.clear();
        self.delayed_shots.clear();
        self.wave.reset();
        self.camera = Camera::new(self.camera.viewport);
        self.camera.snap_to(self.player.center(), &self.arena);
        self.phase = GamePhase::Playing;
        self.on_gate = false;
    }

    /// Spawn a standard enemy at `pos` (pulled inside the arena)
    pub fn spawn_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let pos = self.arena.clamp_box(pos, Vec2::splat(ENEMY_SIZE));
        self.enemies.push(Enemy::standard(id, pos));
        self.events.push(GameEvent::EnemySpawned { id, pos });
        id
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// Open the skill menu with a fresh set of offers
    pub fn open_skill_menu(&mut self) {
        self.skill_offers = roll_offers(&mut self.rng);
        self.phase = GamePhase::SkillSelect;
        self.events.push(GameEvent::SkillMenuOpened);
    }

    /// Take all events raised so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
