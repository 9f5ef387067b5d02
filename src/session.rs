//! Frame driver
//!
//! Owns the game state plus the persisted record, runs fixed steps and
//! performs the file I/O the simulation asks for through events.

use glam::Vec2;

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};
use crate::persistence::{SaveRecord, load_record, save_record};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tilemap::TileMap;

/// Converts real frame time into a number of fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FixedStepClock {
    pub accumulator: f32,
}

impl FixedStepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `real_dt` seconds and return how many steps to run now
    pub fn advance(&mut self, real_dt: f32) -> u32 {
        self.accumulator += real_dt.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        steps
    }
}

pub struct Session {
    pub state: GameState,
    /// Last record loaded or saved; progression fields carry over on save
    pub record: SaveRecord,
    pub settings: Settings,
}

impl Session {
    pub fn new(settings: Settings, map: TileMap) -> Self {
        let record = load_record(&settings.save_path).unwrap_or_else(|e| {
            log::warn!("{e}; starting from default stats");
            SaveRecord::default()
        });

        let seed = settings.resolve_seed();
        let viewport = Vec2::new(settings.viewport_width, settings.viewport_height);
        let mut state = GameState::new(seed, map, viewport, &record);
        state.piercing = settings.piercing;
        log::info!("Session started with seed {seed}");

        Self {
            state,
            record,
            settings,
        }
    }

    /// Run one fixed step and handle its side effects. Returns `false` once the game exited.
    pub fn frame(&mut self, input: &TickInput) -> bool {
        tick(&mut self.state, input, SIM_DT);

        for event in self.state.drain_events() {
            match event {
                GameEvent::SaveRequested => self.save(),
                GameEvent::LoadRequested => self.load(),
                GameEvent::EnemyKilled { id, .. } => log::debug!("Enemy {id} killed"),
                _ => {}
            }
        }

        self.state.phase != GamePhase::Exited
    }

    fn save(&mut self) {
        let record = self.record.capture(&self.state.player);
        match save_record(&self.settings.save_path, &record) {
            Ok(()) => {
                log::info!("Saved stats to {}", self.settings.save_path.display());
                self.record = record;
            }
            Err(e) => log::warn!("Save failed: {e}"),
        }
    }

    fn load(&mut self) {
        match load_record(&self.settings.save_path) {
            Ok(record) => {
                self.state.reset_from_record(&record);
                self.record = record;
                log::info!("Loaded stats from {}", self.settings.save_path.display());
            }
            Err(e) => log::warn!("Load failed, keeping current run: {e}"),
        }
    }
}
