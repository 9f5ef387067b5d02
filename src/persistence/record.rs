//! Flat player stats record

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::Player;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveRecord {
    pub level: i32,
    pub experience: i32,
    pub gold: i32,
    pub max_health: f32,
    pub attack_damage: f32,
    pub attack_speed: f32,
    pub player_x: f32,
    pub player_y: f32,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            gold: 0,
            max_health: 100.0,
            attack_damage: 10.0,
            attack_speed: 1.0,
            player_x: 160.0,
            player_y: 120.0,
        }
    }
}

impl SaveRecord {
    /// Snapshot the player's stats and position, keeping progression fields from `self`
    pub fn capture(&self, player: &Player) -> Self {
        Self {
            max_health: player.max_health,
            attack_damage: player.attack_damage,
            attack_speed: player.attacks_per_second,
            player_x: player.pos.x,
            player_y: player.pos.y,
            ..self.clone()
        }
    }
}

/// Read the record at `path`. A missing file yields the defaults.
pub fn load_record(path: impl AsRef<Path>) -> Result<SaveRecord> {
    let path = path.as_ref();
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("No save at {}, using defaults", path.display());
            return Ok(SaveRecord::default());
        }
        Err(source) => {
            return Err(Error::ReadFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&json).map_err(|source| Error::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite `path` with a pretty-printed record, creating the parent directory if needed
pub fn save_record(path: impl AsRef<Path>, record: &SaveRecord) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(record).map_err(|source| Error::SerializeJson {
        what: "save record",
        source,
    })?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, json).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
