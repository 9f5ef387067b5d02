//! Runtime settings
//!
//! Persisted separately from the save record, as JSON next to the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::error::{Error, Result};
use crate::sim::PiercingRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the stats record is saved and loaded
    pub save_path: PathBuf,
    /// Tiled JSON map; a blank arena is used when unset
    pub map_path: Option<PathBuf>,

    // === View ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Arena without a map ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Simulation ===
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
    pub piercing: PiercingRule,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("save.json"),
            map_path: None,

            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,

            arena_width: DEFAULT_VIEWPORT_WIDTH,
            arena_height: DEFAULT_VIEWPORT_HEIGHT,

            seed: None,
            piercing: PiercingRule::PassThrough,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "settings.json";

    /// Load settings from `path`. Missing or unreadable files fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path.as_ref()) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Option<Self>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::ReadFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| Error::ParseJson {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Save settings to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::SerializeJson {
            what: "settings",
            source,
        })?;
        std::fs::write(path, json).map_err(|source| Error::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Seed for this run
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
