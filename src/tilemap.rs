//! Tile map asset
//!
//! Parsed from Tiled-style JSON. The simulation only reads it to size the
//! arena and to check whether the player stands on a teleport gate.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TELEPORT_GATE_TILE;
use crate::error::{Error, Result};

/// One layer of tile IDs, row-major
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub data: Vec<u32>,
    pub width: usize,
    pub height: usize,
}

impl TileLayer {
    /// Tile ID at a cell, if the cell is inside the layer
    pub fn tile(&self, col: i64, row: i64) -> Option<u32> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    pub layers: Vec<TileLayer>,
    /// Map size in tiles
    pub width: usize,
    pub height: usize,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
}

impl TileMap {
    /// Map with no layers covering `width` x `height` pixels (1-pixel tiles)
    pub fn blank(width: f32, height: f32) -> Self {
        Self {
            layers: Vec::new(),
            width: width.max(0.0) as usize,
            height: height.max(0.0) as usize,
            tile_width: 1,
            tile_height: 1,
        }
    }

    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::ParseJson {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::from_json(&json, path)?;
        log::info!(
            "Loaded map {} ({}x{} tiles, {} layers)",
            path.display(),
            map.width,
            map.height,
            map.layers.len()
        );
        Ok(map)
    }

    /// Map size in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_width as f32,
            self.height as f32 * self.tile_height as f32,
        )
    }

    /// Tile IDs under a world point, one per layer that covers it
    pub fn tile_ids_at(&self, point: Vec2) -> Vec<u32> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Vec::new();
        }
        let col = (point.x / self.tile_width as f32).floor() as i64;
        let row = (point.y / self.tile_height as f32).floor() as i64;
        self.layers.iter().filter_map(|l| l.tile(col, row)).collect()
    }

    /// Whether any layer has the teleport gate tile under `point`
    pub fn is_gate_at(&self, point: Vec2) -> bool {
        self.tile_ids_at(point).contains(&TELEPORT_GATE_TILE)
    }
}
