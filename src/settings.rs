//! Game settings
//!
//! Read from an optional JSON file; missing fields take their defaults and
//! out-of-range values are clamped by `sanitized`.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Bounds, RoundConfig};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; taken from the clock when absent
    pub seed: Option<u64>,

    // === Timing ===
    /// Simulation rate (ticks per second)
    pub tick_rate_hz: u32,
    /// Stop after this many ticks (0 = until the game ends)
    pub max_ticks: u64,
    /// Pace ticks against the wall clock instead of running flat out
    pub realtime: bool,

    // === Round ===
    pub play_width: f32,
    pub play_height: f32,
    pub starting_lives: u8,
    /// Ticks between shots (negative means no cooldown)
    pub weapon_cooldown_ticks: i32,

    // === Session ===
    /// Let the autopilot play (attract mode)
    pub autopilot: bool,
    /// Where the leaderboard is kept; none means it is not persisted
    pub high_scores_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            tick_rate_hz: TICK_RATE_HZ,
            max_ticks: 0,
            realtime: false,

            play_width: PLAY_AREA_WIDTH,
            play_height: PLAY_AREA_HEIGHT,
            starting_lives: STARTING_LIVES,
            weapon_cooldown_ticks: WEAPON_COOLDOWN_TICKS,

            autopilot: true,
            high_scores_path: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values into their valid ranges
    pub fn sanitized(mut self) -> Self {
        self.tick_rate_hz = self.tick_rate_hz.clamp(1, 1000);
        self.starting_lives = self.starting_lives.clamp(1, MAX_LIVES);
        self.weapon_cooldown_ticks = self.weapon_cooldown_ticks.max(0);
        if !self.play_width.is_finite() {
            self.play_width = PLAY_AREA_WIDTH;
        }
        if !self.play_height.is_finite() {
            self.play_height = PLAY_AREA_HEIGHT;
        }
        self
    }

    /// Round configuration for these settings (play area anchored at the
    /// origin)
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            area: Bounds::new(Vec2::ZERO, Vec2::new(self.play_width, self.play_height)),
            starting_lives: self.starting_lives,
            weapon_cooldown_ticks: self.weapon_cooldown_ticks,
        }
        .sanitized()
    }

    /// Wall time per tick in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }
}
