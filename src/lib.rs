//! Asteroid Field - A wrap-around asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, round state)
//! - `input`: Key/pointer tracking with edge detection
//! - `hud`: Display boundary (score, lives, status text)
//! - `session`: Glue that drives ticks and routes results to collaborators
//! - `highscores`: Top-10 leaderboard
//! - `settings`: Configuration

pub mod highscores;
pub mod hud;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions (screen coordinates, y grows downward)
    pub const PLAY_AREA_WIDTH: f32 = 1280.0;
    pub const PLAY_AREA_HEIGHT: f32 = 660.0;

    /// Default velocity cap for moving entities (units per tick)
    pub const DEFAULT_MAX_SPEED: f32 = 5.0;
    /// Default share of an entity (percent of its size) that must leave the
    /// play area before it wraps around
    pub const DEFAULT_WRAP_PERCENT: f32 = 50.0;

    /// Ship defaults
    pub const SHIP_MAX_SPEED: f32 = 5.0;
    pub const SHIP_THRUST: f32 = 0.05;
    pub const SHIP_TURN_DEGREES: f32 = 4.0;
    /// Facing at spawn: straight up
    pub const SHIP_SPAWN_DIRECTION: f32 = -90.0;
    pub const DEFAULT_WEAPON_COOLDOWN_TICKS: i32 = 60;
    pub const WEAPON_COOLDOWN_TICKS: i32 = 30;

    /// Projectile defaults (~2s on screen)
    pub const PROJECTILE_LIFETIME_TICKS: i32 = 120;
    pub const PROJECTILE_SPEED: f32 = 7.0;
    pub const PROJECTILE_MAX_SPEED: f32 = 10.0;
    /// Distance ahead of the ship center where projectiles appear
    pub const PROJECTILE_MUZZLE_OFFSET: f32 = 10.0;
    pub const PROJECTILE_SIZE: f32 = 4.0;

    /// Asteroid outline vertex count
    pub const ASTEROID_VERTEX_COUNT: usize = 15;
    /// Large asteroids per wave
    pub const WAVE_SIZE: usize = 5;
    /// Minimum per-axis distance of wave spawns from the play area center
    pub const SPAWN_CLEARANCE: f32 = 100.0;
    /// Fragments scatter by up to this much around the parent center
    pub const FRAGMENT_JITTER: f32 = 5.0;

    /// Lives
    pub const STARTING_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Invulnerability after a hit or a cleared round (5 seconds)
    pub const INVULNERABLE_TICKS: u32 = 5 * TICK_RATE_HZ;
    /// Ship and life indicator toggle visibility every this many ticks
    pub const BLINK_INTERVAL_TICKS: u32 = 20;

    /// Scoring
    pub const ROUND_CLEAR_BONUS: u64 = 20_000;
    pub const FULL_LIVES_BONUS: u64 = 20_000;
    /// Total tier rewards for destroying one full wave
    pub const NOMINAL_ROUND_SCORE: u64 = 30_000;
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Unit vector pointing along `degrees` (screen coordinates)
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Bearing in degrees from `from` toward `to`
#[inline]
pub fn bearing_degrees(from: Vec2, to: Vec2) -> f32 {
    let offset = to - from;
    offset.y.atan2(offset.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees_range() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert!((normalize_degrees(190.0) - (-170.0)).abs() < 1e-4);
        assert!((normalize_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_heading_and_bearing() {
        let up = heading(-90.0);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y + 1.0).abs() < 1e-6);

        let b = bearing_degrees(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((b - 90.0).abs() < 1e-4);
    }
}
