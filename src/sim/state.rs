//! Round state and core simulation types
//!
//! `GameState` owns every entity, the score, the lives and the seeded RNG.
//! Only `tick` mutates it during play.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidTier};
use super::body::Movable;
use super::projectile::Projectile;
use super::shape::Bounds;
use super::ship::Ship;
use crate::consts::*;

/// Shown while waiting for the first round to start
pub const START_PROMPT: &str = "PRESS ENTER\nTO START";
/// Shown after a hit or a cleared round
pub const CONTINUE_PROMPT: &str = "PRESS ENTER\nTO CONTINUE";
/// Shown when no lives are left
pub const EXIT_PROMPT: &str = "PRESS ENTER\nTO EXIT GAME";

/// Smallest play area that leaves room for the spawn clearance around the ship
const MIN_PLAY_AREA: f32 = 2.0 * SPAWN_CLEARANCE + 100.0;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh game, waiting for the player to continue
    WaitingInitial,
    /// Active gameplay
    Running,
    /// Ship was hit (or a round was cleared), waiting for the player
    WaitingAfterHit,
    /// No lives left, waiting for the player to exit
    WaitingGameOver,
    /// Every asteroid is gone; the next tick sets up the next round
    RoundCleared,
    /// Player exited after game over; nothing more happens
    Ended,
}

impl GamePhase {
    /// Phases that pause the simulation until the player acknowledges
    pub fn is_waiting(self) -> bool {
        matches!(
            self,
            GamePhase::WaitingInitial | GamePhase::WaitingAfterHit | GamePhase::WaitingGameOver
        )
    }
}

/// Things that happened during a tick, for the session layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    ProjectileFired,
    AsteroidDestroyed { tier: AsteroidTier, points: u64 },
    ShipHit { lives_left: u8 },
    RoundCleared { round: u32, bonus: u64, extra_life: bool },
    RoundStarted { round: u32 },
    GameOver { score: u64 },
    /// The player acknowledged game over; hand the score to the session end
    GameEnded { final_score: u64 },
}

/// Per-run configuration of the round
#[derive(Debug, Clone, Copy)]
pub struct RoundConfig {
    pub area: Bounds,
    pub starting_lives: u8,
    pub weapon_cooldown_ticks: i32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            area: Bounds::from_size(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT),
            starting_lives: STARTING_LIVES,
            weapon_cooldown_ticks: WEAPON_COOLDOWN_TICKS,
        }
    }
}

impl RoundConfig {
    /// Clamp values into their valid ranges
    pub fn sanitized(self) -> Self {
        let width = self.area.width().max(MIN_PLAY_AREA);
        let height = self.area.height().max(MIN_PLAY_AREA);
        Self {
            area: Bounds::new(self.area.min, self.area.min + Vec2::new(width, height)),
            starting_lives: self.starting_lives.clamp(1, MAX_LIVES),
            weapon_cooldown_ticks: self.weapon_cooldown_ticks.max(0),
        }
    }
}

/// Complete round state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Play area the entities wrap around
    pub area: Bounds,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Ticks of invulnerability left (ship-asteroid hits ignored, no firing)
    pub invulnerable_ticks: u32,
    /// Lives shown by the HUD indicator (blinks to 0 while invulnerable)
    pub lives_shown: u8,
    /// Status text for the HUD (prompts)
    pub status: String,
    /// Round number, 1-based
    pub round: u32,
    /// Ticks spent running
    pub time_ticks: u64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// New game with the default configuration
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, RoundConfig::default())
    }

    /// New game: first wave spawned, ship centered, waiting for the player
    pub fn with_config(seed: u64, config: RoundConfig) -> Self {
        let config = config.sanitized();
        let mut ship = Ship::new();
        ship.set_weapon_cooldown(config.weapon_cooldown_ticks);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            area: config.area,
            phase: GamePhase::WaitingInitial,
            score: 0,
            lives: config.starting_lives,
            invulnerable_ticks: 0,
            lives_shown: config.starting_lives,
            status: START_PROMPT.to_string(),
            round: 1,
            time_ticks: 0,
            ship,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
        };

        state.place_ship();
        state.spawn_wave();
        log::info!(
            "New game (seed {}): {} asteroids, {} lives",
            seed,
            state.asteroids.len(),
            state.lives
        );
        state
    }

    /// Center the ship, facing up, at rest
    pub fn place_ship(&mut self) {
        let center = self.area.center();
        self.ship.reset_at(center, SHIP_SPAWN_DIRECTION);
    }

    /// Spawn a wave of large asteroids away from the center
    pub fn spawn_wave(&mut self) {
        let center = self.area.center();
        for _ in 0..WAVE_SIZE {
            let position = self.random_spawn_point(center);
            let mut asteroid = Asteroid::new(AsteroidTier::Large, &mut self.rng);
            asteroid.body_mut().place_center_at(position);
            asteroid.randomize_movement(&mut self.rng);
            self.asteroids.push(asteroid);
        }
    }

    /// Resample until the point is at least `SPAWN_CLEARANCE` from the center
    /// on both axes
    fn random_spawn_point(&mut self, center: Vec2) -> Vec2 {
        loop {
            let x = self.rng.random_range(self.area.min.x..self.area.max.x);
            let y = self.rng.random_range(self.area.min.y..self.area.max.y);
            if (x - center.x).abs() >= SPAWN_CLEARANCE && (y - center.y).abs() >= SPAWN_CLEARANCE
            {
                return Vec2::new(x, y);
            }
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
