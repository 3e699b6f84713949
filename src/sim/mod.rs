//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod autopilot;
pub mod body;
pub mod collision;
pub mod projectile;
pub mod shape;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidTier};
pub use autopilot::autopilot_input;
pub use body::{Body, Movable};
pub use collision::polygons_intersect;
pub use projectile::Projectile;
pub use shape::{Appearance, Bounds, Shape};
pub use ship::Ship;
pub use state::{GameEvent, GamePhase, GameState, RoundConfig};
pub use tick::{TickInput, tick};
