//! Attract-mode pilot
//!
//! Produces the same `TickInput` a player would: acknowledges prompts, turns
//! toward the nearest asteroid (leading it a little) and fires once aligned.

use glam::Vec2;

use super::body::Movable;
use super::state::{GamePhase, GameState};
use super::tick::TickInput;
use crate::consts::PROJECTILE_SPEED;
use crate::{bearing_degrees, normalize_degrees};

/// Fire when the facing is within this many degrees of the aim point
const AIM_TOLERANCE_DEGREES: f32 = 6.0;

/// Input for the next tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::WaitingInitial | GamePhase::WaitingAfterHit => TickInput {
            continue_game: true,
            ..Default::default()
        },
        GamePhase::WaitingGameOver => TickInput {
            exit_game: true,
            ..Default::default()
        },
        GamePhase::RoundCleared | GamePhase::Ended => TickInput::default(),
        GamePhase::Running => {
            let ship = state.ship.body();
            let Some(aim) = aim_point(state) else {
                return TickInput::default();
            };
            let off_target = normalize_degrees(bearing_degrees(ship.center(), aim) - ship.direction());
            TickInput {
                pointer: Some(aim),
                fire: off_target.abs() <= AIM_TOLERANCE_DEGREES,
                ..Default::default()
            }
        }
    }
}

/// Predicted position of the nearest asteroid when a shot would reach it
fn aim_point(state: &GameState) -> Option<Vec2> {
    let origin = state.ship.body().center();
    state
        .asteroids
        .iter()
        .map(|a| a.body())
        .min_by(|a, b| {
            let dist_a = a.center().distance_squared(origin);
            let dist_b = b.center().distance_squared(origin);
            dist_a
                .partial_cmp(&dist_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|body| {
            let travel_ticks = body.center().distance(origin) / PROJECTILE_SPEED;
            body.center() + body.velocity() * travel_ticks
        })
}
