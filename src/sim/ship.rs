//! The player's ship

use glam::Vec2;

use super::body::{Body, Movable};
use super::shape::{Appearance, Bounds, Shape};
use crate::consts::{
    DEFAULT_WEAPON_COOLDOWN_TICKS, SHIP_MAX_SPEED, SHIP_THRUST, SHIP_TURN_DEGREES,
};

/// Outline roughly covering the visible pixels of the ship sprite (30x30,
/// nose pointing along +x)
const SHIP_OUTLINE: [(f32, f32); 8] = [
    (0.0, 0.0),
    (12.0, 0.0),
    (21.0, 4.0),
    (30.0, 13.0),
    (30.0, 15.0),
    (21.0, 26.0),
    (12.0, 30.0),
    (0.0, 30.0),
];

#[derive(Debug, Clone)]
pub struct Ship {
    body: Body,
    engines_on: bool,
    /// Ticks until the weapon can fire again
    cooldown_remaining: u32,
    /// Ticks between shots
    weapon_cooldown: u32,
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Ship {
    /// Ship at rest with the default weapon cooldown. Ready to fire at once:
    /// `cooldown_remaining` starts at 0 rather than at the full cooldown, so
    /// the first shot is not delayed by 60 ticks.
    pub fn new() -> Self {
        let outline = SHIP_OUTLINE
            .iter()
            .map(|&(x, y)| Vec2::new(x, y))
            .collect();
        let mut body = Body::new(Shape::new(outline, Appearance::Ship));
        body.set_max_speed(SHIP_MAX_SPEED);
        // Drawn on top of everything else
        body.set_draw_order(-1);
        Self {
            body,
            engines_on: false,
            cooldown_remaining: 0,
            weapon_cooldown: DEFAULT_WEAPON_COOLDOWN_TICKS as u32,
        }
    }

    /// Turn the engines on or off; thrust is applied on the next tick
    pub fn set_engines_on(&mut self, on: bool) {
        self.engines_on = on;
    }

    pub fn engines_on(&self) -> bool {
        self.engines_on
    }

    /// Ticks between shots. Negative values mean no cooldown.
    pub fn set_weapon_cooldown(&mut self, ticks: i32) {
        self.weapon_cooldown = ticks.max(0) as u32;
    }

    pub fn weapon_cooldown(&self) -> u32 {
        self.weapon_cooldown
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    /// Try to fire. Returns false while the weapon is cooling down.
    pub fn fire(&mut self) -> bool {
        if self.cooldown_remaining != 0 {
            return false;
        }
        self.cooldown_remaining = self.weapon_cooldown;
        true
    }

    /// Turn toward a point (pointer steering), at the keyboard turn rate
    pub fn steer_toward(&mut self, target: Vec2) {
        self.body.rotate_to_point(target, SHIP_TURN_DEGREES);
    }

    /// Reset for a new round: stopped, engines off, facing `direction`,
    /// centered at `center`
    pub fn reset_at(&mut self, center: Vec2, direction: f32) {
        self.engines_on = false;
        self.body.set_velocity(Vec2::ZERO);
        self.body.set_spin(0.0);
        self.body.clear_pending_motion();
        self.body.set_direction(direction);
        self.body.place_center_at(center);
        self.body.set_visible(true);
        self.body.set_appearance(Appearance::Ship);
    }
}

impl Movable for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, area: &Bounds) {
        if self.engines_on {
            let thrust = self.body.direction_vector() * SHIP_THRUST;
            self.body.change_velocity(thrust);
            self.body.set_appearance(Appearance::ShipThrusting);
        } else {
            self.body.set_appearance(Appearance::Ship);
        }

        self.body.update_direction();
        self.body.update_position(area);
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}
