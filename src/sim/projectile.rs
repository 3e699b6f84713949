//! Projectiles fired by the ship
//!
//! A projectile lives for a fixed number of ticks. It never removes itself;
//! the round drops it once `ticks_remaining` reaches 0.

use super::body::{Body, Movable};
use super::shape::{Appearance, Bounds, Shape};
use crate::consts::{PROJECTILE_MAX_SPEED, PROJECTILE_SIZE};

#[derive(Debug, Clone)]
pub struct Projectile {
    body: Body,
    ticks_remaining: u32,
}

impl Projectile {
    /// New projectile shown for `ticks` ticks (negative values mean 0)
    pub fn new(ticks: i32) -> Self {
        let mut body = Body::new(Shape::rect(
            PROJECTILE_SIZE,
            PROJECTILE_SIZE,
            Appearance::Projectile,
        ));
        body.set_max_speed(PROJECTILE_MAX_SPEED);
        Self {
            body,
            ticks_remaining: ticks.max(0) as u32,
        }
    }

    pub fn ticks_remaining(&self) -> u32 {
        self.ticks_remaining
    }

    /// Negative values mean 0
    pub fn set_ticks_remaining(&mut self, ticks: i32) {
        self.ticks_remaining = ticks.max(0) as u32;
    }

    /// Mark for removal at the end of the current tick
    pub fn expire(&mut self) {
        self.ticks_remaining = 0;
    }

    pub fn is_expired(&self) -> bool {
        self.ticks_remaining == 0
    }
}

impl Movable for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, area: &Bounds) {
        self.body.update_direction();
        self.body.update_position(area);
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_negative_lifetime_clamps() {
        let p = Projectile::new(-10);
        assert_eq!(p.ticks_remaining(), 0);
        assert!(p.is_expired());

        let mut p = Projectile::new(5);
        p.set_ticks_remaining(-1);
        assert_eq!(p.ticks_remaining(), 0);
    }

    #[test]
    fn test_lifetime_counts_down_to_zero() {
        let area = Bounds::from_size(500.0, 500.0);
        let mut p = Projectile::new(3);
        p.body_mut().place_center_at(Vec2::new(100.0, 100.0));
        p.body_mut().set_velocity(Vec2::new(7.0, 0.0));

        p.advance(&area);
        p.advance(&area);
        assert_eq!(p.ticks_remaining(), 1);
        p.advance(&area);
        assert!(p.is_expired());
        // Stays at zero
        p.advance(&area);
        assert_eq!(p.ticks_remaining(), 0);
        assert!((p.body().center().x - 128.0).abs() < 1e-3);
    }

    #[test]
    fn test_launch_speed_not_clamped() {
        let mut p = Projectile::new(120);
        p.body_mut().set_velocity(Vec2::new(0.0, -7.0));
        assert_eq!(p.body().velocity(), Vec2::new(0.0, -7.0));
    }

    #[test]
    fn test_expire() {
        let mut p = Projectile::new(120);
        p.expire();
        assert!(p.is_expired());
    }
}
