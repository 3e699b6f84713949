//! Shared motion model for everything that moves on screen
//!
//! A `Body` carries two kinds of motion:
//! - persistent: `velocity` and `spin`, applied on every tick
//! - instant: `move_by` and `rotate`, accumulated between ticks, applied once
//!   on the next tick and then cleared
//!
//! The velocity magnitude never exceeds `max_speed`. Instant motion is not
//! limited.

use glam::Vec2;

use super::shape::{Bounds, Shape};
use crate::consts::{DEFAULT_MAX_SPEED, DEFAULT_WRAP_PERCENT};
use crate::{bearing_degrees, heading, normalize_degrees};

/// Motion state of a single entity; owns its outline exclusively
#[derive(Debug, Clone)]
pub struct Body {
    shape: Shape,
    velocity: Vec2,
    spin: f32,
    movement: Vec2,
    rotation: f32,
    direction: f32,
    max_speed: f32,
    wrap_percent: f32,
}

impl Body {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            velocity: Vec2::ZERO,
            spin: 0.0,
            movement: Vec2::ZERO,
            rotation: 0.0,
            direction: 0.0,
            max_speed: DEFAULT_MAX_SPEED,
            wrap_percent: DEFAULT_WRAP_PERCENT,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Center of the current bounding box
    pub fn center(&self) -> Vec2 {
        self.shape.center()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.shape.visible = visible;
    }

    pub fn set_draw_order(&mut self, order: i32) {
        self.shape.draw_order = order;
    }

    // --- Persistent motion ---

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Set the velocity, scaled down to `max_speed` if needed
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity.clamp_length_max(self.max_speed);
    }

    /// Add to the velocity, scaled down to `max_speed` if needed
    pub fn change_velocity(&mut self, delta: Vec2) {
        self.set_velocity(self.velocity + delta);
    }

    /// Spin in degrees per tick
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn set_spin(&mut self, degrees: f32) {
        self.spin = degrees;
    }

    pub fn change_spin(&mut self, degrees: f32) {
        self.spin += degrees;
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Set the velocity cap (negative values clamp to 0). The current velocity
    /// is re-clamped.
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed.max(0.0);
        self.set_velocity(self.velocity);
    }

    pub fn wrap_percent(&self) -> f32 {
        self.wrap_percent
    }

    /// Share of the entity (percent) that must leave the play area before it
    /// wraps. Clamped to [0, 100].
    pub fn set_wrap_percent(&mut self, percent: f32) {
        self.wrap_percent = percent.clamp(0.0, 100.0);
    }

    // --- Direction ---

    /// Facing in degrees, (-180, 180]
    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Unit vector along the facing
    pub fn direction_vector(&self) -> Vec2 {
        heading(self.direction)
    }

    /// Face `degrees` immediately (spawn-time placement)
    pub fn set_direction(&mut self, degrees: f32) {
        self.direction = normalize_degrees(degrees);
        self.shape.set_rotation(self.direction);
    }

    /// Move so the bounding box center sits at `point` immediately
    /// (spawn-time placement)
    pub fn place_center_at(&mut self, point: Vec2) {
        let offset = point - self.shape.center();
        self.shape.translate(offset);
    }

    // --- Instant motion ---

    /// Queue a one-shot move for the next tick
    pub fn move_by(&mut self, delta: Vec2) {
        self.movement += delta;
    }

    /// Queue a one-shot rotation (degrees) for the next tick
    pub fn rotate(&mut self, degrees: f32) {
        self.rotation += degrees;
    }

    /// Pending one-shot motion: (movement, rotation)
    pub fn pending_motion(&self) -> (Vec2, f32) {
        (self.movement, self.rotation)
    }

    /// Drop any queued one-shot motion
    pub fn clear_pending_motion(&mut self) {
        self.movement = Vec2::ZERO;
        self.rotation = 0.0;
    }

    /// Queue a turn toward `target`, at most `max_delta` degrees either way
    pub fn rotate_to_point(&mut self, target: Vec2, max_delta: f32) {
        let bearing = bearing_degrees(self.center(), target);
        let diff = normalize_degrees(bearing - self.direction);
        let limit = max_delta.abs();
        self.rotate(diff.clamp(-limit, limit));
    }

    // --- Per-tick primitives ---

    /// Apply spin and queued rotation, then clear the queued rotation
    pub fn update_direction(&mut self) {
        self.direction = normalize_degrees(self.direction + self.rotation + self.spin);
        self.rotation = 0.0;
        self.shape.set_rotation(self.direction);
    }

    /// Apply velocity and queued movement, clear the queued movement, then wrap
    pub fn update_position(&mut self, area: &Bounds) {
        let delta = self.movement + self.velocity;
        self.movement = Vec2::ZERO;
        self.shape.translate(delta);
        self.wrap(area);
    }

    /// Relocate to the opposite edge once the entity has left the play area by
    /// more than `wrap_percent` of its size. Axes are handled independently.
    pub fn wrap(&mut self, area: &Bounds) {
        let center = self.shape.center();
        let size = self.shape.local_bounds();
        let margin_x = size.width() * (self.wrap_percent / 100.0);
        let margin_y = size.height() * (self.wrap_percent / 100.0);

        let mut shift = Vec2::ZERO;
        if center.x - margin_x > area.max.x {
            shift.x = (area.min.x - margin_x) - center.x;
        } else if center.x + margin_x < area.min.x {
            shift.x = (area.max.x + margin_x) - center.x;
        }
        if center.y - margin_y > area.max.y {
            shift.y = (area.min.y - margin_y) - center.y;
        } else if center.y + margin_y < area.min.y {
            shift.y = (area.max.y + margin_y) - center.y;
        }

        if shift != Vec2::ZERO {
            self.shape.translate(shift);
        }
    }

    /// Non-empty overlap of the two current outlines
    pub fn collides_with(&self, other: &Body) -> bool {
        self.shape.intersects(&other.shape)
    }

    pub(crate) fn set_appearance(&mut self, appearance: super::shape::Appearance) {
        self.shape.appearance = appearance;
    }
}

mod private {
    pub trait Sealed {}
}

impl private::Sealed for super::ship::Ship {}
impl private::Sealed for super::projectile::Projectile {}
impl private::Sealed for super::asteroid::Asteroid {}

/// Capability shared by the ship, projectiles and asteroids
///
/// The set of implementors is closed; each one adds only its per-tick
/// behavior on top of the shared `Body`.
pub trait Movable: private::Sealed {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Advance by one simulation tick
    fn advance(&mut self, area: &Bounds);

    /// Current outline used for drawing and collisions
    fn bounding_shape(&self) -> &Shape {
        self.body().shape()
    }

    /// Queue one-shot motion for the next tick
    fn apply_instant_motion(&mut self, delta: Vec2, degrees: f32) {
        let body = self.body_mut();
        body.move_by(delta);
        body.rotate(degrees);
    }

    fn collides_with(&self, other: &dyn Movable) -> bool {
        self.body().collides_with(other.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::Appearance;
    use proptest::prelude::*;

    fn square_body() -> Body {
        Body::new(Shape::rect(10.0, 10.0, Appearance::Projectile))
    }

    fn area() -> Bounds {
        Bounds::from_size(200.0, 100.0)
    }

    fn assert_near(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_change_velocity_clamps_to_max_speed() {
        let mut body = square_body();
        body.set_max_speed(5.0);
        body.change_velocity(Vec2::new(10.0, 0.0));
        assert_eq!(body.velocity().length(), 5.0);
        assert_eq!(body.velocity(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_lowering_max_speed_reclamps() {
        let mut body = square_body();
        body.set_velocity(Vec2::new(3.0, 4.0));
        assert_eq!(body.velocity().length(), 5.0);
        body.set_max_speed(2.5);
        assert!((body.velocity().length() - 2.5).abs() < 1e-5);
        body.set_max_speed(-1.0);
        assert_eq!(body.max_speed(), 0.0);
        assert_eq!(body.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_instant_motion_applies_once() {
        let mut body = square_body();
        body.place_center_at(Vec2::new(50.0, 50.0));
        body.move_by(Vec2::new(3.0, 0.0));
        body.move_by(Vec2::new(2.0, 1.0));
        body.rotate(10.0);
        body.rotate(5.0);

        body.update_direction();
        body.update_position(&area());
        assert_near(body.center(), Vec2::new(55.0, 51.0));
        assert_eq!(body.direction(), 15.0);
        assert_eq!(body.pending_motion(), (Vec2::ZERO, 0.0));

        // Nothing left over for the next tick
        body.update_direction();
        body.update_position(&area());
        assert_near(body.center(), Vec2::new(55.0, 51.0));
        assert_eq!(body.direction(), 15.0);
    }

    #[test]
    fn test_instant_motion_ignores_max_speed() {
        let mut body = square_body();
        body.set_max_speed(1.0);
        body.place_center_at(Vec2::new(50.0, 50.0));
        body.move_by(Vec2::new(40.0, 0.0));
        body.update_position(&area());
        assert_near(body.center(), Vec2::new(90.0, 50.0));
    }

    #[test]
    fn test_spin_accumulates_direction() {
        let mut body = square_body();
        body.set_spin(100.0);
        body.update_direction();
        body.update_direction();
        // 200 wraps to -160
        assert!((body.direction() - (-160.0)).abs() < 1e-4);
        assert_eq!(body.shape().rotation(), body.direction());
    }

    #[test]
    fn test_rotate_to_point_clamps_turn() {
        let mut body = square_body();
        body.place_center_at(Vec2::new(50.0, 50.0));

        // Target straight below (90 degrees in screen coordinates)
        body.rotate_to_point(Vec2::new(50.0, 90.0), 4.0);
        assert_eq!(body.pending_motion().1, 4.0);
        body.update_direction();

        // Target to the upper left: shortest turn goes through 180
        body.set_direction(170.0);
        body.rotate_to_point(Vec2::new(10.0, 40.0), 4.0);
        assert!((body.pending_motion().1 - 4.0).abs() < 1e-4);

        // Small remaining difference is taken exactly
        let mut body = square_body();
        body.place_center_at(Vec2::new(0.0, 0.0));
        body.set_direction(88.0);
        body.rotate_to_point(Vec2::new(0.0, 100.0), 4.0);
        assert!((body.pending_motion().1 - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_to_point_crosses_180() {
        let mut body = square_body();
        body.place_center_at(Vec2::ZERO);
        body.set_direction(178.0);
        // Bearing -178: shortest turn is +4 across the 180 seam
        let target = heading(-178.0) * 50.0;
        body.rotate_to_point(target, 10.0);
        assert!((body.pending_motion().1 - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_right_to_left() {
        let mut body = square_body();
        let area = area();
        // Center 6 past the right edge; margin is 5 (50% of 10)
        body.place_center_at(Vec2::new(206.0, 50.0));
        body.wrap(&area);
        assert!((body.center().x - (-5.0)).abs() < 1e-4);
        assert_eq!(body.center().y, 50.0);
    }

    #[test]
    fn test_wrap_left_to_right_and_vertical() {
        let mut body = square_body();
        let area = area();
        body.place_center_at(Vec2::new(-6.0, -6.0));
        body.wrap(&area);
        // Corner wrap: both axes at once
        assert!((body.center().x - 205.0).abs() < 1e-4);
        assert!((body.center().y - 105.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_within_margin_stays() {
        let mut body = square_body();
        let area = area();
        // Partially off screen but not beyond the margin
        body.place_center_at(Vec2::new(204.0, 50.0));
        body.wrap(&area);
        assert_eq!(body.center(), Vec2::new(204.0, 50.0));
    }

    #[test]
    fn test_wrapped_entity_does_not_bounce_back() {
        let mut body = square_body();
        let area = area();
        body.place_center_at(Vec2::new(206.0, 50.0));
        body.wrap(&area);
        let after = body.center();
        body.wrap(&area);
        assert_eq!(body.center(), after);
    }

    #[test]
    fn test_update_position_wraps() {
        let mut body = square_body();
        let area = area();
        body.place_center_at(Vec2::new(204.0, 50.0));
        body.set_velocity(Vec2::new(2.0, 0.0));
        body.update_position(&area);
        assert!((body.center().x - (-5.0)).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_percent_clamped() {
        let mut body = square_body();
        body.set_wrap_percent(150.0);
        assert_eq!(body.wrap_percent(), 100.0);
        body.set_wrap_percent(-3.0);
        assert_eq!(body.wrap_percent(), 0.0);
    }

    #[test]
    fn test_collides_with() {
        let mut a = square_body();
        let mut b = square_body();
        a.place_center_at(Vec2::new(50.0, 50.0));
        b.place_center_at(Vec2::new(55.0, 52.0));
        assert!(a.collides_with(&b));
        b.place_center_at(Vec2::new(80.0, 50.0));
        assert!(!a.collides_with(&b));
    }

    proptest! {
        #[test]
        fn prop_velocity_never_exceeds_max_speed(
            max_speed in 0.0f32..50.0,
            start in (-100.0f32..100.0, -100.0f32..100.0),
            deltas in prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 1..20),
        ) {
            let mut body = square_body();
            body.set_max_speed(max_speed);
            body.set_velocity(Vec2::new(start.0, start.1));
            prop_assert!(body.velocity().length() <= max_speed * (1.0 + 1e-5) + 1e-5);
            for (dx, dy) in deltas {
                body.change_velocity(Vec2::new(dx, dy));
                prop_assert!(body.velocity().length() <= max_speed * (1.0 + 1e-5) + 1e-5);
            }
        }

        #[test]
        fn prop_direction_stays_normalized(
            start in -180.0f32..=180.0,
            spin in -180.0f32..180.0,
            turn in -180.0f32..180.0,
        ) {
            let mut body = square_body();
            body.set_direction(start);
            body.set_spin(spin);
            body.rotate(turn);
            body.update_direction();
            let d = body.direction();
            prop_assert!(d > -180.0 && d <= 180.0, "direction {} out of range", d);
        }

        #[test]
        fn prop_buffers_cleared_after_tick(
            moves in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0, -90.0f32..90.0), 0..10),
        ) {
            let mut body = square_body();
            body.place_center_at(Vec2::new(100.0, 50.0));
            for (dx, dy, deg) in moves {
                body.move_by(Vec2::new(dx, dy));
                body.rotate(deg);
            }
            body.update_direction();
            body.update_position(&area());
            prop_assert_eq!(body.pending_motion(), (Vec2::ZERO, 0.0));
        }

        #[test]
        fn prop_inside_entity_never_wraps(
            x in 10.0f32..190.0,
            y in 10.0f32..90.0,
            percent in 0.0f32..=100.0,
        ) {
            let mut body = square_body();
            body.set_wrap_percent(percent);
            body.place_center_at(Vec2::new(x, y));
            let before = body.center();
            body.wrap(&area());
            prop_assert_eq!(body.center(), before);
        }
    }
}
