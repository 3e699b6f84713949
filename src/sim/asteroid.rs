//! Asteroids and their fragmentation
//!
//! Each asteroid has a size tier and a random star-shaped outline. Destroying
//! one splits it into smaller tiers:
//! - Large -> 3 Medium + 1 Small
//! - Medium -> 3 Small
//! - Small -> nothing

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, Movable};
use super::shape::{Appearance, Bounds, Shape};
use crate::consts::ASTEROID_VERTEX_COUNT;
use crate::heading;

/// Number of rock texture variants the renderer provides
const ROCK_VARIANTS: u8 = 8;

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidTier {
    Small,
    Medium,
    Large,
}

impl AsteroidTier {
    /// Nominal radius of the outline
    pub fn size(self) -> u32 {
        match self {
            AsteroidTier::Small => 15,
            AsteroidTier::Medium => 30,
            AsteroidTier::Large => 50,
        }
    }

    /// Scale applied to the random base velocity and spin (small rocks are fast)
    pub fn speed_multiplier(self) -> f32 {
        match self {
            AsteroidTier::Small => 3.0,
            AsteroidTier::Medium => 1.0,
            AsteroidTier::Large => 0.4,
        }
    }

    /// Points for destroying an asteroid of this tier. A full wave of large
    /// asteroids is worth `NOMINAL_ROUND_SCORE` in total.
    pub fn reward(self) -> u64 {
        match self {
            AsteroidTier::Small => 500,
            AsteroidTier::Medium => 285,
            AsteroidTier::Large => 145,
        }
    }

    /// Tiers of the fragments left behind when destroyed
    pub fn fragments(self) -> &'static [AsteroidTier] {
        use AsteroidTier::*;
        match self {
            Small => &[],
            Medium => &[Small, Small, Small],
            Large => &[Medium, Medium, Medium, Small],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    body: Body,
    tier: AsteroidTier,
}

impl Asteroid {
    /// New asteroid at rest with a freshly generated outline
    pub fn new<R: Rng + ?Sized>(tier: AsteroidTier, rng: &mut R) -> Self {
        let outline = random_outline(tier.size(), ASTEROID_VERTEX_COUNT, rng);
        let variant = rng.random_range(0..ROCK_VARIANTS);
        Self {
            body: Body::new(Shape::new(outline, Appearance::Rock { variant })),
            tier,
        }
    }

    pub fn tier(&self) -> AsteroidTier {
        self.tier
    }

    /// Draw a new velocity and spin, scaled by the tier
    pub fn randomize_movement<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let base_velocity = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let base_spin: f32 = rng.random_range(-1.0..1.0);
        let scale = self.tier.speed_multiplier();
        self.body.set_velocity(base_velocity * scale);
        self.body.set_spin(base_spin * scale);
    }

    /// Fragments left behind when this asteroid is destroyed. Each fragment
    /// has its own outline and random movement; placing them is up to the
    /// caller.
    pub fn split<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Asteroid> {
        self.tier
            .fragments()
            .iter()
            .map(|&tier| {
                let mut fragment = Asteroid::new(tier, rng);
                fragment.randomize_movement(rng);
                fragment
            })
            .collect()
    }
}

impl Movable for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self, area: &Bounds) {
        self.body.update_direction();
        self.body.update_position(area);
    }
}

/// Random star-shaped outline around the origin
///
/// Vertex distances are drawn from [size/2, size) and limited to within
/// size/8 of the previous vertex to avoid spikes.
fn random_outline<R: Rng + ?Sized>(size: u32, vertex_count: usize, rng: &mut R) -> Vec<Vec2> {
    let size_f = size as f32;
    let angle_step = 360.0 / vertex_count as f32;
    let max_step = size_f / 8.0;
    let mut prev = 0.75 * size_f;

    (1..=vertex_count)
        .map(|k| {
            let drawn = rng.random_range(0..(size / 2).max(1)) as f32 + size_f / 2.0;
            let length = drawn.clamp(prev - max_step, prev + max_step);
            prev = length;
            heading(angle_step * k as f32) * length
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NOMINAL_ROUND_SCORE;
    use crate::consts::WAVE_SIZE;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_split_small_is_terminal() {
        let mut rng = rng();
        let small = Asteroid::new(AsteroidTier::Small, &mut rng);
        assert!(small.split(&mut rng).is_empty());
    }

    #[test]
    fn test_split_medium() {
        let mut rng = rng();
        let medium = Asteroid::new(AsteroidTier::Medium, &mut rng);
        let parts = medium.split(&mut rng);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|a| a.tier() == AsteroidTier::Small));
    }

    #[test]
    fn test_split_large() {
        let mut rng = rng();
        let large = Asteroid::new(AsteroidTier::Large, &mut rng);
        let parts = large.split(&mut rng);
        assert_eq!(parts.len(), 4);
        let mediums = parts
            .iter()
            .filter(|a| a.tier() == AsteroidTier::Medium)
            .count();
        let smalls = parts
            .iter()
            .filter(|a| a.tier() == AsteroidTier::Small)
            .count();
        assert_eq!((mediums, smalls), (3, 1));
    }

    #[test]
    fn test_fragments_are_moving() {
        let mut rng = rng();
        let large = Asteroid::new(AsteroidTier::Large, &mut rng);
        for part in large.split(&mut rng) {
            let limit = part.tier().speed_multiplier();
            let v = part.body().velocity();
            assert!(v.x.abs() <= limit && v.y.abs() <= limit);
            assert!(part.body().spin().abs() <= limit);
            assert!(v != Vec2::ZERO);
        }
    }

    #[test]
    fn test_randomize_movement_scaled_by_tier() {
        let mut rng = rng();
        for tier in [AsteroidTier::Small, AsteroidTier::Medium, AsteroidTier::Large] {
            let mut a = Asteroid::new(tier, &mut rng);
            for _ in 0..50 {
                a.randomize_movement(&mut rng);
                let v = a.body().velocity();
                let limit = tier.speed_multiplier();
                assert!(v.x.abs() <= limit, "{tier:?} vx {}", v.x);
                assert!(v.y.abs() <= limit, "{tier:?} vy {}", v.y);
                assert!(a.body().spin().abs() <= limit);
            }
        }
    }

    #[test]
    fn test_outline_smoothing() {
        let mut rng = rng();
        for tier in [AsteroidTier::Small, AsteroidTier::Medium, AsteroidTier::Large] {
            let size = tier.size() as f32;
            let a = Asteroid::new(tier, &mut rng);
            let radii: Vec<f32> = a
                .bounding_shape()
                .local_vertices()
                .iter()
                .map(|v| v.length())
                .collect();
            assert_eq!(radii.len(), ASTEROID_VERTEX_COUNT);
            for r in &radii {
                assert!(*r >= size / 2.0 - 1e-3 && *r <= size + 1e-3);
            }
            for pair in radii.windows(2) {
                assert!((pair[1] - pair[0]).abs() <= size / 8.0 + 1e-3);
            }
            // First vertex stays close to three quarters of the size
            assert!((radii[0] - 0.75 * size).abs() <= size / 8.0 + 1e-3);
        }
    }

    #[test]
    fn test_same_seed_same_outline() {
        let a = Asteroid::new(AsteroidTier::Large, &mut Pcg32::seed_from_u64(7));
        let b = Asteroid::new(AsteroidTier::Large, &mut Pcg32::seed_from_u64(7));
        assert_eq!(
            a.bounding_shape().local_vertices(),
            b.bounding_shape().local_vertices()
        );
    }

    /// Points for destroying `tier` and everything it splits into
    fn full_value(tier: AsteroidTier) -> u64 {
        tier.reward()
            + tier
                .fragments()
                .iter()
                .map(|&t| full_value(t))
                .sum::<u64>()
    }

    #[test]
    fn test_full_wave_reward_total() {
        let wave = WAVE_SIZE as u64 * full_value(AsteroidTier::Large);
        assert_eq!(wave, NOMINAL_ROUND_SCORE);
    }

    #[test]
    fn test_advance_applies_spin() {
        let mut rng = rng();
        let mut a = Asteroid::new(AsteroidTier::Medium, &mut rng);
        a.body_mut().place_center_at(Vec2::new(300.0, 300.0));
        a.body_mut().set_spin(2.0);
        a.advance(&Bounds::from_size(600.0, 600.0));
        assert!((a.body().direction() - 2.0).abs() < 1e-5);
    }
}
