//! Entity outline geometry
//!
//! A `Shape` is a polygon in local coordinates plus the transform that places
//! it in the play area:
//! - translation: offset added after rotation
//! - rotation: degrees, about the center of the local bounding box
//!
//! The owning entity is the only writer of the transform. Everything the
//! renderer needs (bounds, visibility, appearance, draw order) is readable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::polygons_intersect;
use crate::heading;

/// Axis-aligned rectangle (min/max corners)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// Smallest rectangle containing every point (empty input gives a zero box)
    pub fn from_points(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(Vec2::ZERO, Vec2::ZERO);
        };
        points
            .iter()
            .skip(1)
            .fold(Self::new(*first, *first), |acc, p| {
                Self::new(acc.min.min(*p), acc.max.max(*p))
            })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True if the two rectangles share interior area
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Fill token handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Appearance {
    Ship,
    ShipThrusting,
    Projectile,
    /// Rock texture, variant picked at random per asteroid
    Rock { variant: u8 },
}

/// A polygon outline with a translation and a rotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    /// Vertices in local coordinates
    local: Vec<Vec2>,
    /// Bounding box of the local vertices (before any transform)
    local_bounds: Bounds,
    /// Translation applied after rotation
    translation: Vec2,
    /// Rotation in degrees about the local bounds center
    rotation: f32,
    /// Shown or hidden (blinking during invulnerability)
    pub visible: bool,
    /// Fill token for the renderer
    pub appearance: Appearance,
    /// Lower values draw on top
    pub draw_order: i32,
}

impl Shape {
    pub fn new(local: Vec<Vec2>, appearance: Appearance) -> Self {
        let local_bounds = Bounds::from_points(&local);
        Self {
            local,
            local_bounds,
            translation: Vec2::ZERO,
            rotation: 0.0,
            visible: true,
            appearance,
            draw_order: 0,
        }
    }

    /// Axis-aligned rectangle with its corner at the local origin
    pub fn rect(width: f32, height: f32, appearance: Appearance) -> Self {
        Self::new(
            vec![
                Vec2::ZERO,
                Vec2::new(width, 0.0),
                Vec2::new(width, height),
                Vec2::new(0.0, height),
            ],
            appearance,
        )
    }

    /// Local vertices (untransformed)
    pub fn local_vertices(&self) -> &[Vec2] {
        &self.local
    }

    /// Size of the untransformed outline
    pub fn local_bounds(&self) -> Bounds {
        self.local_bounds
    }

    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    pub(crate) fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    /// Vertices in play-area coordinates
    pub fn world_vertices(&self) -> Vec<Vec2> {
        let pivot = self.local_bounds.center();
        let turn = heading(self.rotation);
        self.local
            .iter()
            .map(|v| turn.rotate(*v - pivot) + pivot + self.translation)
            .collect()
    }

    /// Bounding box in play-area coordinates
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.world_vertices())
    }

    /// Center of the play-area bounding box
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Geometric intersection of the two current outlines
    pub fn intersects(&self, other: &Shape) -> bool {
        if !self.bounds().overlaps(&other.bounds()) {
            return false;
        }
        polygons_intersect(&self.world_vertices(), &other.world_vertices())
    }
}
