//! Collision detection between entity outlines
//!
//! Outlines are simple polygons (the ship and projectiles are convex, asteroids
//! are star-shaped). Two outlines collide when their overlap has non-zero area:
//! an edge of one properly crosses an edge of the other, or one outline lies
//! inside the other. Touching along an edge or at a vertex is not a collision.

use glam::Vec2;

/// Check whether two polygons overlap with non-zero area
pub fn polygons_intersect(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.len() < 3 || b.len() < 3 {
        return false;
    }

    // Crossing edges
    for (a0, a1) in edges(a) {
        for (b0, b1) in edges(b) {
            if segments_cross(a0, a1, b0, b1) {
                return true;
            }
        }
    }

    // No crossing: either disjoint, touching, or one contains the other
    point_in_polygon(centroid(a), b) || point_in_polygon(centroid(b), a)
}

/// Area centroid, falling back to the vertex average for degenerate outlines
pub fn centroid(poly: &[Vec2]) -> Vec2 {
    let mut area2 = 0.0_f32;
    let mut acc = Vec2::ZERO;
    for (p, q) in edges(poly) {
        let cross = p.perp_dot(q);
        area2 += cross;
        acc += (p + q) * cross;
    }
    if area2.abs() < f32::EPSILON {
        let sum: Vec2 = poly.iter().copied().sum();
        return sum / poly.len().max(1) as f32;
    }
    acc / (3.0 * area2)
}

/// Iterate polygon edges, closing the loop
fn edges(poly: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    poly.iter()
        .zip(poly.iter().cycle().skip(1))
        .map(|(p, q)| (*p, *q))
}

/// Signed area of the triangle (a, b, c), doubled
#[inline]
fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Proper crossing: each segment's endpoints lie strictly on opposite sides of
/// the other. Collinear or endpoint contact does not count.
pub fn segments_cross(p0: Vec2, p1: Vec2, q0: Vec2, q1: Vec2) -> bool {
    let d1 = orient(q0, q1, p0);
    let d2 = orient(q0, q1, p1);
    let d3 = orient(p0, p1, q0);
    let d4 = orient(p0, p1, q1);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// Even-odd ray casting test
pub fn point_in_polygon(point: Vec2, poly: &[Vec2]) -> bool {
    let mut inside = false;
    for (a, b) in edges(poly) {
        if (a.y > point.y) != (b.y > point.y) {
            let t = (point.y - a.y) / (b.y - a.y);
            let x_cross = a.x + t * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}
