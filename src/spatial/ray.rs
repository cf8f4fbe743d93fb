//! Axis-aligned boxes and ray casting against them

use crate::core::types::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from the origin to `size`
    pub fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    /// Point lies strictly inside (boundary counts as outside)
    pub fn contains_open(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Point lies inside or on the boundary
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Box grown by `margin` on every side
    pub fn expand(&self, margin: f64) -> Self {
        let m = Vec2::new(margin, margin);
        Self::new(self.min - m, self.max + m)
    }
}

/// Does the ray `origin + t·direction` (t ≥ 0) touch the box?
///
/// Slab test. The direction need not be normalized. A zero component means
/// the ray runs parallel to that slab and hits only if the origin already lies
/// within it; an all-zero direction degenerates to a containment test.
pub fn ray_intersects_box(origin: Vec2, direction: Vec2, bounds: &Aabb) -> bool {
    let mut t_enter = 0.0_f64;
    let mut t_exit = f64::INFINITY;

    let axes = [
        (origin.x, direction.x, bounds.min.x, bounds.max.x),
        (origin.y, direction.y, bounds.min.y, bounds.max.y),
    ];

    for (o, d, lo, hi) in axes {
        if d == 0.0 {
            if o < lo || o > hi {
                return false;
            }
            continue;
        }

        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Aabb {
        Aabb::from_size(Vec2::new(100.0, 100.0))
    }

    #[test]
    fn test_ray_toward_box_hits() {
        assert!(ray_intersects_box(
            Vec2::new(-20.0, 50.0),
            Vec2::new(1.0, 0.0),
            &field()
        ));
        assert!(ray_intersects_box(
            Vec2::new(-20.0, -20.0),
            Vec2::new(0.3, 0.3),
            &field()
        ));
    }

    #[test]
    fn test_ray_away_from_box_misses() {
        assert!(!ray_intersects_box(
            Vec2::new(-20.0, 50.0),
            Vec2::new(-1.0, 0.0),
            &field()
        ));
        assert!(!ray_intersects_box(
            Vec2::new(150.0, 150.0),
            Vec2::new(0.1, 0.0),
            &field()
        ));
    }

    #[test]
    fn test_parallel_ray_outside_slab_misses() {
        assert!(!ray_intersects_box(
            Vec2::new(-20.0, 120.0),
            Vec2::new(1.0, 0.0),
            &field()
        ));
    }

    #[test]
    fn test_origin_inside_always_hits() {
        assert!(ray_intersects_box(
            Vec2::new(50.0, 50.0),
            Vec2::new(-0.7, 0.2),
            &field()
        ));
    }

    #[test]
    fn test_zero_direction_is_containment() {
        assert!(ray_intersects_box(Vec2::new(10.0, 10.0), Vec2::ZERO, &field()));
        assert!(!ray_intersects_box(Vec2::new(-10.0, 10.0), Vec2::ZERO, &field()));
    }

    #[test]
    fn test_diagonal_ray_passing_corner_misses() {
        // Line x + y = -10 never reaches the positive quadrant
        assert!(!ray_intersects_box(
            Vec2::new(-20.0, 10.0),
            Vec2::new(1.0, -1.0),
            &field()
        ));
    }

    #[test]
    fn test_contains_open_excludes_boundary() {
        let b = field();
        assert!(b.contains_open(Vec2::new(1.0, 1.0)));
        assert!(!b.contains_open(Vec2::new(0.0, 50.0)));
        assert!(b.contains(Vec2::new(0.0, 50.0)));
        assert!(b.expand(5.0).contains(Vec2::new(-4.0, 104.0)));
    }
}
