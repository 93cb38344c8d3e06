//! Planar geometry for hit testing
//!
//! Screen space: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Square of side `side` anchored at `top_left`
    pub fn square(top_left: Vec2, side: f32) -> Self {
        Self {
            min: top_left,
            size: Vec2::splat(side),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict interior test (points on an edge are outside)
    pub fn contains_strict(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }

    /// Inclusive test (points on an edge are inside), used for buttons
    pub fn contains_inclusive(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// Distance from `p` to the segment `a`-`b`
///
/// Projects `p` onto the line through `a` and `b`, clamps the projection
/// parameter to `[0, 1]` and measures to the clamped point. A zero-length
/// segment degenerates to the distance to `a`.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    p.distance(closest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_on_segment_is_zero() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Vec2::new(4.0, 0.0), a, b), 0.0);
        assert_eq!(distance_to_segment(a, a, b), 0.0);
        assert_eq!(distance_to_segment(b, a, b), 0.0);
    }

    #[test]
    fn test_perpendicular_distance() {
        let d = distance_to_segment(
            Vec2::new(5.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamps_past_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        // Beyond b: distance is to b, not to the infinite line
        let d = distance_to_segment(Vec2::new(13.0, 4.0), a, b);
        assert!((d - 5.0).abs() < 1e-6);
        // Before a
        let d = distance_to_segment(Vec2::new(-3.0, -4.0), a, b);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 10.0, 60.0, 60.0);
        assert!(r.contains_strict(Vec2::new(40.0, 40.0)));
        assert!(!r.contains_strict(Vec2::new(10.0, 40.0)));
        assert!(r.contains_inclusive(Vec2::new(10.0, 40.0)));
        assert!(r.contains_inclusive(Vec2::new(70.0, 70.0)));
        assert!(!r.contains_inclusive(Vec2::new(70.1, 70.0)));
        assert_eq!(r.center(), Vec2::new(40.0, 40.0));
    }

    proptest! {
        #[test]
        fn prop_degenerate_segment_is_point_distance(
            px in -1000.0f32..1000.0, py in -1000.0f32..1000.0,
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
        ) {
            let p = Vec2::new(px, py);
            let a = Vec2::new(ax, ay);
            prop_assert_eq!(distance_to_segment(p, a, a), p.distance(a));
        }

        #[test]
        fn prop_collinear_point_on_segment(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            t in 0.0f32..=1.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            let p = a.lerp(b, t);
            prop_assert!(distance_to_segment(p, a, b) < 1e-2);
        }

        #[test]
        fn prop_never_farther_than_nearest_endpoint(
            px in -500.0f32..500.0, py in -500.0f32..500.0,
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
        ) {
            let p = Vec2::new(px, py);
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            let d = distance_to_segment(p, a, b);
            prop_assert!(d <= p.distance(a).min(p.distance(b)) + 1e-3);
        }
    }
}
