//! Axis-aligned rectangle collision
//!
//! Every level uses the same strict-inequality overlap test: rectangles that
//! only share an edge do not collide.

use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` with its top-left corner at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }

    /// Inclusive point test (used for clicks)
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Strict AABB overlap test
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Push a square out of `wall` horizontally, toward the side its center is on
///
/// Returns the corrected top-left position; untouched if there is no overlap.
pub fn push_out_horizontal(pos: Vec2, size: f32, wall: &Rect) -> Vec2 {
    if !Rect::square(pos, size).intersects(wall) {
        return pos;
    }
    let x = if pos.x + size / 2.0 < wall.x + wall.w / 2.0 {
        wall.x - size
    } else {
        wall.right()
    };
    Vec2::new(x, pos.y)
}

/// Push a square out of `wall` along the axis of least penetration
///
/// Ties resolve in the order left, right, top, bottom.
pub fn push_out_min_axis(pos: Vec2, size: f32, wall: &Rect) -> Vec2 {
    if !Rect::square(pos, size).intersects(wall) {
        return pos;
    }
    let overlap_left = (pos.x + size) - wall.x;
    let overlap_right = wall.right() - pos.x;
    let overlap_top = (pos.y + size) - wall.y;
    let overlap_bottom = wall.bottom() - pos.y;

    let min = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);

    if min == overlap_left {
        Vec2::new(wall.x - size, pos.y)
    } else if min == overlap_right {
        Vec2::new(wall.right(), pos.y)
    } else if min == overlap_top {
        Vec2::new(pos.x, wall.y - size)
    } else {
        Vec2::new(pos.x, wall.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..200.0, 0.5f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_rect_intersects_itself(a in rect_strategy()) {
            prop_assert!(a.intersects(&a));
        }

        #[test]
        fn prop_min_axis_push_clears_overlap(
            x in 60.0f32..150.0,
            y in 0.0f32..240.0,
        ) {
            let wall = Rect::new(100.0, 50.0, 40.0, 200.0);
            let out = push_out_min_axis(Vec2::new(x, y), 24.0, &wall);
            prop_assert!(!Rect::square(out, 24.0).intersects(&wall));
        }
    }

    #[test]
    fn test_edge_touching_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(a.intersects(&Rect::new(9.9, 9.9, 10.0, 10.0)));
    }

    #[test]
    fn test_push_out_horizontal_uses_entry_side() {
        let wall = Rect::new(385.0, 0.0, 30.0, 600.0);

        // Center left of the wall's center: pushed back to the left face
        let out = push_out_horizontal(Vec2::new(365.0, 100.0), 24.0, &wall);
        assert_eq!(out, Vec2::new(361.0, 100.0));

        // Center right of it: pushed to the right face
        let out = push_out_horizontal(Vec2::new(400.0, 100.0), 24.0, &wall);
        assert_eq!(out, Vec2::new(415.0, 100.0));

        // No overlap: unchanged
        let out = push_out_horizontal(Vec2::new(100.0, 100.0), 24.0, &wall);
        assert_eq!(out, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_push_out_min_axis_single_axis() {
        let wall = Rect::new(120.0, 20.0, 20.0, 200.0);

        // Overlapping the wall's left face by 2px
        let out = push_out_min_axis(Vec2::new(98.0, 100.0), 24.0, &wall);
        assert_eq!(out, Vec2::new(96.0, 100.0));

        // Overlapping its bottom face by 3px
        let out = push_out_min_axis(Vec2::new(118.0, 217.0), 24.0, &wall);
        assert_eq!(out, Vec2::new(118.0, 220.0));
    }

    #[test]
    fn test_contains_point_is_inclusive() {
        let r = Rect::new(300.0, 399.0, 200.0, 44.0);
        assert!(r.contains_point(300.0, 399.0));
        assert!(r.contains_point(500.0, 443.0));
        assert!(!r.contains_point(299.9, 420.0));
    }
}
