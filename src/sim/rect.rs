//! Axis-aligned bounding boxes
//!
//! Every moving entity's authoritative position is a real-valued `Vec2`;
//! the `Rect` derived from it exists only for collision and boundary tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle: top-left corner + size, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Midpoint of the top edge (bullet spawn anchor).
    #[inline]
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    /// Overlap test. Boxes that merely share an edge do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn edges_and_anchor() {
        let r = rect(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.top_center(), Vec2::new(25.0, 20.0));
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&rect(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn edge_touching_is_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn containment_is_overlap() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }
}
