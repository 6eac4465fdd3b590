//! Axis-aligned rectangles and trigger regions
//!
//! Screen-style coordinates: +x right, +y down. A rectangle is stored by its
//! top-left corner and size. Overlap tests are strict, so shapes that merely
//! share an edge do not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: shared edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Closest point inside the rectangle to `p`
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// A trigger region: rectangle or circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Region {
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
}

impl Region {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Region::Circle { center, radius }
    }

    /// Does a body footprint overlap this region?
    pub fn overlaps(&self, footprint: &Rect) -> bool {
        match *self {
            Region::Rect(rect) => rect.intersects(footprint),
            Region::Circle { center, radius } => {
                let closest = footprint.clamp_point(center);
                closest.distance_squared(center) < radius * radius
            }
        }
    }

    /// Bounding rectangle (for level export and debug views)
    pub fn bounds(&self) -> Rect {
        match *self {
            Region::Rect(rect) => rect,
            Region::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let floor = Rect::new(0.0, 400.0, 900.0, 40.0);
        let resting = Rect::new(100.0, 360.0, 40.0, 40.0);
        assert!(!resting.intersects(&floor));

        let sunk = Rect::new(100.0, 360.5, 40.0, 40.0);
        assert!(sunk.intersects(&floor));
        assert!(floor.intersects(&sunk));
    }

    #[test]
    fn test_circle_region_overlap() {
        let orb = Region::circle(Vec2::new(100.0, 100.0), 12.0);
        // Box whose corner sits just outside the circle along the diagonal
        let corner = Rect::new(109.0, 109.0, 40.0, 40.0);
        assert!(!orb.overlaps(&corner));
        // Edge within radius
        let side = Rect::new(110.0, 80.0, 40.0, 40.0);
        assert!(orb.overlaps(&side));
        // Circle fully inside the box
        let around = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert!(orb.overlaps(&around));
    }

    #[test]
    fn test_circle_bounds() {
        let orb = Region::circle(Vec2::new(100.0, 50.0), 10.0);
        assert_eq!(orb.bounds(), Rect::new(90.0, 40.0, 20.0, 20.0));
    }
}
