use geo::{point, Point};
use rstar::{primitives::Rectangle, AABB};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas coordinates. The y axis grows downward,
/// so `top` is the smaller y and `bottom` the larger.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Center rounded toward the top-left corner.
    pub fn center(&self) -> Point<i32> {
        point! {x: self.left + self.width / 2, y: self.top + self.height / 2}
    }

    /// Overlap with a non-zero area. Rectangles that merely touch along an
    /// edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    pub fn contains_point(&self, p: Point<i32>) -> bool {
        self.left <= p.x() && p.x() <= self.right() && self.top <= p.y() && p.y() <= self.bottom()
    }

    /// Whether `p` lies inside the rectangle and off its boundary.
    pub fn strictly_contains(&self, p: Point<i32>) -> bool {
        self.left < p.x() && p.x() < self.right() && self.top < p.y() && p.y() < self.bottom()
    }

    pub fn on_boundary(&self, p: Point<i32>) -> bool {
        self.contains_point(p)
            && (p.x() == self.left
                || p.x() == self.right()
                || p.y() == self.top
                || p.y() == self.bottom())
    }

    pub fn inflate(&self, margin: i32) -> Self {
        Self::from_edges(
            self.left - margin,
            self.top - margin,
            self.right() + margin,
            self.bottom() + margin,
        )
    }

    pub fn perimeter(&self) -> i64 {
        2 * (self.width as i64 + self.height as i64)
    }

    pub fn envelope(&self) -> AABB<[i32; 2]> {
        AABB::from_corners([self.left, self.top], [self.right(), self.bottom()])
    }

    pub fn to_rtree_rectangle(&self) -> Rectangle<[i32; 2]> {
        Rectangle::from_aabb(self.envelope())
    }
}
