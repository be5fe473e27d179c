use geo::{point, Point};
use serde::{Deserialize, Serialize};

use super::Rect;

/// One of the four travel directions of a Manhattan route.
///
/// The *along* axis of a direction is the axis it travels on, the *cross*
/// axis the perpendicular one. `Right` and `Down` travel toward increasing
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn sign(self) -> i32 {
        match self {
            Direction::Right | Direction::Down => 1,
            Direction::Left | Direction::Up => -1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Perpendicular turn toward the smaller cross coordinate.
    pub fn up_or_left(self) -> Self {
        if self.is_horizontal() {
            Direction::Up
        } else {
            Direction::Left
        }
    }

    /// Perpendicular turn toward the larger cross coordinate.
    pub fn down_or_right(self) -> Self {
        if self.is_horizontal() {
            Direction::Down
        } else {
            Direction::Right
        }
    }

    /// Heading of the axis-aligned leg from `from` to `to`. `None` for a
    /// zero-length or diagonal leg.
    pub fn between(from: Point<i32>, to: Point<i32>) -> Option<Self> {
        match (to.x() - from.x(), to.y() - from.y()) {
            (0, 0) => None,
            (0, dy) if dy > 0 => Some(Direction::Down),
            (0, _) => Some(Direction::Up),
            (dx, 0) if dx > 0 => Some(Direction::Right),
            (_, 0) => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn along(self, p: Point<i32>) -> i32 {
        if self.is_horizontal() {
            p.x()
        } else {
            p.y()
        }
    }

    pub fn cross(self, p: Point<i32>) -> i32 {
        if self.is_horizontal() {
            p.y()
        } else {
            p.x()
        }
    }

    pub fn with_along(self, p: Point<i32>, along: i32) -> Point<i32> {
        if self.is_horizontal() {
            point! {x: along, y: p.y()}
        } else {
            point! {x: p.x(), y: along}
        }
    }

    pub fn with_cross(self, p: Point<i32>, cross: i32) -> Point<i32> {
        if self.is_horizontal() {
            point! {x: p.x(), y: cross}
        } else {
            point! {x: cross, y: p.y()}
        }
    }

    /// Moves `p` by `distance` in this direction.
    pub fn shift(self, p: Point<i32>, distance: i32) -> Point<i32> {
        self.with_along(p, self.along(p) + self.sign() * distance)
    }

    /// Whether along-coordinate `a` is met strictly before `b` when
    /// travelling in this direction.
    pub fn precedes(self, a: i32, b: i32) -> bool {
        if self.sign() > 0 {
            a < b
        } else {
            a > b
        }
    }

    /// The coordinate reached later when travelling in this direction.
    pub fn further(self, a: i32, b: i32) -> i32 {
        if self.sign() > 0 {
            a.max(b)
        } else {
            a.min(b)
        }
    }

    /// The coordinate reached sooner when travelling in this direction.
    pub fn nearer(self, a: i32, b: i32) -> i32 {
        if self.sign() > 0 {
            a.min(b)
        } else {
            a.max(b)
        }
    }

    /// Edge of `rect` a ray travelling in this direction hits first.
    pub fn leading_edge(self, rect: &Rect) -> i32 {
        match self {
            Direction::Right => rect.left,
            Direction::Left => rect.right(),
            Direction::Down => rect.top,
            Direction::Up => rect.bottom(),
        }
    }

    /// Edge of `rect` a ray travelling in this direction leaves through.
    pub fn trailing_edge(self, rect: &Rect) -> i32 {
        self.opposite().leading_edge(rect)
    }

    /// `(low, high)` extent of `rect` on the along axis.
    pub fn along_span(self, rect: &Rect) -> (i32, i32) {
        if self.is_horizontal() {
            (rect.left, rect.right())
        } else {
            (rect.top, rect.bottom())
        }
    }

    /// `(low, high)` extent of `rect` on the cross axis.
    pub fn cross_span(self, rect: &Rect) -> (i32, i32) {
        if self.is_horizontal() {
            (rect.top, rect.bottom())
        } else {
            (rect.left, rect.right())
        }
    }

    /// Rebuilds a rectangle from spans given in this direction's axes.
    pub fn rect_from_spans(self, along: (i32, i32), cross: (i32, i32)) -> Rect {
        if self.is_horizontal() {
            Rect::from_edges(along.0, cross.0, along.1, cross.1)
        } else {
            Rect::from_edges(cross.0, along.0, cross.1, along.1)
        }
    }
}

/// Placement of a destination rectangle relative to a source rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeDirection {
    Up,
    Down,
    Left,
    Right,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    Overlap,
    Unknown,
}

impl RelativeDirection {
    /// Classifies where `dst` lies as seen from `src`. The first matching rule
    /// wins: a shared column gives `Up`/`Down`, a shared row `Left`/`Right`,
    /// then the diagonals, then `Overlap` for intersecting rectangles.
    /// Anything else, e.g. rectangles touching along an edge, is `Unknown`.
    pub fn classify(src: &Rect, dst: &Rect) -> Self {
        // Doubled coordinates keep the half extents exact.
        let dx = ((2 * src.left + src.width) - (2 * dst.left + dst.width)).abs();
        let dy = ((2 * src.top + src.height) - (2 * dst.top + dst.height)).abs();

        if dx <= src.width + dst.width {
            if src.bottom() < dst.top {
                return RelativeDirection::Down;
            }
            if dst.bottom() < src.top {
                return RelativeDirection::Up;
            }
        }

        if dy <= src.height + dst.height {
            if src.right() < dst.left {
                return RelativeDirection::Right;
            }
            if dst.right() < src.left {
                return RelativeDirection::Left;
            }
        }

        if dst.right() < src.left {
            if dst.bottom() < src.top {
                return RelativeDirection::LeftUp;
            }
            if dst.top > src.bottom() {
                return RelativeDirection::LeftDown;
            }
        }

        if src.right() < dst.left {
            if src.bottom() < dst.top {
                return RelativeDirection::RightDown;
            }
            if src.top > dst.bottom() {
                return RelativeDirection::RightUp;
            }
        }

        if src.intersects(dst) {
            RelativeDirection::Overlap
        } else {
            RelativeDirection::Unknown
        }
    }

    pub fn cardinal(self) -> Option<Direction> {
        match self {
            RelativeDirection::Up => Some(Direction::Up),
            RelativeDirection::Down => Some(Direction::Down),
            RelativeDirection::Left => Some(Direction::Left),
            RelativeDirection::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Horizontal and vertical components of a diagonal placement.
    pub fn diagonal(self) -> Option<(Direction, Direction)> {
        match self {
            RelativeDirection::LeftUp => Some((Direction::Left, Direction::Up)),
            RelativeDirection::LeftDown => Some((Direction::Left, Direction::Down)),
            RelativeDirection::RightUp => Some((Direction::Right, Direction::Up)),
            RelativeDirection::RightDown => Some((Direction::Right, Direction::Down)),
            _ => None,
        }
    }
}
