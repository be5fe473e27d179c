use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{
    geometry::RelativeDirection,
    math::{is_axis_aligned, route_length},
};

/// Result of a route search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteOutcome {
    /// The route ends on the destination boundary.
    Complete(Vec<Point<i32>>),
    /// The search gave up before reaching the destination. The points are
    /// the way it got, starting on the source boundary.
    Partial(Vec<Point<i32>>),
    /// No route is searched for this placement, e.g. intersecting rectangles.
    Unclassified(RelativeDirection),
}

impl RouteOutcome {
    pub fn points(&self) -> &[Point<i32>] {
        match self {
            RouteOutcome::Complete(points) | RouteOutcome::Partial(points) => points,
            RouteOutcome::Unclassified(..) => &[],
        }
    }

    pub fn into_points(self) -> Vec<Point<i32>> {
        match self {
            RouteOutcome::Complete(points) | RouteOutcome::Partial(points) => points,
            RouteOutcome::Unclassified(..) => vec![],
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, RouteOutcome::Complete(..))
    }

    pub fn length(&self) -> i64 {
        route_length(self.points())
    }

    pub fn is_axis_aligned(&self) -> bool {
        is_axis_aligned(self.points())
    }
}
