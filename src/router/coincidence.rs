use geo::{Line, Point};
use itertools::Itertools;

use crate::{geometry::Direction, math::is_coincident};

use super::{CoincidenceFallback, RouterOptions};

/// Keeps a route from doubling back over itself.
///
/// A waypoint is tested by the segment from it to a guess of the waypoint
/// after it. While that segment runs along an earlier segment of the route,
/// with the same heading and closer than `point_spacing`, both points are
/// moved by `point_spacing` on the travel axis: back from a barrier, or
/// onward when the way is open.
#[derive(Debug, Clone, Copy)]
pub struct CoincidenceGuard {
    spacing: i32,
    max_retries: usize,
    fallback: CoincidenceFallback,
}

impl CoincidenceGuard {
    pub fn new(options: &RouterOptions) -> Self {
        Self {
            spacing: options.point_spacing,
            max_retries: options.max_coincidence_retries,
            fallback: options.coincidence_fallback,
        }
    }

    /// Returns the adjusted waypoint, or `None` if it still coincides after
    /// all retries and the fallback is `Abandon`.
    pub fn place(
        &self,
        route: &[Point<i32>],
        direction: Direction,
        waypoint: Point<i32>,
        lookahead: Point<i32>,
        blocked: bool,
    ) -> Option<Point<i32>> {
        let shift = if blocked {
            direction.opposite()
        } else {
            direction
        };
        let (mut waypoint, mut lookahead) = (waypoint, lookahead);

        for attempt in 0..=self.max_retries {
            if !self.coincides(route, Line::new(waypoint, lookahead)) {
                return Some(waypoint);
            }

            if attempt == self.max_retries {
                break;
            }

            waypoint = shift.shift(waypoint, self.spacing);
            lookahead = shift.shift(lookahead, self.spacing);
        }

        match self.fallback {
            CoincidenceFallback::AcceptLast => {
                log::warn!(
                    "waypoint {:?} still runs along the route after {} shifts, keeping it",
                    waypoint,
                    self.max_retries
                );
                Some(waypoint)
            }
            CoincidenceFallback::Abandon => {
                log::warn!(
                    "waypoint {:?} still runs along the route after {} shifts, abandoning",
                    waypoint,
                    self.max_retries
                );
                None
            }
        }
    }

    pub fn coincides(&self, route: &[Point<i32>], candidate: Line<i32>) -> bool {
        route
            .iter()
            .tuple_windows()
            .any(|(start, end)| is_coincident(Line::new(*start, *end), candidate, self.spacing))
    }
}
