use std::collections::{HashSet, VecDeque};

use geo::Point;
use rstar::AABB;

use crate::{
    canvas::{AccessObstacles, NodeId},
    geometry::{Direction, Rect},
};

use super::{RouterError, RouterOptions, TrapData};

/// An obstacle blocking a ray, grown across the obstacles it overlaps.
///
/// `rect` keeps the along-axis extent of the blocking rectangle and takes
/// the cross-axis extent of its silhouette. `trap` holds the bounds met from
/// the ray's side, `inverse` those on the far side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
    pub node: NodeId,
    pub rect: Rect,
    pub trap: TrapData,
    pub inverse: TrapData,
}

/// Looks for the nearest obstacle along a cardinal ray.
///
/// The source and destination rectangles are never obstacles.
pub struct ObstacleScanner<'a, O: AccessObstacles> {
    obstacles: &'a O,
    source: NodeId,
    destination: NodeId,
    destination_rect: Rect,
    clearance: i32,
}

impl<'a, O: AccessObstacles> ObstacleScanner<'a, O> {
    pub fn new(
        obstacles: &'a O,
        source: NodeId,
        destination: NodeId,
        destination_rect: Rect,
        options: &RouterOptions,
    ) -> Self {
        Self {
            obstacles,
            source,
            destination,
            destination_rect,
            clearance: options.barrier_clearance,
        }
    }

    pub fn destination_rect(&self) -> Rect {
        self.destination_rect
    }

    /// Scans from `point` in `direction` toward `goal`. A `parallel` barrier,
    /// one the route is currently running alongside, extends the scanned
    /// range to its far edge.
    pub fn scan(
        &self,
        point: Point<i32>,
        direction: Direction,
        goal: Point<i32>,
        parallel: Option<&Barrier>,
    ) -> Result<Option<Barrier>, RouterError> {
        let Some((node, rect)) = self.nearest(point, direction, goal, parallel) else {
            return Ok(None);
        };

        if rect.intersects(&self.destination_rect) {
            return Ok(None);
        }

        self.grow(node, rect, point, direction).map(Some)
    }

    fn is_excluded(&self, node: NodeId) -> bool {
        node == self.source || node == self.destination
    }

    fn nearest(
        &self,
        point: Point<i32>,
        direction: Direction,
        goal: Point<i32>,
        parallel: Option<&Barrier>,
    ) -> Option<(NodeId, Rect)> {
        let reach = match parallel {
            Some(barrier) => direction.further(
                direction.along(goal),
                direction.trailing_edge(&barrier.rect),
            ),
            None => direction.along(goal),
        };
        let limit = reach + direction.sign() * self.clearance;

        let end = direction.with_along(point, limit);
        let corridor = AABB::from_corners([point.x(), point.y()], [end.x(), end.y()]);
        let cross = direction.cross(point);

        let mut nearest: Option<(NodeId, Rect)> = None;

        for node in self.obstacles.locate_intersecting(corridor) {
            if self.is_excluded(node.id()) {
                continue;
            }

            let rect = node.rect();
            let (lo, hi) = direction.cross_span(&rect);

            if cross < lo || hi < cross {
                continue;
            }

            if !direction.precedes(direction.along(point), direction.trailing_edge(&rect))
                || !direction.precedes(direction.leading_edge(&rect), limit)
            {
                continue;
            }

            let closer = match nearest {
                None => true,
                Some((_, best)) => {
                    let (leading, best_leading) =
                        (direction.leading_edge(&rect), direction.leading_edge(&best));

                    direction.precedes(leading, best_leading)
                        || (leading == best_leading
                            && direction.precedes(
                                direction.trailing_edge(&best),
                                direction.trailing_edge(&rect),
                            ))
                }
            };

            if closer {
                nearest = Some((node.id(), rect));
            }
        }

        nearest
    }

    /// Walks the overlap graph breadth-first from the blocking rectangle,
    /// feeding every reached rectangle to the trap bounds and widening the
    /// silhouette by those not lying beyond the destination.
    fn grow(
        &self,
        node: NodeId,
        rect: Rect,
        point: Point<i32>,
        direction: Direction,
    ) -> Result<Barrier, RouterError> {
        let mut trap = TrapData::new(direction.leading_edge(&rect));
        let mut inverse = TrapData::new(direction.trailing_edge(&rect));
        let (mut silhouette_lo, mut silhouette_hi) = direction.cross_span(&rect);
        let cross = direction.cross(point);

        let mut visited = HashSet::from([node]);
        let mut queue: VecDeque<NodeId> = VecDeque::from([node]);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.obstacles.overlaps(current) {
                if self.is_excluded(neighbor) || !visited.insert(neighbor) {
                    continue;
                }

                let front = self
                    .obstacles
                    .node(neighbor)
                    .ok_or(RouterError::UnknownNode(neighbor))?
                    .rect();
                let (lo, hi) = direction.cross_span(&front);
                let leading = direction.leading_edge(&front);
                let trailing = direction.trailing_edge(&front);

                if direction.precedes(leading, direction.trailing_edge(&self.destination_rect)) {
                    silhouette_lo = silhouette_lo.min(lo);
                    silhouette_hi = silhouette_hi.max(hi);
                }

                let reaches_up_or_left = !direction.precedes(inverse.up_or_left, leading);
                let reaches_down_or_right = !direction.precedes(inverse.down_or_right, leading);

                if hi < cross {
                    trap.approach(direction, Some(leading), None);

                    if reaches_up_or_left {
                        inverse.recede(direction, Some(trailing), None);
                    }
                } else if lo > cross {
                    trap.approach(direction, None, Some(leading));

                    if reaches_down_or_right {
                        inverse.recede(direction, None, Some(trailing));
                    }
                } else if lo < cross && cross < hi {
                    if reaches_up_or_left {
                        inverse.recede(direction, Some(trailing), None);
                    }
                    if reaches_down_or_right {
                        inverse.recede(direction, None, Some(trailing));
                    }
                }

                queue.push_back(neighbor);
            }
        }

        log::debug!(
            "barrier {} ahead of {:?} going {:?}, trap {:?}",
            node,
            point,
            direction,
            trap.state
        );

        Ok(Barrier {
            node,
            rect: direction.rect_from_spans(
                direction.along_span(&rect),
                (silhouette_lo, silhouette_hi),
            ),
            trap,
            inverse,
        })
    }
}
