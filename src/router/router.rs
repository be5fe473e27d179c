use geo::Point;
use thiserror::Error;

use crate::{
    canvas::{AccessAnchors, AccessObstacles, ConnectorId, NodeId},
    geometry::{Direction, Rect, RelativeDirection},
    math::is_axis_aligned,
    stepper::Step,
};

use super::{
    anchor::{edge_neighbors, free_anchor, Rotation},
    explorer::explore,
    BranchContext, BranchStepper, ObstacleScanner, RouteOutcome, RouterOptions,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    #[error("no free anchor left for {connector} on {node}")]
    AnchorExhausted { node: NodeId, connector: ConnectorId },
    #[error("{0} does not exist")]
    UnknownNode(NodeId),
    #[error("a route branch was interrupted, search again")]
    BranchInterrupted,
}

/// Searches routes against a registry and commits their anchors to it.
pub struct Router<'a, R: AccessObstacles + AccessAnchors> {
    registry: &'a mut R,
    options: RouterOptions,
}

impl<'a, R: AccessObstacles + AccessAnchors> Router<'a, R> {
    pub fn new(registry: &'a mut R, options: RouterOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Routes `connector` from `source` to `target`.
    ///
    /// Placements that cannot be classified, and intersecting rectangles,
    /// give [`RouteOutcome::Unclassified`] and release the connector's
    /// anchors. Otherwise the source anchor of the result is recorded, and for
    /// a complete route the destination anchor too.
    pub fn search_route(
        &mut self,
        connector: ConnectorId,
        source: NodeId,
        target: NodeId,
    ) -> Result<RouteOutcome, RouterError> {
        let src = self.rect(source)?;
        let dst = self.rect(target)?;
        let relation = RelativeDirection::classify(&src, &dst);

        log::debug!("{} from {} to {}: {:?}", connector, source, target, relation);

        let outcome = {
            let registry: &R = &*self.registry;
            let scanner = ObstacleScanner::new(registry, source, target, dst, &self.options);
            let context = BranchContext::new(scanner, dst.center(), self.options);

            let clearance = self.options.barrier_clearance;

            if let Some(direction) = relation.cardinal() {
                let (start, edge) = self.facing_anchor(connector, source, &src, &dst, direction)?;
                BranchStepper::departing(start, edge, direction, &src, clearance)
                    .finish(&context)?
            } else if let Some((horizontal, vertical)) = relation.diagonal() {
                let (horizontal_start, horizontal_edge) =
                    self.side_anchor(connector, source, &src, horizontal, vertical)?;
                let (vertical_start, vertical_edge) =
                    self.side_anchor(connector, source, &src, vertical, horizontal)?;

                explore(
                    &context,
                    BranchStepper::departing(
                        horizontal_start,
                        horizontal_edge,
                        horizontal,
                        &src,
                        clearance,
                    ),
                    BranchStepper::departing(
                        vertical_start,
                        vertical_edge,
                        vertical,
                        &src,
                        clearance,
                    ),
                )?
            } else {
                RouteOutcome::Unclassified(relation)
            }
        };

        let outcome = self.commit(connector, source, target, outcome)?;

        log::info!(
            "{}: {:?} route of {} points, length {}",
            connector,
            relation,
            outcome.points().len(),
            outcome.length()
        );

        Ok(outcome)
    }

    fn rect(&self, node: NodeId) -> Result<Rect, RouterError> {
        self.registry
            .node(node)
            .map(|node| node.rect())
            .ok_or(RouterError::UnknownNode(node))
    }

    /// Start of a route whose destination shares a row or column with the
    /// source: the middle of the shared band, on the side facing it.
    fn facing_anchor(
        &self,
        connector: ConnectorId,
        source: NodeId,
        src: &Rect,
        dst: &Rect,
        direction: Direction,
    ) -> Result<(Point<i32>, Direction), RouterError> {
        let (src_lo, src_hi) = direction.cross_span(src);
        let (dst_lo, dst_hi) = direction.cross_span(dst);
        let middle = (src_lo.max(dst_lo) + src_hi.min(dst_hi)) / 2;

        let start = direction.with_cross(
            direction.with_along(src.center(), direction.trailing_edge(src)),
            middle,
        );

        self.allocate(
            connector,
            source,
            start,
            direction,
            Rotation::toward(direction, direction.down_or_right()),
        )
    }

    /// Start of one branch of a diagonal route: the middle of the side facing
    /// `direction`, walking toward `toward` if it is taken.
    fn side_anchor(
        &self,
        connector: ConnectorId,
        source: NodeId,
        src: &Rect,
        direction: Direction,
        toward: Direction,
    ) -> Result<(Point<i32>, Direction), RouterError> {
        let start = direction.with_along(src.center(), direction.trailing_edge(src));

        self.allocate(
            connector,
            source,
            start,
            direction,
            Rotation::toward(direction, toward),
        )
    }

    fn allocate(
        &self,
        connector: ConnectorId,
        source: NodeId,
        start: Point<i32>,
        edge: Direction,
        rotation: Rotation,
    ) -> Result<(Point<i32>, Direction), RouterError> {
        let node = self
            .registry
            .node(source)
            .ok_or(RouterError::UnknownNode(source))?;

        free_anchor(node, connector, start, edge, rotation, &self.options)
    }

    fn commit(
        &mut self,
        connector: ConnectorId,
        source: NodeId,
        target: NodeId,
        outcome: RouteOutcome,
    ) -> Result<RouteOutcome, RouterError> {
        match outcome {
            RouteOutcome::Complete(points) => {
                let points = self.settle_terminal(connector, source, target, points)?;

                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    self.registry.record_anchor(source, connector, *first)?;
                    self.registry.record_anchor(target, connector, *last)?;
                }

                Ok(RouteOutcome::Complete(points))
            }
            RouteOutcome::Partial(points) => {
                if let Some(first) = points.first() {
                    self.registry.record_anchor(source, connector, *first)?;
                }
                self.registry.release_anchor(target, connector);

                Ok(RouteOutcome::Partial(points))
            }
            RouteOutcome::Unclassified(relation) => {
                self.registry.release_anchor(source, connector);
                self.registry.release_anchor(target, connector);

                Ok(RouteOutcome::Unclassified(relation))
            }
        }
    }

    /// Moves the end of the route along the destination edge if another
    /// connector already ends where this route does.
    ///
    /// The last leg is shifted sideways when that keeps the route clear of the
    /// source. Otherwise the last leg gets a jog halfway along it.
    fn settle_terminal(
        &self,
        connector: ConnectorId,
        source: NodeId,
        target: NodeId,
        points: Vec<Point<i32>>,
    ) -> Result<Vec<Point<i32>>, RouterError> {
        let dst = self
            .registry
            .node(target)
            .ok_or(RouterError::UnknownNode(target))?;
        let src = self
            .registry
            .node(source)
            .ok_or(RouterError::UnknownNode(source))?;
        let exhausted = RouterError::AnchorExhausted {
            node: target,
            connector,
        };

        let n = points.len();
        if n < 2 {
            return Err(exhausted);
        }
        let (prev, last) = (points[n - 2], points[n - 1]);

        if dst.is_anchor_available(connector, last) {
            return Ok(points);
        }

        let Some(arrival) = Direction::between(prev, last) else {
            return Err(exhausted);
        };

        for candidate in edge_neighbors(dst, last, arrival, &self.options) {
            if !dst.is_anchor_available(connector, candidate) {
                continue;
            }

            let shifted_prev = arrival.with_cross(prev, arrival.cross(candidate));

            // A two point route starts on the source, which must stay so.
            let shiftable = !src.rect().strictly_contains(shifted_prev)
                && (n > 2
                    || (src.rect().on_boundary(shifted_prev)
                        && src.is_anchor_available(connector, shifted_prev)));

            let mut settled = points.clone();
            if shiftable {
                settled[n - 2] = shifted_prev;
                settled[n - 1] = candidate;
            } else {
                let mid = (arrival.along(prev) + arrival.along(candidate)) / 2;
                let turn = arrival.with_along(prev, mid);

                settled.truncate(n - 1);
                settled.extend([
                    turn,
                    arrival.with_cross(turn, arrival.cross(candidate)),
                    candidate,
                ]);
            }

            if is_axis_aligned(&settled) {
                log::debug!("{}: arrival moved to {:?}", connector, candidate);
                return Ok(settled);
            }
        }

        log::warn!("{}: every point of its arrival edge is taken", target);
        Err(exhausted)
    }
}
