use std::ops::ControlFlow;

use geo::Point;

use crate::{
    canvas::AccessObstacles,
    geometry::{Direction, Rect},
    stepper::Step,
};

use super::{
    Barrier, CoincidenceGuard, ObstacleScanner, RouteOutcome, RouterError, RouterOptions,
    TrapState,
};

/// Everything a branch reads while stepping. Shared between the branches of a
/// diagonal search.
pub struct BranchContext<'a, O: AccessObstacles> {
    pub scanner: ObstacleScanner<'a, O>,
    pub guard: CoincidenceGuard,
    /// Point the route heads for, the center of the destination rectangle.
    pub goal: Point<i32>,
    pub options: RouterOptions,
}

impl<'a, O: AccessObstacles> BranchContext<'a, O> {
    pub fn new(
        scanner: ObstacleScanner<'a, O>,
        goal: Point<i32>,
        options: RouterOptions,
    ) -> Self {
        Self {
            scanner,
            guard: CoincidenceGuard::new(&options),
            goal,
            options,
        }
    }
}

/// Grows one route leg by leg, each step travelling straight in one
/// direction and turning at the waypoint it appends.
///
/// The barrier found on a leg becomes the *parallel* barrier of the next,
/// perpendicular leg, which runs alongside it. The one before that is kept as
/// the *previous* parallel barrier so the route does not cut back across it.
#[derive(Debug, Clone)]
pub struct BranchStepper {
    route: Vec<Point<i32>>,
    direction: Direction,
    parallel: Option<Barrier>,
    prev_parallel: Option<Barrier>,
}

impl BranchStepper {
    pub fn new(start: Point<i32>, direction: Direction) -> Self {
        Self {
            route: vec![start],
            direction,
            parallel: None,
            prev_parallel: None,
        }
    }

    /// Starts a branch travelling `direction` from an anchor on the side of
    /// `source` facing `edge`.
    ///
    /// An anchor off the side facing `direction` first steps `clearance` out
    /// of the source. From the back side it then also moves past the nearer
    /// corner, so that the first leg does not cross the source.
    pub fn departing(
        anchor: Point<i32>,
        edge: Direction,
        direction: Direction,
        source: &Rect,
        clearance: i32,
    ) -> Self {
        if edge == direction {
            return Self::new(anchor, direction);
        }

        let stub = edge.shift(anchor, clearance);
        let mut route = vec![anchor, stub];

        if edge == direction.opposite() {
            let (lo, hi) = direction.cross_span(source);
            let cross = direction.cross(anchor);
            let side = if cross - lo <= hi - cross {
                lo - clearance
            } else {
                hi + clearance
            };

            route.push(direction.with_cross(stub, side));
        }

        Self {
            route,
            direction,
            parallel: None,
            prev_parallel: None,
        }
    }

    pub fn route(&self) -> &[Point<i32>] {
        &self.route
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn partial(&mut self) -> RouteOutcome {
        RouteOutcome::Partial(std::mem::take(&mut self.route))
    }

    fn advance<O: AccessObstacles>(
        &self,
        context: &BranchContext<O>,
        point: Point<i32>,
        barrier: Option<&Barrier>,
    ) -> i32 {
        let direction = self.direction;
        let clearance = direction.sign() * context.options.barrier_clearance;

        let Some(barrier) = barrier else {
            let mut along = direction.along(context.goal);

            if let Some(parallel) = &self.parallel {
                along = direction.further(
                    along,
                    direction.trailing_edge(&parallel.rect) + clearance,
                );
            }

            if let Some(prev) = &self.prev_parallel {
                let (lo, _) = direction.cross_span(&prev.rect);
                let bound = if direction.cross(point) < lo {
                    prev.inverse.up_or_left
                } else {
                    prev.inverse.down_or_right
                };

                along = direction.further(along, bound - clearance);
            }

            return along;
        };

        match barrier.trap.state {
            TrapState::None => direction.leading_edge(&barrier.rect) - clearance,
            _ => {
                direction.nearer(barrier.trap.up_or_left, barrier.trap.down_or_right) - clearance
            }
        }
    }

    fn turn<O: AccessObstacles>(
        &self,
        context: &BranchContext<O>,
        waypoint: Point<i32>,
        barrier: Option<&Barrier>,
    ) -> Direction {
        let direction = self.direction;
        let goal_cross = direction.cross(context.goal);

        let Some(barrier) = barrier else {
            return if direction.cross(waypoint) < goal_cross {
                direction.down_or_right()
            } else {
                direction.up_or_left()
            };
        };

        let (lo, hi) = direction.cross_span(&barrier.rect);

        if goal_cross < lo {
            return direction.up_or_left();
        }

        if goal_cross > hi {
            return direction.down_or_right();
        }

        // The destination lies behind the barrier: detour round the cheaper
        // side, passing the far edge given by the inverse trap.
        let cross = direction.cross(waypoint);
        let (along_lo, _) = direction.along_span(&barrier.rect);
        let goal_along = direction.along(context.goal);
        let (far_up_or_left, far_down_or_right) =
            (barrier.inverse.up_or_left, barrier.inverse.down_or_right);

        let up_or_left_cost = (goal_cross - lo).abs()
            + (cross - lo).abs()
            + (far_up_or_left - along_lo).abs()
            + (far_up_or_left - goal_along).abs();
        let down_or_right_cost = (hi - cross).abs()
            + (hi - goal_cross).abs()
            + (far_down_or_right - along_lo).abs()
            + (far_down_or_right - goal_along).abs();

        if up_or_left_cost > down_or_right_cost {
            direction.down_or_right()
        } else {
            direction.up_or_left()
        }
    }

    /// Guesses where the leg after `waypoint`, turning to `next`, will end.
    fn lookahead<O: AccessObstacles>(
        &self,
        context: &BranchContext<O>,
        waypoint: Point<i32>,
        next: Direction,
        barrier: Option<&Barrier>,
    ) -> Point<i32> {
        let direction = self.direction;
        let goal_cross = direction.cross(context.goal);
        let toward_up_or_left = next == direction.up_or_left();

        let cross = match (barrier, &self.parallel) {
            (Some(barrier), _) => {
                let (lo, hi) = direction.cross_span(&barrier.rect);

                if toward_up_or_left {
                    lo.min(goal_cross)
                } else {
                    hi.max(goal_cross)
                }
            }
            (None, Some(parallel)) => {
                let far = if direction.sign() > 0 {
                    parallel.inverse.down_or_right
                } else {
                    parallel.inverse.up_or_left
                };

                if toward_up_or_left {
                    goal_cross.min(far)
                } else {
                    goal_cross.max(far)
                }
            }
            (None, None) => goal_cross,
        };

        direction.with_cross(waypoint, cross)
    }
}

impl<'a, O: AccessObstacles> Step<BranchContext<'a, O>, RouteOutcome, Point<i32>>
    for BranchStepper
{
    type Error = RouterError;

    fn step(
        &mut self,
        context: &BranchContext<'a, O>,
    ) -> Result<ControlFlow<RouteOutcome, Point<i32>>, RouterError> {
        if self.route.len() > context.options.max_steps {
            log::warn!(
                "route gave up after {} waypoints without reaching its destination",
                self.route.len()
            );
            return Ok(ControlFlow::Break(self.partial()));
        }

        let Some(&point) = self.route.last() else {
            return Ok(ControlFlow::Break(self.partial()));
        };
        let direction = self.direction;
        let destination = context.scanner.destination_rect();

        let barrier = context
            .scanner
            .scan(point, direction, context.goal, self.parallel.as_ref())?;

        if barrier.is_none() && self.parallel.is_none() {
            let (lo, hi) = direction.cross_span(&destination);
            let cross = direction.cross(point);

            if lo <= cross && cross <= hi {
                let terminal = direction.with_along(point, direction.leading_edge(&destination));
                self.route.push(terminal);

                log::debug!("reached destination at {:?}", terminal);
                return Ok(ControlFlow::Break(RouteOutcome::Complete(
                    std::mem::take(&mut self.route),
                )));
            }
        }

        let mut along = self.advance(context, point, barrier.as_ref());
        let next = self.turn(context, direction.with_along(point, along), barrier.as_ref());

        if let Some(barrier) = &barrier {
            let half_open = match barrier.trap.state {
                TrapState::DownOrRightEdge => next == direction.up_or_left(),
                TrapState::UpOrLeftEdge => next == direction.down_or_right(),
                _ => false,
            };

            if half_open {
                along = direction.further(
                    along,
                    barrier.trap.forward - direction.sign() * context.options.barrier_clearance,
                );
            }
        }

        let waypoint = direction.with_along(point, along);
        let lookahead = self.lookahead(context, waypoint, next, barrier.as_ref());

        let placed = context.guard.place(
            &self.route,
            direction,
            waypoint,
            lookahead,
            barrier.is_some(),
        );
        let Some(waypoint) = placed else {
            return Ok(ControlFlow::Break(self.partial()));
        };

        log::debug!(
            "{:?} from {:?} to {:?}, then {:?}",
            direction,
            point,
            waypoint,
            next
        );

        self.route.push(waypoint);
        self.prev_parallel = self.parallel.take();
        self.parallel = barrier;
        self.direction = next;

        Ok(ControlFlow::Continue(waypoint))
    }
}
