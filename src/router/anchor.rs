use geo::{point, Point};
use serde::{Deserialize, Serialize};

use crate::{
    canvas::{ConnectorId, Node},
    geometry::Direction,
};

use super::{RouterError, RouterOptions};

/// Sense of a walk around a rectangle's perimeter, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Rotation whose walk along the edge facing `edge` heads `toward`.
    pub fn toward(edge: Direction, toward: Direction) -> Self {
        let clockwise = match edge {
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
        };

        if clockwise == toward {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }
}

/// Finds the point nearest to `start`, walking along the perimeter of `node`
/// from the edge facing `edge`, that `connector` may attach to. Returns the
/// point together with the edge it lies on.
///
/// The walk moves in steps of `point_spacing`. On passing a corner (less than
/// `edge_gap` away from it) it continues `edge_gap` into the adjacent edge.
/// It gives up after going once around the rectangle.
pub fn free_anchor(
    node: &Node,
    connector: ConnectorId,
    start: Point<i32>,
    edge: Direction,
    rotation: Rotation,
    options: &RouterOptions,
) -> Result<(Point<i32>, Direction), RouterError> {
    let spacing = options.point_spacing.max(1) as i64;
    let budget = node.rect().perimeter() / spacing + 4;

    let mut point = start;
    let mut edge = edge;

    for _ in 0..budget {
        if node.is_anchor_available(connector, point) {
            return Ok((point, edge));
        }

        (point, edge) = walk(node, point, edge, rotation, options);
    }

    log::warn!(
        "{}: no free anchor left for {} on its perimeter",
        node.id(),
        connector
    );

    Err(RouterError::AnchorExhausted {
        node: node.id(),
        connector,
    })
}

fn walk(
    node: &Node,
    point: Point<i32>,
    edge: Direction,
    rotation: Rotation,
    options: &RouterOptions,
) -> (Point<i32>, Direction) {
    let rect = node.rect();
    let spacing = options.point_spacing;
    let gap = options.edge_gap;
    let (x, y) = (point.x(), point.y());

    match (edge, rotation) {
        (Direction::Left, Rotation::Clockwise) if y - spacing < rect.top + gap => {
            (point! {x: rect.left + gap, y: rect.top}, Direction::Up)
        }
        (Direction::Left, Rotation::Clockwise) => (point! {x: x, y: y - spacing}, edge),
        (Direction::Left, Rotation::CounterClockwise) if y + spacing > rect.bottom() - gap => {
            (point! {x: rect.left + gap, y: rect.bottom()}, Direction::Down)
        }
        (Direction::Left, Rotation::CounterClockwise) => (point! {x: x, y: y + spacing}, edge),
        (Direction::Up, Rotation::Clockwise) if x + spacing > rect.right() - gap => {
            (point! {x: rect.right(), y: rect.top + gap}, Direction::Right)
        }
        (Direction::Up, Rotation::Clockwise) => (point! {x: x + spacing, y: y}, edge),
        (Direction::Up, Rotation::CounterClockwise) if x - spacing < rect.left + gap => {
            (point! {x: rect.left, y: rect.top + gap}, Direction::Left)
        }
        (Direction::Up, Rotation::CounterClockwise) => (point! {x: x - spacing, y: y}, edge),
        (Direction::Right, Rotation::Clockwise) if y + spacing > rect.bottom() - gap => {
            (point! {x: rect.right() - gap, y: rect.bottom()}, Direction::Down)
        }
        (Direction::Right, Rotation::Clockwise) => (point! {x: x, y: y + spacing}, edge),
        (Direction::Right, Rotation::CounterClockwise) if y - spacing < rect.top + gap => {
            (point! {x: rect.right() - gap, y: rect.top}, Direction::Up)
        }
        (Direction::Right, Rotation::CounterClockwise) => (point! {x: x, y: y - spacing}, edge),
        (Direction::Down, Rotation::Clockwise) if x - spacing < rect.left + gap => {
            (point! {x: rect.left, y: rect.bottom() - gap}, Direction::Left)
        }
        (Direction::Down, Rotation::Clockwise) => (point! {x: x - spacing, y: y}, edge),
        (Direction::Down, Rotation::CounterClockwise) if x + spacing > rect.right() - gap => {
            (point! {x: rect.right(), y: rect.bottom() - gap}, Direction::Right)
        }
        (Direction::Down, Rotation::CounterClockwise) => (point! {x: x + spacing, y: y}, edge),
    }
}

/// Points on the edge through `point` perpendicular to `arrival`, ordered by
/// distance from `point`, alternating sides, one `point_spacing` apart and
/// at least `edge_gap` from the corners.
pub fn edge_neighbors(
    node: &Node,
    point: Point<i32>,
    arrival: Direction,
    options: &RouterOptions,
) -> impl Iterator<Item = Point<i32>> {
    let (lo, hi) = arrival.cross_span(&node.rect());
    let (lo, hi) = (lo + options.edge_gap, hi - options.edge_gap);
    let spacing = options.point_spacing.max(1);
    let origin = arrival.cross(point);
    let reach = (hi - lo).max(0) / spacing + 1;

    (1..=reach)
        .flat_map(move |k| [origin - k * spacing, origin + k * spacing])
        .filter(move |cross| lo <= *cross && *cross <= hi)
        .map(move |cross| arrival.with_cross(point, cross))
}
