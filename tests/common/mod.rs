#![allow(dead_code)]

use elbow::{
    canvas::{AccessObstacles, Canvas, ConnectorId, NodeId},
    geometry::Rect,
    math::is_axis_aligned,
    router::RouteOutcome,
};
use geo::Point;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Canvas with the default overlap margin holding the given nodes.
pub fn canvas_with(nodes: &[(u32, Rect)]) -> Canvas {
    let mut canvas = Canvas::default();

    for (id, rect) in nodes {
        canvas.add_node(NodeId(*id), *rect).unwrap();
    }

    canvas
}

/// Adds a connector between two nodes and routes it with default options.
pub fn connect_and_route(
    canvas: &mut Canvas,
    connector: u32,
    source: u32,
    target: u32,
) -> RouteOutcome {
    canvas
        .add_connector(ConnectorId(connector), NodeId(source), NodeId(target))
        .unwrap();
    canvas
        .route_connector(ConnectorId(connector), &Default::default())
        .unwrap()
}

pub fn assert_route_points(outcome: &RouteOutcome, expected: &[(i32, i32)]) {
    let expected: Vec<Point<i32>> = expected.iter().map(|(x, y)| Point::new(*x, *y)).collect();
    assert_eq!(outcome.points(), expected.as_slice());
}

/// Checks that a complete route is Manhattan, starts on the source boundary,
/// ends on the target boundary, and that both ends are the anchors held by
/// its connector.
pub fn assert_attached_route(canvas: &Canvas, connector: u32) {
    let connector = canvas.connector(ConnectorId(connector)).unwrap();
    let outcome = connector.outcome().unwrap();
    let points = outcome.points();

    assert!(outcome.is_complete());
    assert!(points.len() >= 2);
    assert!(is_axis_aligned(points));

    let source = canvas.node(connector.source()).unwrap();
    let target = canvas.node(connector.target()).unwrap();
    let (first, last) = (points[0], points[points.len() - 1]);

    assert!(source.rect().on_boundary(first));
    assert!(target.rect().on_boundary(last));
    assert_eq!(source.anchor(connector.id()), Some(first));
    assert_eq!(target.anchor(connector.id()), Some(last));
    assert_eq!(connector.source_anchor(), Some(first));
    assert_eq!(connector.target_anchor(), Some(last));
}
