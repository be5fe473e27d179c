use elbow::{
    canvas::{AccessAnchors, AccessObstacles, CanvasError, CanvasSet, ConnectorId, NodeId},
    geometry::{Direction, Rect},
    router::{free_anchor, RouteOutcome, RouterError, RouterOptions, Rotation},
};
use geo::Point;

mod common;

fn overlaps(canvas: &impl AccessObstacles, id: u32) -> Vec<NodeId> {
    let mut overlaps: Vec<NodeId> = canvas.overlaps(NodeId(id)).collect();
    overlaps.sort();
    overlaps
}

#[test]
fn test_overlap_graph_follows_nodes() {
    let mut canvas = common::canvas_with(&[
        (1, Rect::new(0, 0, 50, 50)),
        (2, Rect::new(55, 0, 50, 50)),
        (3, Rect::new(20, 20, 10, 10)),
        (4, Rect::new(300, 0, 50, 50)),
    ]);

    assert_eq!(overlaps(&canvas, 1), vec![NodeId(2), NodeId(3)]);
    assert_eq!(overlaps(&canvas, 2), vec![NodeId(1)]);
    assert_eq!(overlaps(&canvas, 4), vec![]);

    canvas.move_node(NodeId(2), Rect::new(290, 0, 10, 10)).unwrap();
    assert_eq!(overlaps(&canvas, 1), vec![NodeId(3)]);
    assert_eq!(overlaps(&canvas, 2), vec![NodeId(4)]);
    assert_eq!(overlaps(&canvas, 4), vec![NodeId(2)]);

    canvas.remove_node(NodeId(4)).unwrap();
    assert_eq!(overlaps(&canvas, 2), vec![]);
    assert_eq!(canvas.nodes().count(), 3);
    assert!(canvas.node(NodeId(4)).is_none());
}

#[test]
fn test_node_and_connector_ids_are_checked() {
    let mut canvas = common::canvas_with(&[(1, Rect::new(0, 0, 50, 50))]);

    assert_eq!(
        canvas.add_node(NodeId(1), Rect::new(100, 0, 50, 50)),
        Err(CanvasError::DuplicateNode(NodeId(1)))
    );
    assert_eq!(
        canvas.add_connector(ConnectorId(1), NodeId(1), NodeId(2)),
        Err(CanvasError::UnknownNode(NodeId(2)))
    );
    assert_eq!(
        canvas.move_node(NodeId(7), Rect::new(0, 0, 1, 1)),
        Err(CanvasError::UnknownNode(NodeId(7)))
    );
    assert_eq!(
        canvas
            .route_connector(ConnectorId(9), &RouterOptions::default())
            .unwrap_err(),
        CanvasError::UnknownConnector(ConnectorId(9))
    );

    canvas.add_node(NodeId(2), Rect::new(200, 0, 50, 50)).unwrap();
    canvas
        .add_connector(ConnectorId(1), NodeId(1), NodeId(2))
        .unwrap();
    assert_eq!(
        canvas.add_connector(ConnectorId(1), NodeId(2), NodeId(1)),
        Err(CanvasError::DuplicateConnector(ConnectorId(1)))
    );
}

#[test]
fn test_removing_connector_frees_its_anchors() {
    let mut canvas = common::canvas_with(&[
        (1, Rect::new(0, 0, 100, 50)),
        (2, Rect::new(300, 0, 100, 50)),
    ]);

    common::connect_and_route(&mut canvas, 1, 1, 2);
    assert_eq!(
        canvas.node(NodeId(1)).unwrap().anchor(ConnectorId(1)),
        Some(Point::new(100, 25))
    );

    let removed = canvas.remove_connector(ConnectorId(1)).unwrap();
    assert_eq!(removed.route().len(), 2);
    assert_eq!(canvas.node(NodeId(1)).unwrap().anchors().count(), 0);
    assert_eq!(canvas.node(NodeId(2)).unwrap().anchors().count(), 0);

    // The freed point is handed out again.
    let outcome = common::connect_and_route(&mut canvas, 2, 1, 2);
    assert_eq!(outcome.points()[0], Point::new(100, 25));
}

#[test]
fn test_removing_node_drops_its_connectors() {
    let mut canvas = common::canvas_with(&[
        (1, Rect::new(0, 0, 100, 50)),
        (2, Rect::new(300, 0, 100, 50)),
        (3, Rect::new(0, 200, 100, 50)),
    ]);

    common::connect_and_route(&mut canvas, 1, 1, 2);
    common::connect_and_route(&mut canvas, 2, 1, 3);
    assert_eq!(
        canvas.connectors_of(NodeId(1)),
        vec![ConnectorId(1), ConnectorId(2)]
    );

    canvas.remove_node(NodeId(2)).unwrap();

    assert!(canvas.connector(ConnectorId(1)).is_none());
    assert_eq!(canvas.connectors_of(NodeId(1)), vec![ConnectorId(2)]);
    assert_eq!(canvas.node(NodeId(1)).unwrap().anchors().count(), 1);
}

#[test]
fn test_moved_node_is_rerouted() -> anyhow::Result<()> {
    common::init_logger();
    let mut canvas = common::canvas_with(&[
        (1, Rect::new(0, 0, 100, 50)),
        (2, Rect::new(300, 0, 100, 50)),
    ]);

    common::connect_and_route(&mut canvas, 1, 1, 2);

    canvas.move_node(NodeId(2), Rect::new(300, 200, 100, 50))?;
    // Anchors travel with the node until the route is searched again.
    assert_eq!(
        canvas.node(NodeId(2)).unwrap().anchor(ConnectorId(1)),
        Some(Point::new(300, 225))
    );
    let connector = canvas.connector(ConnectorId(1)).unwrap();
    assert_eq!(connector.target_anchor(), Some(Point::new(300, 225)));
    assert_eq!(connector.source_anchor(), Some(Point::new(100, 25)));

    let rerouted = canvas.reroute_node(NodeId(2), &RouterOptions::default())?;
    dbg!(&rerouted);

    assert_eq!(rerouted.len(), 1);
    assert_eq!(rerouted[0].0, ConnectorId(1));
    common::assert_route_points(&rerouted[0].1, &[(100, 25), (350, 25), (350, 200)]);
    common::assert_attached_route(&canvas, 1);

    Ok(())
}

#[test]
fn test_canvas_set() {
    let mut set = CanvasSet::default();

    set.canvas_mut("main")
        .add_node(NodeId(1), Rect::new(0, 0, 10, 10))
        .unwrap();
    set.canvas_mut("inset")
        .add_node(NodeId(1), Rect::new(50, 50, 10, 10))
        .unwrap();

    let mut names: Vec<&str> = set.names().collect();
    names.sort();
    assert_eq!(names, vec!["inset", "main"]);
    assert_eq!(
        set.canvas("inset").unwrap().node(NodeId(1)).unwrap().rect(),
        Rect::new(50, 50, 10, 10)
    );

    assert!(set.remove("main").is_some());
    assert!(set.canvas("main").is_none());
    assert_eq!(set.canvas_mut("main").nodes().count(), 0);
}

#[test]
fn test_anchor_walks_past_taken_points() {
    let mut canvas = common::canvas_with(&[(1, Rect::new(0, 0, 100, 50))]);
    let options = RouterOptions::default();
    let start = Point::new(100, 25);

    canvas
        .record_anchor(NodeId(1), ConnectorId(1), start)
        .unwrap();
    let node = canvas.node(NodeId(1)).unwrap();

    assert_eq!(
        free_anchor(node, ConnectorId(1), start, Direction::Right, Rotation::Clockwise, &options),
        Ok((start, Direction::Right))
    );
    assert_eq!(
        free_anchor(node, ConnectorId(2), start, Direction::Right, Rotation::Clockwise, &options),
        Ok((Point::new(100, 35), Direction::Right))
    );
    assert_eq!(
        free_anchor(
            node,
            ConnectorId(2),
            start,
            Direction::Right,
            Rotation::CounterClockwise,
            &options
        ),
        Ok((Point::new(100, 15), Direction::Right))
    );
}

#[test]
fn test_anchor_walk_wraps_around_corner() {
    let mut canvas = common::canvas_with(&[(1, Rect::new(0, 0, 100, 50))]);
    let options = RouterOptions::default();

    for (connector, y) in [(1, 25), (2, 35)] {
        canvas
            .record_anchor(NodeId(1), ConnectorId(connector), Point::new(100, y))
            .unwrap();
    }
    let node = canvas.node(NodeId(1)).unwrap();

    // (100, 45) lies within the corner gap, so the walk continues on the
    // bottom edge and reports it.
    assert_eq!(
        free_anchor(
            node,
            ConnectorId(3),
            Point::new(100, 25),
            Direction::Right,
            Rotation::Clockwise,
            &options
        ),
        Ok((Point::new(90, 50), Direction::Down))
    );
}

#[test]
fn test_anchor_exhaustion() {
    let mut canvas = common::canvas_with(&[(1, Rect::new(0, 0, 20, 20))]);
    let options = RouterOptions::default();

    let taken = [(20, 10), (10, 20), (0, 10), (10, 0)];
    for (connector, (x, y)) in taken.into_iter().enumerate() {
        canvas
            .record_anchor(NodeId(1), ConnectorId(connector as u32), Point::new(x, y))
            .unwrap();
    }
    let node = canvas.node(NodeId(1)).unwrap();

    assert_eq!(
        free_anchor(
            node,
            ConnectorId(9),
            Point::new(20, 10),
            Direction::Right,
            Rotation::Clockwise,
            &options
        ),
        Err(RouterError::AnchorExhausted {
            node: NodeId(1),
            connector: ConnectorId(9)
        })
    );
}

#[test]
fn test_exhausted_source_fails_route() {
    let mut canvas = common::canvas_with(&[
        (1, Rect::new(0, 0, 20, 20)),
        (2, Rect::new(200, 0, 20, 20)),
    ]);

    let taken = [(20, 10), (10, 20), (0, 10), (10, 0)];
    for (connector, (x, y)) in taken.into_iter().enumerate() {
        canvas
            .record_anchor(NodeId(1), ConnectorId(100 + connector as u32), Point::new(x, y))
            .unwrap();
    }
    canvas
        .add_connector(ConnectorId(1), NodeId(1), NodeId(2))
        .unwrap();

    let result = canvas.route_connector(ConnectorId(1), &RouterOptions::default());
    assert!(matches!(
        result,
        Err(CanvasError::Router(RouterError::AnchorExhausted { .. }))
    ));
    assert!(canvas.connector(ConnectorId(1)).unwrap().outcome().is_none());
}

#[test]
fn test_options_from_json() -> anyhow::Result<()> {
    let options = RouterOptions::from_reader(
        r#"{ "point_spacing": 5, "coincidence_fallback": "Abandon" }"#.as_bytes(),
    )?;

    assert_eq!(options.point_spacing, 5);
    assert_eq!(
        options.coincidence_fallback,
        elbow::router::CoincidenceFallback::Abandon
    );
    assert_eq!(options.barrier_clearance, 10);
    assert_eq!(options.max_steps, 13);

    let json = options.to_json()?;
    assert_eq!(RouterOptions::from_reader(json.as_bytes())?, options);

    assert!(RouterOptions::from_reader("{ \"max_steps\": -1 }".as_bytes()).is_err());

    Ok(())
}

#[test]
fn test_outcome_accessors() {
    let outcome = RouteOutcome::Partial(vec![Point::new(0, 0), Point::new(0, 30)]);

    assert!(!outcome.is_complete());
    assert_eq!(outcome.length(), 30);
    assert_eq!(outcome.clone().into_points().len(), 2);
}
