use elbow::{
    geometry::{Direction, Rect, RelativeDirection},
    math::{is_coincident, route_length},
};
use geo::{Line, Point};

fn classify(src: Rect, dst: Rect) -> RelativeDirection {
    RelativeDirection::classify(&src, &dst)
}

#[test]
fn test_classify_cardinal() {
    let src = Rect::new(0, 0, 100, 50);

    assert_eq!(classify(src, Rect::new(300, 0, 100, 50)), RelativeDirection::Right);
    assert_eq!(classify(src, Rect::new(-300, 10, 100, 50)), RelativeDirection::Left);
    assert_eq!(classify(src, Rect::new(0, 200, 100, 50)), RelativeDirection::Down);
    assert_eq!(classify(src, Rect::new(40, -200, 100, 50)), RelativeDirection::Up);
}

#[test]
fn test_classify_diagonal() {
    let src = Rect::new(0, 0, 100, 50);

    assert_eq!(
        classify(src, Rect::new(300, 200, 100, 50)),
        RelativeDirection::RightDown
    );
    assert_eq!(
        classify(src, Rect::new(300, -200, 100, 50)),
        RelativeDirection::RightUp
    );
    assert_eq!(
        classify(src, Rect::new(-300, 200, 100, 50)),
        RelativeDirection::LeftDown
    );
    assert_eq!(
        classify(Rect::new(300, 200, 100, 50), src),
        RelativeDirection::LeftUp
    );
}

#[test]
fn test_classify_shared_column_wins_over_row() {
    // Both a column and a row are shared: the vertical rules are tried first.
    let src = Rect::new(0, 0, 100, 100);
    let dst = Rect::new(90, 150, 100, 100);

    assert_eq!(classify(src, dst), RelativeDirection::Down);
}

#[test]
fn test_classify_overlap_and_unknown() {
    let src = Rect::new(0, 0, 100, 50);

    assert_eq!(
        classify(src, Rect::new(50, 25, 100, 50)),
        RelativeDirection::Overlap
    );
    // Touching along an edge is neither separated nor overlapping.
    assert_eq!(
        classify(src, Rect::new(100, 0, 100, 50)),
        RelativeDirection::Unknown
    );
}

#[test]
fn test_relative_direction_components() {
    assert_eq!(RelativeDirection::Left.cardinal(), Some(Direction::Left));
    assert_eq!(RelativeDirection::LeftDown.cardinal(), None);
    assert_eq!(
        RelativeDirection::RightUp.diagonal(),
        Some((Direction::Right, Direction::Up))
    );
    assert_eq!(RelativeDirection::Overlap.diagonal(), None);
}

#[test]
fn test_direction_edges() {
    let rect = Rect::new(10, 20, 30, 40);

    assert_eq!(Direction::Right.leading_edge(&rect), 10);
    assert_eq!(Direction::Right.trailing_edge(&rect), 40);
    assert_eq!(Direction::Up.leading_edge(&rect), 60);
    assert_eq!(Direction::Up.trailing_edge(&rect), 20);
    assert_eq!(Direction::Down.cross_span(&rect), (10, 40));
    assert_eq!(
        Direction::Down.rect_from_spans((20, 60), (10, 40)),
        rect
    );

    assert!(Direction::Up.precedes(50, 20));
    assert_eq!(Direction::Left.further(5, -5), -5);
    assert_eq!(Direction::Left.nearer(5, -5), 5);
    assert_eq!(
        Direction::Up.shift(Point::new(0, 0), 10),
        Point::new(0, -10)
    );
}

#[test]
fn test_route_length() {
    let route = [
        Point::new(100, 25),
        Point::new(350, 25),
        Point::new(350, 200),
    ];
    assert_eq!(route_length(&route), 425);

    assert_eq!(route_length(&[]), 0);
    assert_eq!(route_length(&[Point::new(3, 4)]), 0);
    // A diagonal leg invalidates the whole route.
    assert_eq!(
        route_length(&[Point::new(0, 0), Point::new(10, 0), Point::new(20, 5)]),
        0
    );
}

#[test]
fn test_coincidence_needs_same_heading_and_proximity() {
    let existing = Line::new(Point::new(0, 0), Point::new(0, 100));

    assert!(is_coincident(
        existing,
        Line::new(Point::new(5, 50), Point::new(5, 150)),
        10
    ));
    // Anti-parallel.
    assert!(!is_coincident(
        existing,
        Line::new(Point::new(5, 50), Point::new(5, -50)),
        10
    ));
    // Too far.
    assert!(!is_coincident(
        existing,
        Line::new(Point::new(10, 50), Point::new(10, 150)),
        10
    ));
    // Degenerate existing segment.
    assert!(!is_coincident(
        Line::new(Point::new(0, 0), Point::new(0, 0)),
        Line::new(Point::new(0, 5), Point::new(0, 15)),
        10
    ));
}

#[test]
fn test_direction_between_points() {
    let origin = Point::new(300, 200);

    assert_eq!(Direction::between(Point::new(300, 50), origin), Some(Direction::Down));
    assert_eq!(Direction::between(Point::new(100, 200), origin), Some(Direction::Right));
    assert_eq!(Direction::between(origin, Point::new(300, 10)), Some(Direction::Up));
    assert_eq!(Direction::between(origin, Point::new(10, 200)), Some(Direction::Left));
    assert_eq!(Direction::between(origin, origin), None);
    assert_eq!(Direction::between(origin, Point::new(310, 210)), None);
}

#[test]
fn test_rect_strictly_contains() {
    let rect = Rect::new(0, 0, 100, 50);

    assert!(rect.strictly_contains(Point::new(50, 25)));
    assert!(!rect.strictly_contains(Point::new(100, 25)));
    assert!(!rect.strictly_contains(Point::new(0, 0)));
    assert!(!rect.strictly_contains(Point::new(150, 25)));
}
