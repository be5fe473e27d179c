use geo::{Line, Point};
use itertools::Itertools;

/// Manhattan length of a route.
///
/// Returns 0 for a route of fewer than two points or one that contains a
/// pair of consecutive points differing in both coordinates.
pub fn route_length(route: &[Point<i32>]) -> i64 {
    let mut length = 0;

    for (prev, cur) in route.iter().tuple_windows() {
        if prev.x() == cur.x() {
            length += (prev.y() as i64 - cur.y() as i64).abs();
        } else if prev.y() == cur.y() {
            length += (prev.x() as i64 - cur.x() as i64).abs();
        } else {
            return 0;
        }
    }

    length
}

pub fn is_axis_aligned(route: &[Point<i32>]) -> bool {
    route
        .iter()
        .tuple_windows()
        .all(|(prev, cur)| prev.x() == cur.x() || prev.y() == cur.y())
}

pub fn is_degenerate(line: Line<i32>) -> bool {
    line.start == line.end
}

/// Distance from `p` to the infinite line through `line`. `None` for a
/// degenerate line.
pub fn point_line_distance(line: Line<i32>, p: Point<i32>) -> Option<f64> {
    if is_degenerate(line) {
        return None;
    }

    let (dx, dy) = (line.dx() as i64, line.dy() as i64);
    let (qx, qy) = (
        p.x() as i64 - line.start.x as i64,
        p.y() as i64 - line.start.y as i64,
    );

    let area = (dx * qy - dy * qx).abs() as f64;
    Some(area / ((dx * dx + dy * dy) as f64).sqrt())
}

/// Equal unit direction vectors. Anti-parallel lines do not share a heading.
pub fn same_heading(a: Line<i32>, b: Line<i32>) -> bool {
    if is_degenerate(a) || is_degenerate(b) {
        return false;
    }

    let (ax, ay) = (a.dx() as i64, a.dy() as i64);
    let (bx, by) = (b.dx() as i64, b.dy() as i64);

    ax * by - ay * bx == 0 && ax * bx + ay * by > 0
}

/// Whether `candidate` would run along `existing` with the same heading,
/// its start point closer than `threshold` to the line through `existing`.
pub fn is_coincident(existing: Line<i32>, candidate: Line<i32>, threshold: i32) -> bool {
    match point_line_distance(existing, candidate.start.into()) {
        Some(distance) => distance < threshold as f64 && same_heading(existing, candidate),
        None => false,
    }
}
