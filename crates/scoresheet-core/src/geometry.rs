//! Pure geometric predicates shared by the quadrilateral shape.

use kurbo::Point;

/// Check whether four points, taken as the cycle p0→p1→p2→p3→p0, form a
/// convex, non-self-intersecting quadrilateral.
///
/// For each consecutive triple along the cycle the 2D cross product of the
/// two edge vectors is computed and only its strict sign is kept; an exactly
/// zero cross (collinear edges) counts as non-positive, so degenerate-convex
/// configurations pass on the all-non-positive branch. Both winding orders
/// are accepted.
pub fn is_convex(points: &[Point; 4]) -> bool {
    let cross = |a: Point, b: Point, c: Point| -> f64 {
        (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x)
    };

    let mut any_positive = false;
    let mut all_positive = true;
    for i in 0..4 {
        let z = cross(points[i], points[(i + 1) % 4], points[(i + 2) % 4]);
        if z > 0.0 {
            any_positive = true;
        } else {
            all_positive = false;
        }
    }
    all_positive || !any_positive
}

/// Manhattan (L1) distance between two points.
pub fn manhattan_dist(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_convex_square() {
        assert!(is_convex(&square()));
    }

    #[test]
    fn test_convex_all_rotations_and_windings() {
        let pts = square();
        for r in 0..4 {
            let rotated = [pts[r], pts[(r + 1) % 4], pts[(r + 2) % 4], pts[(r + 3) % 4]];
            assert!(is_convex(&rotated), "rotation {} should be convex", r);

            let mut reversed = rotated;
            reversed.reverse();
            assert!(is_convex(&reversed), "reversed rotation {} should be convex", r);
        }
    }

    #[test]
    fn test_self_intersecting_rejected() {
        // Swapping two adjacent corners of the square makes a bowtie.
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ];
        assert!(!is_convex(&pts));
    }

    #[test]
    fn test_concave_rejected() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 10.0),
        ];
        assert!(!is_convex(&pts));
    }

    #[test]
    fn test_collinear_edge_is_degenerate_convex() {
        // Three collinear points along the bottom edge, clockwise winding:
        // the zero cross product is grouped with the non-positive signs, so
        // this degenerate shape passes on the all-non-positive branch.
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
        ];
        assert!(is_convex(&pts));

        // The same shape wound counterclockwise mixes a zero (non-positive)
        // cross with strictly positive ones and is rejected.
        let mut ccw = pts;
        ccw.reverse();
        assert!(!is_convex(&ccw));
    }

    #[test]
    fn test_manhattan_dist() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, -2.0);
        assert!((manhattan_dist(a, b) - 7.0).abs() < f64::EPSILON);
        assert!(manhattan_dist(a, a).abs() < f64::EPSILON);
    }
}
