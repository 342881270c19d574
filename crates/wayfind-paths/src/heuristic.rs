//! Goal-distance estimates for the A* search.

use wayfind_core::Point;

use crate::grid::{DIAG_COST, STRAIGHT_COST};

/// A pluggable goal-distance estimate.
pub type Heuristic = fn(Point, Point) -> i32;

/// Manhattan (L1) distance scaled by the orthogonal move cost.
///
/// Admissible on 4-connected maps; overestimates diagonal shortcuts on
/// 8-connected maps.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    let (dx, dy) = a.abs_delta(b);
    (dx + dy) * STRAIGHT_COST
}

/// Squared straight-line distance scaled by the orthogonal move cost.
///
/// Note this is the *squared* distance, not a Euclidean norm: it grows
/// quadratically with range, pulling the search hard toward the goal at the
/// price of optimality on anything but short hops.
#[inline]
pub fn euclidean(a: Point, b: Point) -> i32 {
    let (dx, dy) = a.abs_delta(b);
    (dx * dx + dy * dy) * STRAIGHT_COST
}

/// Octile distance: diagonal moves where both axes advance, orthogonal
/// moves for the remainder.
///
/// Admissible and exact on open 8-connected maps with 10/14 costs.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let (dx, dy) = a.abs_delta(b);
    if dx > dy {
        DIAG_COST * dy + STRAIGHT_COST * (dx - dy)
    } else {
        DIAG_COST * dx + STRAIGHT_COST * (dy - dx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_values() {
        assert_eq!(manhattan(Point::new(0, 0), Point::new(3, 4)), 70);
        assert_eq!(manhattan(Point::new(3, 4), Point::new(0, 0)), 70);
        assert_eq!(manhattan(Point::new(2, 2), Point::new(2, 2)), 0);
    }

    #[test]
    fn euclidean_is_squared_distance() {
        assert_eq!(euclidean(Point::new(0, 0), Point::new(3, 4)), 250);
        assert_eq!(euclidean(Point::new(0, 0), Point::new(1, 0)), 10);
    }

    #[test]
    fn octile_values() {
        // Pure diagonal.
        assert_eq!(octile(Point::new(0, 0), Point::new(4, 4)), 56);
        // Mixed: 2 diagonal steps + 3 straight.
        assert_eq!(octile(Point::new(0, 0), Point::new(5, 2)), 58);
        // Pure straight.
        assert_eq!(octile(Point::new(0, 0), Point::new(0, 6)), 60);
    }

    #[test]
    fn octile_is_symmetric() {
        let a = Point::new(1, 7);
        let b = Point::new(6, 2);
        assert_eq!(octile(a, b), octile(b, a));
    }
}
